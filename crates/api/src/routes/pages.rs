//! Page routes
//!
//! App-shell pages and the tenant page tree. Both sit behind the session
//! gate; the tenant tree is only reachable through the host rewrite
//! (`beleza-pura.example.com/book` -> `/beleza-pura/book`).

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use salonsuite_shared::{Branding, Tenant};
use serde::Serialize;

use crate::{
    error::{ApiError, ApiResult},
    gate::{GateContext, SessionState},
    state::AppState,
};

/// Page handed to the renderer
#[derive(Debug, Serialize)]
pub struct PageDescriptor {
    pub area: PageArea,
    /// Path inside the area (tenant pages are relative to the tenant root)
    pub page: String,
    pub session: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<TenantView>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageArea {
    App,
    Tenant,
}

/// Public tenant fields exposed to pages
#[derive(Debug, Serialize)]
pub struct TenantView {
    pub name: String,
    pub slug: String,
    pub branding: Branding,
}

impl From<&Tenant> for TenantView {
    fn from(tenant: &Tenant) -> Self {
        Self {
            name: tenant.name.clone(),
            slug: tenant.slug.to_string(),
            branding: tenant.branding.clone(),
        }
    }
}

fn session_label(state: SessionState) -> &'static str {
    match state {
        SessionState::Loading => "loading",
        SessionState::Unauthenticated => "anonymous",
        SessionState::AuthenticatedUser => "user",
        SessionState::AuthenticatedSuperAdmin => "super_admin",
    }
}

/// App-shell page (login, dashboard, super-admin console)
pub async fn app_page(Extension(ctx): Extension<GateContext>) -> Json<PageDescriptor> {
    Json(PageDescriptor {
        area: PageArea::App,
        page: ctx.visible_path,
        session: session_label(ctx.state),
        tenant: None,
    })
}

/// Tenant root page (`/<slug>`)
pub async fn tenant_root(
    State(state): State<AppState>,
    Path(tenant_slug): Path<String>,
    Extension(ctx): Extension<GateContext>,
) -> ApiResult<Json<PageDescriptor>> {
    tenant_descriptor(&state, &tenant_slug, "/".to_string(), ctx)
}

/// Any page in the tenant tree (`/<slug>/<rest>`)
pub async fn tenant_page(
    State(state): State<AppState>,
    Path((tenant_slug, rest)): Path<(String, String)>,
    Extension(ctx): Extension<GateContext>,
) -> ApiResult<Json<PageDescriptor>> {
    tenant_descriptor(&state, &tenant_slug, format!("/{}", rest), ctx)
}

fn tenant_descriptor(
    state: &AppState,
    tenant_slug: &str,
    page: String,
    ctx: GateContext,
) -> ApiResult<Json<PageDescriptor>> {
    let tenant = state
        .directory
        .find_by_slug(tenant_slug)
        .ok_or_else(|| ApiError::TenantNotFound(tenant_slug.to_string()))?;

    Ok(Json(PageDescriptor {
        area: PageArea::Tenant,
        page,
        session: session_label(ctx.state),
        tenant: Some(TenantView::from(tenant)),
    }))
}
