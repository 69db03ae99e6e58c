//! Tenant directory and current-tenant preference endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use salonsuite_shared::Tenant;
use serde::Deserialize;

use crate::{
    auth::AuthSession,
    error::{ApiError, ApiResult},
    state::AppState,
};

/// List all tenants in directory order
pub async fn list_tenants(State(state): State<AppState>) -> Json<Vec<Tenant>> {
    Json(state.directory.all().to_vec())
}

/// Get one tenant by slug
pub async fn get_tenant(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Tenant>> {
    state
        .directory
        .find_by_slug(&slug)
        .cloned()
        .map(Json)
        .ok_or(ApiError::TenantNotFound(slug))
}

/// The caller's current tenant (directory default until one is selected)
pub async fn get_current_tenant(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Json<Tenant> {
    Json(state.preferences.current(&session.subject).await.clone())
}

#[derive(Debug, Deserialize)]
pub struct SelectTenantRequest {
    pub slug: String,
}

/// Select and persist the caller's current tenant
pub async fn select_current_tenant(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(body): Json<SelectTenantRequest>,
) -> ApiResult<Json<Tenant>> {
    let slug = body.slug.trim();
    if slug.is_empty() {
        return Err(ApiError::BadRequest("slug is required".to_string()));
    }

    let tenant = state.preferences.select(&session.subject, slug).await?;
    Ok(Json(tenant.clone()))
}
