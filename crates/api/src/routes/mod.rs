//! HTTP routes

pub mod health;
pub mod pages;
pub mod tenants;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};

use crate::{auth::require_session, gate::page_gate, state::AppState};

/// App-shell page routes. Their first segment must be a reserved slug, or a
/// tenant subdomain could be rewritten onto them.
const APP_SHELL_PAGES: &[&str] = &["/login", "/dashboard", "/super-admin", "/super-admin/*rest"];

/// Create all routes. Paths here are post-rewrite: tenant pages live under
/// `/:tenant_slug`.
pub fn create_router(state: AppState) -> Router {
    // Health check routes (at root level for infrastructure monitoring)
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    // Public API routes (no auth required) - under /api/v1
    let public_api_routes = Router::new()
        .route("/tenants", get(tenants::list_tenants))
        .route("/tenants/:slug", get(tenants::get_tenant));

    // Protected API routes (session required) - under /api/v1
    let protected_api_routes = Router::new()
        .route(
            "/tenants/current",
            get(tenants::get_current_tenant).put(tenants::select_current_tenant),
        )
        .layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            require_session,
        ));

    let api_v1_routes = Router::new()
        .merge(public_api_routes)
        .merge(protected_api_routes);

    // Page routes behind the session gate: app shell first, then the tenant tree
    let page_routes = APP_SHELL_PAGES
        .iter()
        .fold(Router::<AppState>::new(), |router, path| {
            router.route(path, get(pages::app_page))
        })
        .route("/:tenant_slug", get(pages::tenant_root))
        .route("/:tenant_slug/", get(pages::tenant_root))
        .route("/:tenant_slug/*rest", get(pages::tenant_page))
        .route_layer(middleware::from_fn_with_state(state.clone(), page_gate));

    Router::new()
        .merge(health_routes)
        .merge(page_routes)
        .nest("/api/v1", api_v1_routes)
        .layer(DefaultBodyLimit::max(64 * 1024))
        .with_state(state)
}
