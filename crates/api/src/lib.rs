//! SalonSuite Edge API Library
//!
//! Tenant host routing and page-level session gating for SalonSuite.

pub mod auth;
pub mod config;
pub mod error;
pub mod gate;
pub mod routes;
pub mod routing;
pub mod security;
pub mod state;
pub mod telemetry;

use axum::{middleware, Router};
use tower::Layer;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use gate::{GateDecision, MountedGate, SessionGate, SessionState};
pub use routing::{HostResolver, RoutingDecision};
pub use state::AppState;

/// Build the full HTTP application.
///
/// The tenant rewrite wraps the router itself so routing sees the rewritten
/// path; tracing and security headers wrap everything.
pub fn build_app(state: AppState) -> Router {
    let router = routes::create_router(state.clone());
    let rewritten =
        middleware::from_fn_with_state(state.resolver.clone(), routing::tenant_rewrite).layer(router);

    Router::new()
        .fallback_service(rewritten)
        .layer(middleware::from_fn(security::security_headers_middleware))
        .layer(TraceLayer::new_for_http())
}
