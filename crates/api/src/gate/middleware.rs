//! Page gate middleware
//!
//! Applies the session gate to page routes. Runs after tenant rewriting and
//! evaluates the path the browser asked for, so tenant pages and the app
//! shell share the same rules and redirect targets.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use super::{load_session, GateDecision, MountedGate, SessionState};
use crate::auth::JwtSessionLoader;
use crate::routing::ResolvedHost;
use crate::state::AppState;

/// Gate result attached to requests allowed through
#[derive(Debug, Clone)]
pub struct GateContext {
    pub state: SessionState,
    /// Path the gate evaluated (pre-rewrite)
    pub visible_path: String,
}

/// Path as seen by the browser: the pre-rewrite path when available
fn visible_path(request: &Request) -> String {
    request
        .extensions()
        .get::<ResolvedHost>()
        .map(|resolved| resolved.original_path.clone())
        .unwrap_or_else(|| request.uri().path().to_string())
}

/// Middleware enforcing page-level reachability
pub async fn page_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let path = visible_path(&request);
    let loader = JwtSessionLoader::from_headers(Arc::clone(&state.sessions), request.headers());
    let snapshot = load_session(&loader).await;

    let mut gate = MountedGate::new(Arc::clone(&state.gate));
    let outcome = gate.update(snapshot.as_ref(), &path);

    match outcome.decision {
        GateDecision::Render => {
            request.extensions_mut().insert(GateContext {
                state: gate.state(),
                visible_path: path,
            });
            next.run(request).await
        }
        GateDecision::Redirect(target) => {
            tracing::info!(
                path = %path,
                session = ?gate.state(),
                redirect = %target,
                "Session gate redirect"
            );
            Redirect::to(&target).into_response()
        }
        GateDecision::ShowLoading => (
            StatusCode::ACCEPTED,
            Json(json!({ "status": "loading" })),
        )
            .into_response(),
    }
}
