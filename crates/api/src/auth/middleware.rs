//! Authentication middleware for API routes

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::jwt::SessionManager;
use super::session::session_token;
use crate::error::ApiError;

/// Authenticated caller, inserted as a request extension by [`require_session`]
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub subject: String,
    pub email: String,
    pub super_admin: bool,
}

/// Require a valid session token; rejects with 401 otherwise
pub async fn require_session(
    State(sessions): State<Arc<SessionManager>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(request.headers()).ok_or(ApiError::Unauthorized)?;

    let claims = sessions.validate(&token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected session token");
        ApiError::Unauthorized
    })?;

    request.extensions_mut().insert(AuthSession {
        subject: claims.sub,
        email: claims.email,
        super_admin: claims.super_admin,
    });

    Ok(next.run(request).await)
}
