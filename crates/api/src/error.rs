//! API error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use salonsuite_shared::PreferenceError;
use serde_json::json;

use crate::routing::HostResolveError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // Routing errors
    #[error("Missing Host header")]
    MissingHost,
    #[error("Root domain is not configured")]
    MissingRootDomain,

    // Authentication errors
    #[error("Authentication required")]
    Unauthorized,

    // Validation errors
    #[error("Invalid request: {0}")]
    BadRequest(String),

    // Resource errors
    #[error("Tenant not found: {0}")]
    TenantNotFound(String),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Routing
            ApiError::MissingHost => (StatusCode::BAD_REQUEST, "MISSING_HOST", self.to_string()),
            ApiError::MissingRootDomain => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR", self.to_string()),

            // Authentication
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", self.to_string()),

            // Validation
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),

            // Resources
            ApiError::TenantNotFound(_) => (StatusCode::NOT_FOUND, "TENANT_NOT_FOUND", self.to_string()),

            // Storage
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", "Storage error".to_string()),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<HostResolveError> for ApiError {
    fn from(err: HostResolveError) -> Self {
        match err {
            HostResolveError::MissingHost => ApiError::MissingHost,
            HostResolveError::MissingRootDomain => ApiError::MissingRootDomain,
        }
    }
}

impl From<PreferenceError> for ApiError {
    fn from(err: PreferenceError) -> Self {
        match err {
            PreferenceError::UnknownTenant(slug) => ApiError::TenantNotFound(slug),
            other => {
                tracing::error!("Preference storage error: {:?}", other);
                ApiError::Storage(other.to_string())
            }
        }
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
