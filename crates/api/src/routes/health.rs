//! Health check endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub root_domain: String,
    pub tenants: usize,
    pub preference_store: String,
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, store) = match state.preferences.check().await {
        Ok(()) => (StatusCode::OK, "ok".to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "Preference store health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    };

    (
        status,
        Json(HealthResponse {
            status: if status.is_success() { "healthy" } else { "unhealthy" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            root_domain: state.resolver.root_domain().to_string(),
            tenants: state.directory.len(),
            preference_store: store,
        }),
    )
}

/// Liveness probe (just returns 200 if the server is running)
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe (the preference store must be readable)
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.preferences.check().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{test_config, test_state};
    use salonsuite_shared::{FilePreferenceStore, TenantDirectory};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_healthy_with_memory_store() {
        let state = test_state();
        let (status, Json(body)) = health(State(state.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "healthy");
        assert_eq!(body.tenants, 3);
        assert_eq!(readiness(State(state)).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unreadable_store_is_unhealthy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();
        let state = AppState::new(
            test_config(),
            TenantDirectory::builtin(),
            Arc::new(FilePreferenceStore::new(&path)),
        )
        .unwrap();

        let (status, Json(body)) = health(State(state.clone())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "unhealthy");
        assert!(body.preference_store.contains("corrupt"));
        assert_eq!(readiness(State(state)).await, StatusCode::SERVICE_UNAVAILABLE);
    }
}
