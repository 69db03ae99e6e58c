//! End-to-end tests: host rewrite, session gate and tenant API through the
//! assembled application.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use salonsuite_api::{build_app, AppState, Config};
use salonsuite_shared::{MemoryPreferenceStore, TenantDirectory};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".to_string(),
        root_domain: "example.com".to_string(),
        dev_port_suffix: ":3000".to_string(),
        session_jwt_secret: "integration-secret-must-be-at-least-32-chars".to_string(),
        session_expiry_hours: 1,
        login_route: "/login".to_string(),
        landing_route: "/dashboard".to_string(),
        super_admin_prefixes: vec!["/super-admin".to_string()],
        tenant_fixture_path: None,
        preference_store_path: None,
    }
}

fn state() -> AppState {
    AppState::new(
        config(),
        TenantDirectory::builtin(),
        Arc::new(MemoryPreferenceStore::new()),
    )
    .unwrap()
}

fn request(host: Option<&str>, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(host) = host {
        builder = builder.header(header::HOST, host);
    }
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(state: &AppState, request: Request<Body>) -> Response {
    build_app(state.clone()).oneshot(request).await.unwrap()
}

async fn json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn tenant_subdomain_renders_tenant_page() {
    let state = state();
    let token = state.sessions.issue("user-1", "ana@example.com", false).unwrap();

    let response = send(
        &state,
        request(
            Some("beleza-pura.example.com"),
            "/book?date=2024-12-01",
            Some(&token),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::VARY], "Host");

    let body = json(response).await;
    assert_eq!(body["area"], "tenant");
    assert_eq!(body["page"], "/book");
    assert_eq!(body["session"], "user");
    assert_eq!(body["tenant"]["slug"], "beleza-pura");
    assert_eq!(body["tenant"]["branding"]["primary_color"], "#d94f8a");
}

#[tokio::test]
async fn tenant_root_over_dev_port() {
    let state = state();
    let token = state.sessions.issue("user-1", "ana@example.com", false).unwrap();

    let response = send(
        &state,
        request(Some("studio-lux.example.com:3000"), "/", Some(&token)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["tenant"]["name"], "Studio Lux");
    assert_eq!(body["page"], "/");
}

#[tokio::test]
async fn anonymous_tenant_visitor_sent_to_login_on_same_host() {
    let state = state();

    let response = send(&state, request(Some("beleza-pura.example.com"), "/book", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    // Following the redirect lands on the tenant's login page
    let response = send(&state, request(Some("beleza-pura.example.com"), "/login", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["area"], "tenant");
    assert_eq!(body["page"], "/login");
    assert_eq!(body["session"], "anonymous");
}

#[tokio::test]
async fn unknown_tenant_is_not_found() {
    let state = state();
    let token = state.sessions.issue("user-1", "ana@example.com", false).unwrap();

    let response = send(&state, request(Some("ghost.example.com"), "/book", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json(response).await["error"]["code"], "TENANT_NOT_FOUND");
}

#[tokio::test]
async fn app_shell_hosts_are_not_rewritten() {
    let state = state();
    let token = state.sessions.issue("user-1", "ana@example.com", false).unwrap();

    for host in ["example.com", "app.example.com", "app.example.com:3000"] {
        let response = send(&state, request(Some(host), "/dashboard", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::OK, "host {host}");
        let body = json(response).await;
        assert_eq!(body["area"], "app");
        assert_eq!(body["page"], "/dashboard");
    }
}

#[tokio::test]
async fn super_admin_console_is_gated_by_role() {
    let state = state();
    let user = state.sessions.issue("user-1", "ana@example.com", false).unwrap();
    let admin = state.sessions.issue("root", "root@example.com", true).unwrap();

    let response = send(
        &state,
        request(Some("app.example.com"), "/super-admin/tenants", Some(&user)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let response = send(
        &state,
        request(Some("app.example.com"), "/super-admin/tenants", Some(&admin)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["session"], "super_admin");

    // The same rules apply inside a tenant's page tree
    let response = send(
        &state,
        request(Some("beleza-pura.example.com"), "/super-admin", Some(&user)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn reserved_subdomain_cannot_reach_super_admin_console() {
    let state = state();
    let user = state.sessions.issue("user-1", "ana@example.com", false).unwrap();

    let response = send(
        &state,
        request(Some("super-admin.example.com"), "/tenants", Some(&user)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Not rewritten, so the gate sees the console path and applies the role check
    let response = send(
        &state,
        request(Some("super-admin.example.com"), "/super-admin", Some(&user)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    for host in ["dashboard.example.com", "login.example.com", "health.example.com"] {
        let response = send(&state, request(Some(host), "/super-admin/x", Some(&user))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "host {host}");
    }
}

#[tokio::test]
async fn malformed_subdomain_is_not_rewritten() {
    let state = state();
    let token = state.sessions.issue("user-1", "ana@example.com", false).unwrap();

    // `a?beleza-pura` must not become tenant `a` with the path in the query
    let response = send(
        &state,
        request(Some("a?beleza-pura.example.com"), "/book", Some(&token)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json(response).await["error"]["message"], "Tenant not found: book");
}

#[tokio::test]
async fn login_subpaths_still_require_session() {
    let state = state();

    let response = send(
        &state,
        request(Some("beleza-pura.example.com"), "/login/book", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = send(&state, request(Some("beleza-pura.example.com"), "/login/", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn custom_domain_passes_through() {
    let state = state();

    // Not mapped to any tenant: served as the app shell path, unchanged
    let response = send(&state, request(Some("book.beleza-pura.com"), "/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_host_is_rejected() {
    let state = state();
    let response = send(&state, request(None, "/health", None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["x-frame-options"], "DENY");
    assert_eq!(json(response).await["error"]["code"], "MISSING_HOST");
}

#[tokio::test]
async fn health_endpoints() {
    let state = state();

    let response = send(&state, request(Some("10.0.0.5:3000"), "/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["tenants"], 3);

    let response = send(&state, request(Some("example.com"), "/health/ready", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn tenant_directory_api() {
    let state = state();

    let response = send(&state, request(Some("example.com"), "/api/v1/tenants", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[0]["slug"], "beleza-pura");

    let response = send(
        &state,
        request(Some("example.com"), "/api/v1/tenants/serenity-spa", None),
    )
    .await;
    assert_eq!(json(response).await["name"], "Serenity Spa");

    let response = send(&state, request(Some("example.com"), "/api/v1/tenants/nope", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn current_tenant_requires_session() {
    let state = state();
    let response = send(
        &state,
        request(Some("example.com"), "/api/v1/tenants/current", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn current_tenant_selection_persists() {
    let state = state();
    let token = state.sessions.issue("user-7", "u7@example.com", false).unwrap();

    let response = send(
        &state,
        request(Some("example.com"), "/api/v1/tenants/current", Some(&token)),
    )
    .await;
    assert_eq!(json(response).await["slug"], "beleza-pura");

    let select = Request::builder()
        .method(Method::PUT)
        .uri("/api/v1/tenants/current")
        .header(header::HOST, "example.com")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"slug":"studio-lux"}"#))
        .unwrap();
    let response = send(&state, select).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["slug"], "studio-lux");

    let response = send(
        &state,
        request(Some("example.com"), "/api/v1/tenants/current", Some(&token)),
    )
    .await;
    assert_eq!(json(response).await["slug"], "studio-lux");

    let bad = Request::builder()
        .method(Method::PUT)
        .uri("/api/v1/tenants/current")
        .header(header::HOST, "example.com")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"slug":"ghost"}"#))
        .unwrap();
    let response = send(&state, bad).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
