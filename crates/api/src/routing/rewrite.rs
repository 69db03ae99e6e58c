//! Tenant rewrite middleware
//!
//! Runs the host resolver on every request before routing and rewrites the
//! request URI into the tenant's page tree. Must wrap the whole `Router`
//! (not be added with `Router::layer`), since route matching happens on the
//! rewritten URI.

use axum::{
    extract::{Request, State},
    http::{header, uri::PathAndQuery, Uri},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::{HostResolver, RoutingDecision};
use crate::error::ApiError;

/// Routing outcome attached to every request that passed the resolver
#[derive(Debug, Clone)]
pub struct ResolvedHost {
    pub decision: RoutingDecision,
    /// Path as the browser sent it, before any rewrite
    pub original_path: String,
}

impl ResolvedHost {
    pub fn tenant_slug(&self) -> Option<&str> {
        self.decision.tenant_slug()
    }
}

/// Marker set on requests this middleware already rewrote.
/// A request carrying it is never rewritten again.
#[derive(Debug, Clone, Copy)]
pub struct TenantRewrite;

/// Host of a request: the Host header, falling back to the URI authority (HTTP/2)
pub fn request_host(request: &Request) -> Option<String> {
    request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .or_else(|| request.uri().authority().map(|a| a.as_str().to_string()))
}

/// Middleware that resolves the host and rewrites tenant requests
pub async fn tenant_rewrite(
    State(resolver): State<Arc<HostResolver>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if request.extensions().get::<TenantRewrite>().is_some() {
        return Ok(next.run(request).await);
    }

    let host = request_host(&request);
    let original_path = request.uri().path().to_string();

    let decision = resolver
        .resolve(host.as_deref(), &original_path, request.uri().query())
        .map_err(|e| {
            tracing::warn!(uri = %request.uri(), error = %e, "Rejected request without host");
            ApiError::from(e)
        })?;

    match &decision {
        RoutingDecision::Rewrite { slug, path } => {
            tracing::debug!(
                host = host.as_deref().unwrap_or_default(),
                tenant = %slug,
                from = %original_path,
                to = %path,
                "Rewrote tenant request"
            );
            let uri = rewrite_uri(request.uri(), path)?;
            *request.uri_mut() = uri;
            request.extensions_mut().insert(TenantRewrite);
        }
        RoutingDecision::PassThrough(reason) => {
            tracing::debug!(
                host = host.as_deref().unwrap_or_default(),
                reason = ?reason,
                path = %original_path,
                "Passing request through"
            );
        }
    }

    request.extensions_mut().insert(ResolvedHost {
        decision,
        original_path,
    });

    Ok(next.run(request).await)
}

/// Replace the path and query of `uri`, keeping scheme and authority
fn rewrite_uri(uri: &Uri, path_and_query: &str) -> Result<Uri, ApiError> {
    let path_and_query = PathAndQuery::try_from(path_and_query)
        .map_err(|e| ApiError::BadRequest(format!("Invalid tenant path: {}", e)))?;

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query);
    Uri::from_parts(parts).map_err(|e| ApiError::BadRequest(format!("Invalid tenant path: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        extract::Extension,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use tower::{Layer, ServiceExt};

    async fn echo(uri: Uri, resolved: Option<Extension<ResolvedHost>>) -> String {
        match resolved {
            Some(Extension(resolved)) => format!(
                "{}|{}|{}",
                uri,
                resolved.original_path,
                resolved.tenant_slug().unwrap_or("-")
            ),
            None => format!("{}|unresolved", uri),
        }
    }

    fn app() -> Router {
        let resolver = Arc::new(HostResolver::new("example.com").unwrap());
        let inner = Router::new()
            .route("/", get(echo))
            .route("/book", get(echo))
            .route("/:tenant", get(echo))
            .route("/:tenant/*rest", get(echo));
        let wrapped = axum::middleware::from_fn_with_state(resolver, tenant_rewrite).layer(inner);
        Router::new().fallback_service(wrapped)
    }

    async fn send(request: HttpRequest<Body>) -> (StatusCode, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get_req(host: &str, uri: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .uri(uri)
            .header(header::HOST, host)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_tenant_request_is_rewritten_before_routing() {
        let (status, body) = send(get_req(
            "beleza-pura.example.com",
            "/book?date=2024-12-01",
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "/beleza-pura/book?date=2024-12-01|/book|beleza-pura");
    }

    #[tokio::test]
    async fn test_app_shell_request_untouched() {
        let (status, body) = send(get_req("app.example.com:3000", "/book?x=1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "/book?x=1|/book|-");
    }

    #[tokio::test]
    async fn test_custom_domain_untouched() {
        let (status, body) = send(get_req("book.beleza-pura.com", "/book")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "/book|/book|-");
    }

    #[tokio::test]
    async fn test_missing_host_rejected() {
        let request = HttpRequest::builder().uri("/book").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("MISSING_HOST"));
    }

    #[tokio::test]
    async fn test_already_rewritten_request_not_prefixed_twice() {
        let mut request = get_req("spa.example.com", "/spa/book");
        request.extensions_mut().insert(TenantRewrite);
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "/spa/book|unresolved");
    }

    #[test]
    fn test_rewrite_uri_keeps_authority() {
        let uri: Uri = "http://spa.example.com/book?a=1".parse().unwrap();
        let rewritten = rewrite_uri(&uri, "/spa/book?a=1").unwrap();
        assert_eq!(rewritten.to_string(), "http://spa.example.com/spa/book?a=1");
    }
}
