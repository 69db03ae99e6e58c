//! Host-to-Tenant Resolution
//!
//! Maps an incoming Host header to an internal route:
//! - Root domain or app.<root>: application shell, path unchanged
//! - Tenant subdomains: beleza-pura.example.com/book -> /beleza-pura/book
//! - Anything else (custom domains, reserved or malformed labels): passed
//!   through unchanged
//!
//! Resolution is a pure function of (host, root domain, path, query).
//! Custom domains are not looked up; they fall through to the app shell.

use salonsuite_shared::{is_valid_slug, RESERVED_SLUGS};

/// Host prefix reserved for the application shell
const APP_SHELL_PREFIX: &str = "app.";

/// Default local development port suffix stripped from hosts
pub const DEFAULT_DEV_PORT_SUFFIX: &str = ":3000";

/// Routing decision for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    /// Serve the request as-is
    PassThrough(PassThroughReason),
    /// Serve the request from the tenant's page tree at `path`
    Rewrite { slug: String, path: String },
}

/// Why a request was passed through without rewriting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassThroughReason {
    /// Host is the root domain or app.<root>
    AppShell,
    /// Host is outside the root domain (custom domain, unmapped), or its
    /// leading label cannot name a tenant
    UnmatchedHost,
}

impl RoutingDecision {
    pub fn tenant_slug(&self) -> Option<&str> {
        match self {
            RoutingDecision::Rewrite { slug, .. } => Some(slug),
            RoutingDecision::PassThrough(_) => None,
        }
    }
}

/// Host resolver bound to one root domain
#[derive(Debug, Clone)]
pub struct HostResolver {
    root_domain: String,
    dev_port_suffix: String,
}

impl HostResolver {
    /// Create a resolver for `root_domain` using the default dev port suffix
    pub fn new(root_domain: &str) -> Result<Self, HostResolveError> {
        Self::with_dev_port(root_domain, DEFAULT_DEV_PORT_SUFFIX)
    }

    /// Create a resolver with a custom local development port suffix (e.g. ":5173")
    pub fn with_dev_port(root_domain: &str, dev_port_suffix: &str) -> Result<Self, HostResolveError> {
        let root_domain = root_domain.trim().to_lowercase();
        if root_domain.is_empty() {
            return Err(HostResolveError::MissingRootDomain);
        }
        Ok(Self {
            root_domain,
            dev_port_suffix: dev_port_suffix.to_string(),
        })
    }

    pub fn root_domain(&self) -> &str {
        &self.root_domain
    }

    /// Resolve a request
    ///
    /// Returns:
    /// - Ok(PassThrough(AppShell)) for the root domain and app.<root>
    /// - Ok(Rewrite) for <slug>.<root>, with the query preserved verbatim
    /// - Ok(PassThrough(UnmatchedHost)) for every other host
    /// - Err(MissingHost) if the host header is absent or blank
    pub fn resolve(
        &self,
        host: Option<&str>,
        path: &str,
        query: Option<&str>,
    ) -> Result<RoutingDecision, HostResolveError> {
        let host = host
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(HostResolveError::MissingHost)?;
        let host = normalize_host(host, &self.dev_port_suffix);

        if is_app_shell_host(&host, &self.root_domain) {
            return Ok(RoutingDecision::PassThrough(PassThroughReason::AppShell));
        }

        match tenant_label(&host, &self.root_domain) {
            Some(slug) => Ok(RoutingDecision::Rewrite {
                path: rewrite_path(slug, path, query),
                slug: slug.to_string(),
            }),
            None => Ok(RoutingDecision::PassThrough(PassThroughReason::UnmatchedHost)),
        }
    }
}

/// Normalize a host header value: lowercase and strip the dev port suffix
fn normalize_host(host: &str, dev_port_suffix: &str) -> String {
    let host = host.to_lowercase();
    if dev_port_suffix.is_empty() {
        return host;
    }
    match host.strip_suffix(dev_port_suffix) {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}

/// Check if this host serves the application shell
fn is_app_shell_host(host: &str, root_domain: &str) -> bool {
    host == root_domain
        || host
            .strip_prefix(APP_SHELL_PREFIX)
            .is_some_and(|rest| rest == root_domain)
}

/// Leading label of a host under `.<root>`, if it can name a tenant.
///
/// The label is spliced into the request path, so it must be a valid slug.
/// Reserved labels would land on app-shell routes and are never tenants.
fn tenant_label<'a>(host: &'a str, root_domain: &str) -> Option<&'a str> {
    let subdomain = host
        .strip_suffix(root_domain)?
        .strip_suffix('.')?;
    let label = subdomain.split('.').next()?;
    if is_valid_slug(label) && !RESERVED_SLUGS.contains(&label) {
        Some(label)
    } else {
        None
    }
}

/// Build `/<slug><path>[?<query>]`
fn rewrite_path(slug: &str, path: &str, query: Option<&str>) -> String {
    let query_len = query.map_or(0, |q| q.len() + 1);
    let mut rewritten = String::with_capacity(1 + slug.len() + path.len() + query_len);
    rewritten.push('/');
    rewritten.push_str(slug);
    if !path.starts_with('/') {
        rewritten.push('/');
    }
    rewritten.push_str(path);
    if let Some(query) = query {
        rewritten.push('?');
        rewritten.push_str(query);
    }
    rewritten
}

/// Errors that can occur during host resolution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostResolveError {
    #[error("Missing Host header")]
    MissingHost,

    #[error("Root domain is not configured")]
    MissingRootDomain,
}
