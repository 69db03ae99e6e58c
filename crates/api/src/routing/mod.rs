//! Host-based tenant routing
//!
//! This module resolves incoming Host headers to tenant page trees,
//! enabling tenant-specific URLs like:
//! - Application shell: example.com, app.example.com
//! - Tenant subdomains: beleza-pura.example.com -> /beleza-pura/...
//! - Custom domains: passed through (not mapped yet)

mod host_resolver;
mod rewrite;

pub use host_resolver::{
    HostResolveError, HostResolver, PassThroughReason, RoutingDecision, DEFAULT_DEV_PORT_SUFFIX,
};
pub use rewrite::{request_host, tenant_rewrite, ResolvedHost, TenantRewrite};
