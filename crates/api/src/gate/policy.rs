//! Route reachability policy
//!
//! Maps (session state, path) to a gate decision. Pure; no navigation
//! bookkeeping happens here (see `MountedGate`).

use salonsuite_shared::SessionSnapshot;

/// Session state as seen by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Unauthenticated,
    AuthenticatedUser,
    AuthenticatedSuperAdmin,
}

impl SessionState {
    /// Derive the state from a snapshot. A missing snapshot counts as signed out.
    pub fn from_snapshot(snapshot: Option<&SessionSnapshot>) -> Self {
        match snapshot {
            None => SessionState::Unauthenticated,
            Some(s) if s.is_loading => SessionState::Loading,
            Some(s) if !s.is_authenticated => SessionState::Unauthenticated,
            Some(s) if s.is_super_admin => SessionState::AuthenticatedSuperAdmin,
            Some(_) => SessionState::AuthenticatedUser,
        }
    }

    pub fn is_authenticated(self) -> bool {
        matches!(
            self,
            SessionState::AuthenticatedUser | SessionState::AuthenticatedSuperAdmin
        )
    }
}

/// What the page should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Show a neutral waiting indicator, no redirect
    ShowLoading,
    /// Navigate away to this route and render nothing else
    Redirect(String),
    /// Render the requested page tree
    Render,
}

/// Route protection rules
#[derive(Debug, Clone)]
pub struct SessionGate {
    login_route: String,
    landing_route: String,
    super_admin_prefixes: Vec<String>,
}

impl SessionGate {
    pub fn new(
        login_route: impl Into<String>,
        landing_route: impl Into<String>,
        super_admin_prefixes: Vec<String>,
    ) -> Self {
        Self {
            login_route: login_route.into(),
            landing_route: landing_route.into(),
            super_admin_prefixes,
        }
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    pub fn landing_route(&self) -> &str {
        &self.landing_route
    }

    /// Whether `path` is reserved for super-admins
    pub fn is_super_admin_path(&self, path: &str) -> bool {
        self.super_admin_prefixes
            .iter()
            .any(|prefix| path_has_prefix(path, prefix))
    }

    /// Decide what to do for `state` on `path`
    pub fn evaluate(&self, state: SessionState, path: &str) -> GateDecision {
        match state {
            SessionState::Loading => GateDecision::ShowLoading,
            SessionState::Unauthenticated => {
                // Already on the login page: redirecting again would loop
                if is_same_route(path, &self.login_route) {
                    GateDecision::Render
                } else {
                    GateDecision::Redirect(self.login_route.clone())
                }
            }
            SessionState::AuthenticatedUser if self.is_super_admin_path(path) => {
                GateDecision::Redirect(self.landing_route.clone())
            }
            SessionState::AuthenticatedUser | SessionState::AuthenticatedSuperAdmin => {
                GateDecision::Render
            }
        }
    }
}

/// Exact route match, ignoring a trailing '/'
fn is_same_route(path: &str, route: &str) -> bool {
    let path = path.trim_end_matches('/');
    let route = route.trim_end_matches('/');
    path == route
}

/// Segment-aware prefix match: "/super-admin" matches "/super-admin" and
/// "/super-admin/users" but not "/super-administrator"
fn path_has_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
