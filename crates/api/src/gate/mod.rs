//! Session gate
//!
//! Decides whether a page is reachable for the current session and role,
//! redirecting otherwise:
//! - Loading: waiting indicator, never a redirect
//! - Signed out (or no session data): redirect to the login route
//! - Regular user on a super-admin route: redirect to the landing route
//! - Everything else: render

mod middleware;
mod mounted;
mod policy;

pub use middleware::{page_gate, GateContext};
pub use mounted::{load_session, GateDriver, GateOutcome, MountedGate, SessionError, SessionLoader};
pub use policy::{GateDecision, SessionGate, SessionState};
