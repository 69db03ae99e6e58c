//! Authentication module for SalonSuite

pub mod jwt;
pub mod middleware;
pub mod session;

pub use jwt::{JwtError, SessionClaims, SessionManager};
pub use middleware::{require_session, AuthSession};
pub use session::{session_token, JwtSessionLoader, SESSION_COOKIE};
