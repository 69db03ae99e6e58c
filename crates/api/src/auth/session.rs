//! Session collaborator backed by signed session tokens

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use salonsuite_shared::SessionSnapshot;
use std::sync::Arc;

use super::jwt::{JwtError, SessionClaims, SessionManager};
use crate::gate::{SessionError, SessionLoader};

/// Cookie carrying the session token for browser requests
pub const SESSION_COOKIE: &str = "salon_session";

/// Extract the session token: `Authorization: Bearer` first, then the session cookie
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Loads the session for one request from its token
pub struct JwtSessionLoader {
    sessions: Arc<SessionManager>,
    token: Option<String>,
}

impl JwtSessionLoader {
    pub fn new(sessions: Arc<SessionManager>, token: Option<String>) -> Self {
        Self { sessions, token }
    }

    pub fn from_headers(sessions: Arc<SessionManager>, headers: &HeaderMap) -> Self {
        Self::new(sessions, session_token(headers))
    }

    /// Validated claims, if the request carries a usable token
    pub fn claims(&self) -> Result<Option<SessionClaims>, JwtError> {
        match &self.token {
            Some(token) => self.sessions.validate(token).map(Some),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SessionLoader for JwtSessionLoader {
    async fn load(&self) -> Result<Option<SessionSnapshot>, SessionError> {
        let claims = self
            .claims()
            .map_err(|e| SessionError::Rejected(e.to_string()))?;
        Ok(Some(match claims {
            Some(claims) => SessionSnapshot::signed_in(claims.super_admin),
            None => SessionSnapshot::signed_out(),
        }))
    }
}
