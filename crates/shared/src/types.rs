//! Common types used across SalonSuite

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::SalonError;

// =============================================================================
// ID Wrappers
// =============================================================================

/// Tenant ID wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub Uuid);

impl TenantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TenantId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// Slugs
// =============================================================================

/// Maximum length of a DNS label
const MAX_SLUG_LEN: usize = 63;

/// Slugs that cannot be used by tenants: they name app-shell hosts or
/// top-level routes
pub const RESERVED_SLUGS: &[&str] = &[
    "app",
    "www",
    "api",
    "admin",
    "super-admin",
    "login",
    "dashboard",
    "health",
    "static",
    "assets",
];

/// URL-safe tenant identifier, used as the subdomain label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantSlug(String);

impl TenantSlug {
    /// Parse a slug, requiring a valid lowercase DNS label
    pub fn parse(value: &str) -> Result<Self, SalonError> {
        if is_valid_slug(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(SalonError::InvalidSlug(value.to_string()))
        }
    }

    /// Wrap a value already known to be a valid slug
    pub(crate) fn from_static(value: &'static str) -> Self {
        debug_assert!(is_valid_slug(value));
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TenantSlug {
    type Error = SalonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_slug(&value) {
            Ok(Self(value))
        } else {
            Err(SalonError::InvalidSlug(value))
        }
    }
}

impl From<TenantSlug> for String {
    fn from(slug: TenantSlug) -> Self {
        slug.0
    }
}

impl fmt::Display for TenantSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check that a value is a lowercase DNS label: `[a-z0-9-]`, 1-63 chars,
/// no leading or trailing hyphen
pub fn is_valid_slug(value: &str) -> bool {
    if value.is_empty() || value.len() > MAX_SLUG_LEN {
        return false;
    }
    if value.starts_with('-') || value.ends_with('-') {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

// =============================================================================
// Tenants
// =============================================================================

/// Tenant branding colors (CSS color strings)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    pub primary_color: String,
    pub secondary_color: String,
}

/// One customer organization (a salon or spa)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub slug: TenantSlug,
    pub branding: Branding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<String>,
}

// =============================================================================
// Session
// =============================================================================

/// Authentication state published by the session collaborator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub is_authenticated: bool,
    pub is_super_admin: bool,
    pub is_loading: bool,
}

impl SessionSnapshot {
    /// Snapshot reported while the session is still being fetched
    pub const fn loading() -> Self {
        Self {
            is_authenticated: false,
            is_super_admin: false,
            is_loading: true,
        }
    }

    pub const fn signed_out() -> Self {
        Self {
            is_authenticated: false,
            is_super_admin: false,
            is_loading: false,
        }
    }

    pub const fn signed_in(is_super_admin: bool) -> Self {
        Self {
            is_authenticated: true,
            is_super_admin,
            is_loading: false,
        }
    }
}
