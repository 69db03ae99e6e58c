//! Tenant directory
//!
//! Ordered, read-only list of tenants. The first entry is the default tenant.
//! Loaded from a JSON fixture file or from the built-in fixture set.

use std::collections::HashSet;
use std::path::Path;

use crate::types::{Branding, Tenant, TenantId, TenantSlug, RESERVED_SLUGS};

/// Errors raised while building a tenant directory
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Tenant directory is empty")]
    Empty,

    #[error("Duplicate tenant slug: {0}")]
    DuplicateSlug(String),

    #[error("Reserved tenant slug: {0}")]
    ReservedSlug(String),

    #[error("Duplicate tenant id: {0}")]
    DuplicateId(TenantId),

    #[error("Failed to read fixture {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid fixture: {0}")]
    Parse(String),
}

/// Ordered list of tenants with unique slugs
#[derive(Debug, Clone)]
pub struct TenantDirectory {
    tenants: Vec<Tenant>,
}

impl TenantDirectory {
    /// Build a directory, rejecting empty lists, reserved slugs and duplicate
    /// slugs or ids
    pub fn new(tenants: Vec<Tenant>) -> Result<Self, DirectoryError> {
        if tenants.is_empty() {
            return Err(DirectoryError::Empty);
        }

        let mut slugs = HashSet::new();
        let mut ids = HashSet::new();
        for tenant in &tenants {
            if RESERVED_SLUGS.contains(&tenant.slug.as_str()) {
                return Err(DirectoryError::ReservedSlug(tenant.slug.to_string()));
            }
            if !slugs.insert(tenant.slug.as_str()) {
                return Err(DirectoryError::DuplicateSlug(tenant.slug.to_string()));
            }
            if !ids.insert(tenant.id) {
                return Err(DirectoryError::DuplicateId(tenant.id));
            }
        }

        Ok(Self { tenants })
    }

    /// Parse a JSON array of tenants
    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        let tenants: Vec<Tenant> =
            serde_json::from_str(json).map_err(|e| DirectoryError::Parse(e.to_string()))?;
        Self::new(tenants)
    }

    /// Load a JSON fixture file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| DirectoryError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let directory = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            tenants = directory.len(),
            "Loaded tenant fixture"
        );
        Ok(directory)
    }

    /// Built-in demo tenants
    pub fn builtin() -> Self {
        Self {
            tenants: builtin_tenants(),
        }
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&Tenant> {
        self.tenants.iter().find(|t| t.slug.as_str() == slug)
    }

    pub fn find_by_id(&self, id: TenantId) -> Option<&Tenant> {
        self.tenants.iter().find(|t| t.id == id)
    }

    /// The default tenant (index 0)
    pub fn default_tenant(&self) -> &Tenant {
        // Non-empty is checked in `new`; `builtin` is never empty
        &self.tenants[0]
    }

    pub fn all(&self) -> &[Tenant] {
        &self.tenants
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }
}

fn builtin_tenant(
    id: u128,
    name: &str,
    slug: &'static str,
    primary: &str,
    secondary: &str,
) -> Tenant {
    Tenant {
        id: TenantId(uuid::Uuid::from_u128(id)),
        name: name.to_string(),
        slug: TenantSlug::from_static(slug),
        branding: Branding {
            primary_color: primary.to_string(),
            secondary_color: secondary.to_string(),
        },
        custom_domain: None,
    }
}

fn builtin_tenants() -> Vec<Tenant> {
    vec![
        builtin_tenant(1, "Beleza Pura", "beleza-pura", "#d94f8a", "#f7d6e6"),
        builtin_tenant(2, "Studio Lux", "studio-lux", "#2f3e9e", "#c9d1f5"),
        builtin_tenant(3, "Serenity Spa", "serenity-spa", "#2e8b6f", "#d4f0e6"),
    ]
}
