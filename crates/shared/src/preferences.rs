//! Persisted tenant preference
//!
//! Remembers the last-selected tenant per owner (a session subject) across
//! sessions. Storage is injected through [`PreferenceStore`] so the selection
//! logic never touches ambient global state.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::directory::TenantDirectory;
use crate::types::{Tenant, TenantId};

/// Errors raised by preference storage
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("Preference storage I/O failed: {0}")]
    Io(String),

    #[error("Preference file is corrupt: {0}")]
    Corrupt(String),

    #[error("Unknown tenant: {0}")]
    UnknownTenant(String),
}

/// Read/write interface for the persisted "current tenant" preference
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn load(&self, owner: &str) -> Result<Option<TenantId>, PreferenceError>;

    async fn save(&self, owner: &str, tenant_id: TenantId) -> Result<(), PreferenceError>;

    /// Verify the backing storage is readable
    async fn check(&self) -> Result<(), PreferenceError>;
}

/// In-memory store, lost on restart
#[derive(Default)]
pub struct MemoryPreferenceStore {
    entries: RwLock<HashMap<String, TenantId>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn load(&self, owner: &str) -> Result<Option<TenantId>, PreferenceError> {
        Ok(self.entries.read().await.get(owner).copied())
    }

    async fn save(&self, owner: &str, tenant_id: TenantId) -> Result<(), PreferenceError> {
        self.entries
            .write()
            .await
            .insert(owner.to_string(), tenant_id);
        Ok(())
    }

    async fn check(&self) -> Result<(), PreferenceError> {
        Ok(())
    }
}

/// JSON file store: `{ "<owner>": "<tenant uuid>", ... }`
///
/// Writes go to a sibling temp file and are renamed into place, so a crash
/// mid-write leaves the previous file intact. The lock serializes writers
/// within this process.
pub struct FilePreferenceStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<HashMap<String, TenantId>, PreferenceError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| PreferenceError::Corrupt(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(PreferenceError::Io(e.to_string())),
        }
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn load(&self, owner: &str) -> Result<Option<TenantId>, PreferenceError> {
        let _guard = self.lock.read().await;
        Ok(self.read_all().await?.get(owner).copied())
    }

    async fn save(&self, owner: &str, tenant_id: TenantId) -> Result<(), PreferenceError> {
        let _guard = self.lock.write().await;
        let mut entries = self.read_all().await?;
        entries.insert(owner.to_string(), tenant_id);

        let json = serde_json::to_vec_pretty(&entries)
            .map_err(|e| PreferenceError::Io(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| PreferenceError::Io(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| PreferenceError::Io(e.to_string()))?;
        Ok(())
    }

    async fn check(&self) -> Result<(), PreferenceError> {
        let _guard = self.lock.read().await;
        self.read_all().await.map(|_| ())
    }
}

/// Current-tenant selection backed by a directory and a preference store
#[derive(Clone)]
pub struct TenantPreferences {
    directory: Arc<TenantDirectory>,
    store: Arc<dyn PreferenceStore>,
}

impl TenantPreferences {
    pub fn new(directory: Arc<TenantDirectory>, store: Arc<dyn PreferenceStore>) -> Self {
        Self { directory, store }
    }

    /// The owner's current tenant.
    ///
    /// Falls back to the directory default when nothing is stored, the stored
    /// tenant no longer exists, or the store cannot be read. Exactly one
    /// tenant is always current.
    pub async fn current(&self, owner: &str) -> &Tenant {
        let stored = match self.store.load(owner).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(owner = %owner, error = %e, "Failed to read tenant preference");
                None
            }
        };

        stored
            .and_then(|id| self.directory.find_by_id(id))
            .unwrap_or_else(|| self.directory.default_tenant())
    }

    /// Whether the preference store can be read
    pub async fn check(&self) -> Result<(), PreferenceError> {
        self.store.check().await
    }

    /// Make `slug` the owner's current tenant and persist the choice
    pub async fn select(&self, owner: &str, slug: &str) -> Result<&Tenant, PreferenceError> {
        let tenant = self
            .directory
            .find_by_slug(slug)
            .ok_or_else(|| PreferenceError::UnknownTenant(slug.to_string()))?;

        self.store.save(owner, tenant.id).await?;
        tracing::info!(owner = %owner, tenant = %tenant.slug, "Current tenant selected");
        Ok(tenant)
    }
}
