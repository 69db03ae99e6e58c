//! Shared application state

use salonsuite_shared::{
    DirectoryError, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, TenantDirectory,
    TenantPreferences,
};
use std::sync::Arc;

use crate::auth::SessionManager;
use crate::config::Config;
use crate::gate::SessionGate;
use crate::routing::{HostResolveError, HostResolver};

/// State shared by every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub resolver: Arc<HostResolver>,
    pub directory: Arc<TenantDirectory>,
    pub preferences: TenantPreferences,
    pub sessions: Arc<SessionManager>,
    pub gate: Arc<SessionGate>,
}

impl AppState {
    /// Build state from configuration, loading the tenant fixture and
    /// preference store it names
    pub fn from_config(config: Config) -> Result<Self, StateError> {
        let directory = match &config.tenant_fixture_path {
            Some(path) => TenantDirectory::from_file(path)?,
            None => {
                tracing::info!("TENANT_FIXTURE_PATH not set, using built-in tenants");
                TenantDirectory::builtin()
            }
        };

        let store: Arc<dyn PreferenceStore> = match &config.preference_store_path {
            Some(path) => {
                tracing::info!(path = %path, "Persisting tenant preferences to file");
                Arc::new(FilePreferenceStore::new(path))
            }
            None => Arc::new(MemoryPreferenceStore::new()),
        };

        Self::new(config, directory, store)
    }

    /// Build state from explicit collaborators
    pub fn new(
        config: Config,
        directory: TenantDirectory,
        store: Arc<dyn PreferenceStore>,
    ) -> Result<Self, StateError> {
        let resolver = HostResolver::with_dev_port(&config.root_domain, &config.dev_port_suffix)?;
        let directory = Arc::new(directory);
        let sessions = SessionManager::new(&config.session_jwt_secret, config.session_expiry_hours);
        let gate = SessionGate::new(
            config.login_route.clone(),
            config.landing_route.clone(),
            config.super_admin_prefixes.clone(),
        );

        Ok(Self {
            preferences: TenantPreferences::new(Arc::clone(&directory), store),
            resolver: Arc::new(resolver),
            directory,
            sessions: Arc::new(sessions),
            gate: Arc::new(gate),
            config: Arc::new(config),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Tenant directory error: {0}")]
    Directory(#[from] DirectoryError),
    #[error("Host resolver error: {0}")]
    Resolver(#[from] HostResolveError),
}
