//! SalonSuite Shared Types and Utilities
//!
//! This crate contains the tenant model, the tenant directory and the
//! persisted tenant preference store shared across the SalonSuite services.

pub mod directory;
pub mod error;
pub mod preferences;
pub mod types;

pub use directory::*;
pub use error::*;
pub use preferences::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceError, PreferenceStore,
    TenantPreferences,
};
pub use types::*;
