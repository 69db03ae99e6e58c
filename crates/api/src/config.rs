//! Application configuration

use std::env;

/// Longest accepted session lifetime (one year)
pub const MAX_SESSION_EXPIRY_HOURS: i64 = 24 * 365;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,
    pub root_domain: String, // e.g., "example.com" for *.example.com tenant routing
    pub dev_port_suffix: String,

    // Session
    pub session_jwt_secret: String,
    pub session_expiry_hours: i64,

    // Session gate routes
    pub login_route: String,
    pub landing_route: String,
    pub super_admin_prefixes: Vec<String>,

    // Tenants
    pub tenant_fixture_path: Option<String>,
    pub preference_store_path: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Server
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            root_domain: {
                let domain = env::var("ROOT_DOMAIN")
                    .map_err(|_| ConfigError::Missing("ROOT_DOMAIN"))?
                    .trim()
                    .trim_start_matches('.')
                    .to_lowercase();
                if domain.is_empty() {
                    return Err(ConfigError::Invalid("ROOT_DOMAIN must not be empty"));
                }
                if domain.contains(':') || domain.contains('/') {
                    return Err(ConfigError::Invalid(
                        "ROOT_DOMAIN must be a bare domain without port or path",
                    ));
                }
                domain
            },
            dev_port_suffix: env::var("DEV_PORT_SUFFIX").unwrap_or_else(|_| ":3000".to_string()),

            // Session
            session_jwt_secret: {
                let secret = env::var("SESSION_JWT_SECRET")
                    .map_err(|_| ConfigError::Missing("SESSION_JWT_SECRET"))?;
                if secret.len() < 32 {
                    return Err(ConfigError::WeakSecret(
                        "SESSION_JWT_SECRET must be at least 32 characters",
                    ));
                }
                secret
            },
            session_expiry_hours: session_expiry_hours()?,

            // Session gate routes
            login_route: route_var("LOGIN_ROUTE", "/login")?,
            landing_route: route_var("LANDING_ROUTE", "/dashboard")?,
            super_admin_prefixes: {
                let raw = env::var("SUPER_ADMIN_PREFIXES")
                    .unwrap_or_else(|_| "/super-admin".to_string());
                let prefixes: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect();
                if prefixes.iter().any(|p| !p.starts_with('/')) {
                    return Err(ConfigError::Invalid(
                        "SUPER_ADMIN_PREFIXES entries must start with '/'",
                    ));
                }
                prefixes
            },

            // Tenants
            tenant_fixture_path: env::var("TENANT_FIXTURE_PATH").ok(),
            preference_store_path: env::var("PREFERENCE_STORE_PATH").ok(),
        })
    }
}

/// `SESSION_EXPIRY_HOURS`, default 24. Must be between 1 and
/// [`MAX_SESSION_EXPIRY_HOURS`].
pub fn session_expiry_hours() -> Result<i64, ConfigError> {
    let hours: i64 = env::var("SESSION_EXPIRY_HOURS")
        .unwrap_or_else(|_| "24".to_string())
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid("SESSION_EXPIRY_HOURS must be a whole number of hours"))?;
    if !(1..=MAX_SESSION_EXPIRY_HOURS).contains(&hours) {
        return Err(ConfigError::Invalid(
            "SESSION_EXPIRY_HOURS must be between 1 and 8760",
        ));
    }
    Ok(hours)
}

fn route_var(name: &'static str, default: &str) -> Result<String, ConfigError> {
    let route = env::var(name).unwrap_or_else(|_| default.to_string());
    if !route.starts_with('/') {
        return Err(ConfigError::InvalidRoute(name));
    }
    Ok(route)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("{0} must be an absolute path starting with '/'")]
    InvalidRoute(&'static str),
    #[error("Weak secret: {0}")]
    WeakSecret(&'static str),
}
