//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PLATEPALETTE_BACKEND_URL` - Recipe backend API root (default: `http://localhost:1111/api`)
//! - `PLATEPALETTE_AUTH_ENTITY` - Authenticable collection slug (default: users)
//! - `PLATEPALETTE_PROBE_TIMEOUT_MS` - Connectivity probe timeout (default: 5000)
//! - `PLATEPALETTE_REQUEST_TIMEOUT_MS` - Per-request timeout for backend calls (default: 15000)
//! - `PLATEPALETTE_FEATURED_LIMIT` - Recipes on the public feed (default: 6, max 50)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_BACKEND_URL: &str = "http://localhost:1111/api";
const DEFAULT_AUTH_ENTITY: &str = "users";
const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_FEATURED_LIMIT: u32 = 6;
const MAX_FEATURED_LIMIT: u32 = 50;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// PlatePalette client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Recipe backend connection settings
    pub backend: BackendConfig,
    /// Number of recipes on the public "latest creations" feed
    pub featured_limit: u32,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Recipe backend connection settings.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// API root, e.g. `http://localhost:1111/api`
    pub base_url: Url,
    /// Slug of the authenticable collection used for login and `me`
    pub auth_entity: String,
    /// Upper bound for the connectivity probe
    pub probe_timeout: Duration,
    /// Upper bound for every other backend request
    pub request_timeout: Duration,
}

/// Settings the orchestration services need, independent of transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    pub probe_timeout: Duration,
    pub featured_limit: u32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            featured_limit: DEFAULT_FEATURED_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = parse_backend_url(&get_env_or_default(
            &lookup,
            "PLATEPALETTE_BACKEND_URL",
            DEFAULT_BACKEND_URL,
        ))?;
        let auth_entity =
            get_env_or_default(&lookup, "PLATEPALETTE_AUTH_ENTITY", DEFAULT_AUTH_ENTITY);
        if auth_entity.is_empty() || auth_entity.contains('/') {
            return Err(ConfigError::InvalidEnvVar(
                "PLATEPALETTE_AUTH_ENTITY".to_string(),
                format!("not a collection slug: {auth_entity:?}"),
            ));
        }

        let probe_timeout = get_duration_ms(
            &lookup,
            "PLATEPALETTE_PROBE_TIMEOUT_MS",
            DEFAULT_PROBE_TIMEOUT_MS,
        )?;
        let request_timeout = get_duration_ms(
            &lookup,
            "PLATEPALETTE_REQUEST_TIMEOUT_MS",
            DEFAULT_REQUEST_TIMEOUT_MS,
        )?;

        let featured_limit = get_env_or_default(
            &lookup,
            "PLATEPALETTE_FEATURED_LIMIT",
            &DEFAULT_FEATURED_LIMIT.to_string(),
        )
        .parse::<u32>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("PLATEPALETTE_FEATURED_LIMIT".to_string(), e.to_string())
        })?;
        if !(1..=MAX_FEATURED_LIMIT).contains(&featured_limit) {
            return Err(ConfigError::InvalidEnvVar(
                "PLATEPALETTE_FEATURED_LIMIT".to_string(),
                format!("must be between 1 and {MAX_FEATURED_LIMIT} (got {featured_limit})"),
            ));
        }

        Ok(Self {
            backend: BackendConfig {
                base_url,
                auth_entity,
                probe_timeout,
                request_timeout,
            },
            featured_limit,
            sentry_dsn: get_optional_env(&lookup, "SENTRY_DSN"),
            sentry_environment: get_optional_env(&lookup, "SENTRY_ENVIRONMENT"),
        })
    }

    /// Settings handed to the orchestration services.
    #[must_use]
    pub const fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            probe_timeout: self.backend.probe_timeout,
            featured_limit: self.featured_limit,
        }
    }

    /// The backend's admin panel: the API root without its trailing `/api`.
    #[must_use]
    pub fn admin_panel_url(&self) -> Url {
        let mut url = self.backend.base_url.clone();
        let path = url.path().trim_end_matches('/').to_owned();
        let panel = path.strip_suffix("/api").unwrap_or(&path);
        url.set_path(if panel.is_empty() { "/" } else { panel });
        url
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating empty values as unset.
fn get_optional_env<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Get a variable with a default value.
fn get_env_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

/// Get a non-zero millisecond duration.
fn get_duration_ms<F>(lookup: &F, key: &str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let millis = get_env_or_default(lookup, key, &default.to_string())
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if millis == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_millis(millis))
}

/// Parse and validate the backend API root.
fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| {
        ConfigError::InvalidEnvVar("PLATEPALETTE_BACKEND_URL".to_string(), e.to_string())
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "PLATEPALETTE_BACKEND_URL".to_string(),
            format!("unsupported scheme: {}", url.scheme()),
        ));
    }
    Ok(url)
}
