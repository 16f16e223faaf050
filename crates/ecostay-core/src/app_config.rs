use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// The two supported geocoding backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeocodingProvider {
    #[default]
    Mapbox,
    ApiNinjas,
}

impl std::fmt::Display for GeocodingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeocodingProvider::Mapbox => write!(f, "mapbox"),
            GeocodingProvider::ApiNinjas => write!(f, "api-ninjas"),
        }
    }
}

impl FromStr for GeocodingProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mapbox" => Ok(GeocodingProvider::Mapbox),
            "api-ninjas" | "api_ninjas" | "ninjas" => Ok(GeocodingProvider::ApiNinjas),
            other => Err(format!(
                "unknown geocoding provider '{other}'; expected 'mapbox' or 'api-ninjas'"
            )),
        }
    }
}

/// Credentials and endpoints for the external providers used by one search.
///
/// Built once from the environment and handed to the search pipeline
/// explicitly; nothing downstream reads process-wide state.
#[derive(Clone)]
pub struct ProviderSettings {
    pub geocoding_provider: GeocodingProvider,
    pub geocoding_api_key: Option<String>,
    pub inventory_api_key: Option<String>,
    pub inventory_base_url: String,
    pub mapbox_base_url: String,
    pub ninjas_base_url: String,
    pub http_timeout_secs: u64,
    pub http_user_agent: String,
}

impl ProviderSettings {
    /// Base URL of whichever geocoding backend is selected.
    #[must_use]
    pub fn geocoding_base_url(&self) -> &str {
        match self.geocoding_provider {
            GeocodingProvider::Mapbox => &self.mapbox_base_url,
            GeocodingProvider::ApiNinjas => &self.ninjas_base_url,
        }
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("geocoding_provider", &self.geocoding_provider)
            .field(
                "geocoding_api_key",
                &self.geocoding_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "inventory_api_key",
                &self.inventory_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("inventory_base_url", &self.inventory_base_url)
            .field("mapbox_base_url", &self.mapbox_base_url)
            .field("ninjas_base_url", &self.ninjas_base_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("http_user_agent", &self.http_user_agent)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub registry_path: PathBuf,
    pub providers: ProviderSettings,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub rate_limit_per_minute: usize,
}

impl AppConfig {
    /// Returns the database URL or fails for commands that cannot run without one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `DATABASE_URL` is unset.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("registry_path", &self.registry_path)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("providers", &self.providers)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}
