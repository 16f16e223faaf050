use crate::app_config::{AppConfig, Environment, GeocodingProvider, ProviderSettings};
use crate::ConfigError;

const DEFAULT_INVENTORY_BASE_URL: &str = "https://api.tripadvisor.com/api/v1/";
const DEFAULT_MAPBOX_BASE_URL: &str = "https://api.mapbox.com/";
const DEFAULT_NINJAS_BASE_URL: &str = "https://api.api-ninjas.com/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Provider credentials are optional here: a missing key is reported per
/// search request, not at startup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    // Blank values are treated the same as unset ones.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = optional("DATABASE_URL");
    let env = parse_environment(&or_default("ECOSTAY_ENV", "development"));

    let bind_addr = or_default("ECOSTAY_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("ECOSTAY_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("ECOSTAY_LOG_LEVEL", "info");
    let registry_path = PathBuf::from(or_default(
        "ECOSTAY_REGISTRY_PATH",
        "./config/certified_hotels.yaml",
    ));

    let geocoding_provider = or_default("GEOCODING_PROVIDER", "mapbox")
        .parse::<GeocodingProvider>()
        .map_err(|reason| invalid("GEOCODING_PROVIDER", reason))?;

    let http_timeout_secs = parse_u64("ECOSTAY_HTTP_TIMEOUT_SECS", "15")?;
    if http_timeout_secs == 0 {
        return Err(invalid(
            "ECOSTAY_HTTP_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let providers = ProviderSettings {
        geocoding_provider,
        geocoding_api_key: optional("GEOCODING_API_KEY"),
        inventory_api_key: optional("INVENTORY_API_KEY")
            .or_else(|| optional("TRIPADVISOR_API_KEY")),
        inventory_base_url: or_default("ECOSTAY_INVENTORY_BASE_URL", DEFAULT_INVENTORY_BASE_URL),
        mapbox_base_url: or_default("ECOSTAY_MAPBOX_BASE_URL", DEFAULT_MAPBOX_BASE_URL),
        ninjas_base_url: or_default("ECOSTAY_NINJAS_BASE_URL", DEFAULT_NINJAS_BASE_URL),
        http_timeout_secs,
        http_user_agent: or_default("ECOSTAY_HTTP_USER_AGENT", "ecostay/0.1 (hotel-search)"),
    };

    // Production requires provider credentials at startup.
    if env == Environment::Production {
        if providers.geocoding_api_key.is_none() {
            return Err(ConfigError::MissingEnvVar("GEOCODING_API_KEY".to_string()));
        }
        if providers.inventory_api_key.is_none() {
            return Err(ConfigError::MissingEnvVar("INVENTORY_API_KEY".to_string()));
        }
    }

    let db_max_connections = parse_u32("ECOSTAY_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("ECOSTAY_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("ECOSTAY_DB_ACQUIRE_TIMEOUT_SECS", "10")?;
    let rate_limit_per_minute = parse_usize("ECOSTAY_RATE_LIMIT_PER_MINUTE", "120")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        registry_path,
        providers,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
