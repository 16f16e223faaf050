//! Shared domain types and configuration for the eco-certified hotel search service.

pub mod app_config;
pub mod config;
pub mod hotels;
pub mod query;
pub mod registry_file;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, GeocodingProvider, ProviderSettings};
pub use config::{load_app_config, load_app_config_from_env};
pub use hotels::{CanonicalHotel, CertificationLevel, CertificationRecord, Coordinates, RawListing};
pub use query::{FilterCriteria, PriceRange, QueryError, SearchQuery, SearchRequest};
pub use registry_file::{load_registry_file, parse_registry, RegistryFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read registry file {path}: {source}")]
    RegistryFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse registry file: {0}")]
    RegistryFileParse(#[from] serde_yaml::Error),

    #[error("registry validation failed: {0}")]
    Validation(String),
}
