use ecostay_core::GeocodingProvider;
use thiserror::Error;

/// Errors returned by the geocoding backends.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// No credential was configured for the selected backend.
    #[error("no API key configured for geocoding provider {provider}")]
    MissingApiKey { provider: GeocodingProvider },

    #[error("destination must be non-empty")]
    EmptyDestination,

    /// The backend answered successfully but had no match for the text.
    #[error("location not found: '{destination}'")]
    NotFound { destination: String },

    /// The backend refused the credential (HTTP 401/403).
    #[error("{provider} rejected the API key (HTTP {status})")]
    Rejected {
        provider: GeocodingProvider,
        status: u16,
    },

    #[error("unexpected HTTP status {status} from {provider}")]
    UnexpectedStatus {
        provider: GeocodingProvider,
        status: u16,
    },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
