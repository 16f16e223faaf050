use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("no API key configured for the inventory provider")]
    MissingApiKey,

    #[error("checkout {check_out} must be after checkin {check_in}")]
    InvertedDates {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("inventory provider rejected the API key (HTTP {status})")]
    Rejected { status: u16 },

    #[error("unexpected HTTP status {status} from inventory provider")]
    UnexpectedStatus { status: u16 },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed hotel at index {index}: {reason}")]
    Normalization { index: usize, reason: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
