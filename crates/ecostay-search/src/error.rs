use ecostay_core::QueryError;
use ecostay_geocode::GeocodeError;
use ecostay_inventory::InventoryError;
use thiserror::Error;

/// Terminal failures of one search. None are retried.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search: {0}")]
    InvalidQuery(#[from] QueryError),

    #[error("configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("location not found: '{destination}'")]
    NotFound { destination: String },

    #[error("{service} request failed: {message}")]
    Upstream {
        service: &'static str,
        message: String,
    },

    #[error("certification registry unavailable: {0}")]
    Registry(String),
}

impl SearchError {
    /// Short machine-readable kind, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::InvalidQuery(_) => "invalid_query",
            SearchError::ConfigurationMissing(_) => "configuration_missing",
            SearchError::NotFound { .. } => "not_found",
            SearchError::Upstream { .. } => "upstream_error",
            SearchError::Registry(_) => "registry_error",
        }
    }
}

impl From<GeocodeError> for SearchError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::MissingApiKey { .. } => SearchError::ConfigurationMissing(err.to_string()),
            GeocodeError::NotFound { destination } => SearchError::NotFound { destination },
            GeocodeError::EmptyDestination => SearchError::InvalidQuery(QueryError::EmptyDestination),
            GeocodeError::InvalidBaseUrl { .. } => {
                SearchError::ConfigurationMissing(err.to_string())
            }
            GeocodeError::Rejected { .. }
            | GeocodeError::UnexpectedStatus { .. }
            | GeocodeError::Http(_)
            | GeocodeError::Deserialize { .. } => SearchError::Upstream {
                service: "geocoding",
                message: err.to_string(),
            },
        }
    }
}

impl From<InventoryError> for SearchError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::MissingApiKey | InventoryError::InvalidBaseUrl { .. } => {
                SearchError::ConfigurationMissing(err.to_string())
            }
            InventoryError::InvertedDates {
                check_in,
                check_out,
            } => SearchError::InvalidQuery(QueryError::InvertedDates {
                check_in,
                check_out,
            }),
            InventoryError::Http(_)
            | InventoryError::Rejected { .. }
            | InventoryError::UnexpectedStatus { .. }
            | InventoryError::Deserialize { .. }
            | InventoryError::Normalization { .. } => SearchError::Upstream {
                service: "inventory",
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecostay_core::GeocodingProvider;

    #[test]
    fn geocode_errors_map_onto_taxonomy() {
        let missing: SearchError = GeocodeError::MissingApiKey {
            provider: GeocodingProvider::Mapbox,
        }
        .into();
        assert_eq!(missing.kind(), "configuration_missing");

        let not_found: SearchError = GeocodeError::NotFound {
            destination: "Atlantis".to_string(),
        }
        .into();
        assert!(matches!(not_found, SearchError::NotFound { ref destination } if destination == "Atlantis"));

        let rejected: SearchError = GeocodeError::Rejected {
            provider: GeocodingProvider::ApiNinjas,
            status: 403,
        }
        .into();
        assert_eq!(rejected.kind(), "upstream_error");
    }

    #[test]
    fn inventory_errors_map_onto_taxonomy() {
        let missing: SearchError = InventoryError::MissingApiKey.into();
        assert_eq!(missing.kind(), "configuration_missing");

        let malformed: SearchError = InventoryError::Normalization {
            index: 0,
            reason: "hotel has no id".to_string(),
        }
        .into();
        assert!(matches!(malformed, SearchError::Upstream { service: "inventory", .. }));
    }
}
