//! Geocoding adapter: resolves a free-text destination to a single best-match
//! coordinate pair using one of two interchangeable backends.

pub mod error;
mod http;
pub mod mapbox;
pub mod ninjas;

use async_trait::async_trait;
use ecostay_core::{Coordinates, GeocodingProvider, ProviderSettings};
use reqwest::Client;

pub use error::GeocodeError;
pub use mapbox::MapboxGeocoder;
pub use ninjas::NinjasGeocoder;

/// Resolves a destination string to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Which backend this geocoder talks to.
    fn provider(&self) -> GeocodingProvider;

    /// Returns the single best match for `destination`.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::NotFound`] when the backend has zero matches.
    /// - [`GeocodeError::Rejected`] / [`GeocodeError::UnexpectedStatus`] on a
    ///   non-success response.
    /// - [`GeocodeError::Http`] / [`GeocodeError::Deserialize`] on transport or
    ///   payload failures.
    async fn geocode(&self, destination: &str) -> Result<Coordinates, GeocodeError>;
}

/// Builds the geocoder selected by `settings`, sharing `client` for transport.
///
/// # Errors
///
/// Returns [`GeocodeError::MissingApiKey`] when the selected backend has no
/// credential, or [`GeocodeError::InvalidBaseUrl`] for a malformed base URL.
pub fn build_geocoder(
    settings: &ProviderSettings,
    client: Client,
) -> Result<Box<dyn Geocoder>, GeocodeError> {
    let provider = settings.geocoding_provider;
    let api_key = settings
        .geocoding_api_key
        .as_deref()
        .ok_or(GeocodeError::MissingApiKey { provider })?;
    let base_url = settings.geocoding_base_url();

    let geocoder: Box<dyn Geocoder> = match provider {
        GeocodingProvider::Mapbox => {
            Box::new(MapboxGeocoder::with_client(client, api_key, base_url)?)
        }
        GeocodingProvider::ApiNinjas => {
            Box::new(NinjasGeocoder::with_client(client, api_key, base_url)?)
        }
    };
    Ok(geocoder)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(provider: GeocodingProvider, key: Option<&str>) -> ProviderSettings {
        ProviderSettings {
            geocoding_provider: provider,
            geocoding_api_key: key.map(str::to_owned),
            inventory_api_key: None,
            inventory_base_url: "https://inventory.example.com/".to_string(),
            mapbox_base_url: "https://mapbox.example.com/".to_string(),
            ninjas_base_url: "https://ninjas.example.com/".to_string(),
            http_timeout_secs: 5,
            http_user_agent: "ecostay-test".to_string(),
        }
    }

    #[test]
    fn build_geocoder_requires_api_key() {
        let result = build_geocoder(&settings(GeocodingProvider::Mapbox, None), Client::new());
        assert!(matches!(
            result,
            Err(GeocodeError::MissingApiKey {
                provider: GeocodingProvider::Mapbox
            })
        ));
    }

    #[test]
    fn build_geocoder_picks_selected_provider() {
        let mapbox =
            build_geocoder(&settings(GeocodingProvider::Mapbox, Some("k")), Client::new()).unwrap();
        assert_eq!(mapbox.provider(), GeocodingProvider::Mapbox);

        let ninjas = build_geocoder(
            &settings(GeocodingProvider::ApiNinjas, Some("k")),
            Client::new(),
        )
        .unwrap();
        assert_eq!(ninjas.provider(), GeocodingProvider::ApiNinjas);
    }
}
