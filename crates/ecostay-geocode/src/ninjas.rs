//! API Ninjas geocoding (`/v1/geocoding?city=`).

use std::time::Duration;

use async_trait::async_trait;
use ecostay_core::{Coordinates, GeocodingProvider};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::GeocodeError;
use crate::http::{parse_base_url, send_json};
use crate::Geocoder;

#[derive(Debug, Deserialize)]
struct Place {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

pub struct NinjasGeocoder {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl NinjasGeocoder {
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`GeocodeError::InvalidBaseUrl`] for a malformed `base_url`.
    pub fn new(
        api_key: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Self::with_client(client, api_key, base_url)
    }

    /// # Errors
    ///
    /// Returns [`GeocodeError::InvalidBaseUrl`] for a malformed `base_url`.
    pub fn with_client(client: Client, api_key: &str, base_url: &str) -> Result<Self, GeocodeError> {
        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parse_base_url(base_url)?,
        })
    }

    fn geocoding_url(&self, destination: &str) -> Result<Url, GeocodeError> {
        let mut url = self
            .base_url
            .join("v1/geocoding")
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut().append_pair("city", destination);
        Ok(url)
    }
}

#[async_trait]
impl Geocoder for NinjasGeocoder {
    fn provider(&self) -> GeocodingProvider {
        GeocodingProvider::ApiNinjas
    }

    async fn geocode(&self, destination: &str) -> Result<Coordinates, GeocodeError> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(GeocodeError::EmptyDestination);
        }

        let url = self.geocoding_url(destination)?;
        let request = self.client.get(url).header("X-Api-Key", &self.api_key);
        let places: Vec<Place> = send_json(
            request,
            GeocodingProvider::ApiNinjas,
            &format!("api-ninjas geocoding({destination})"),
        )
        .await?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound {
                destination: destination.to_owned(),
            })?;

        tracing::debug!(
            destination,
            name = place.name.as_deref().unwrap_or(""),
            country = place.country.as_deref().unwrap_or(""),
            latitude = place.latitude,
            longitude = place.longitude,
            "api-ninjas geocode resolved"
        );
        Ok(Coordinates {
            latitude: place.latitude,
            longitude: place.longitude,
        })
    }
}
