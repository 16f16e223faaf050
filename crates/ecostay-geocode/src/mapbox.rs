//! Mapbox forward geocoding (`mapbox.places`).

use std::time::Duration;

use async_trait::async_trait;
use ecostay_core::{Coordinates, GeocodingProvider};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::GeocodeError;
use crate::http::{parse_base_url, send_json};
use crate::Geocoder;

/// Characters left unescaped by `encodeURIComponent`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    /// `[longitude, latitude]`
    center: [f64; 2],
    #[serde(default)]
    place_name: Option<String>,
}

pub struct MapboxGeocoder {
    client: Client,
    access_token: String,
    base_url: Url,
}

impl MapboxGeocoder {
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`GeocodeError::InvalidBaseUrl`] for a malformed `base_url`.
    pub fn new(
        access_token: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Self::with_client(client, access_token, base_url)
    }

    /// # Errors
    ///
    /// Returns [`GeocodeError::InvalidBaseUrl`] for a malformed `base_url`.
    pub fn with_client(
        client: Client,
        access_token: &str,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            base_url: parse_base_url(base_url)?,
        })
    }

    fn places_url(&self, destination: &str) -> Result<Url, GeocodeError> {
        let encoded = utf8_percent_encode(destination, PATH_SEGMENT);
        let mut url = self
            .base_url
            .join(&format!("geocoding/v5/mapbox.places/{encoded}.json"))
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token)
            .append_pair("limit", "1");
        Ok(url)
    }
}

#[async_trait]
impl Geocoder for MapboxGeocoder {
    fn provider(&self) -> GeocodingProvider {
        GeocodingProvider::Mapbox
    }

    async fn geocode(&self, destination: &str) -> Result<Coordinates, GeocodeError> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(GeocodeError::EmptyDestination);
        }

        let url = self.places_url(destination)?;
        let response: PlacesResponse = send_json(
            self.client.get(url),
            GeocodingProvider::Mapbox,
            &format!("mapbox.places({destination})"),
        )
        .await?;

        let feature = response
            .features
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound {
                destination: destination.to_owned(),
            })?;

        let [longitude, latitude] = feature.center;
        tracing::debug!(
            destination,
            place = feature.place_name.as_deref().unwrap_or(""),
            latitude,
            longitude,
            "mapbox geocode resolved"
        );
        Ok(Coordinates {
            latitude,
            longitude,
        })
    }
}
