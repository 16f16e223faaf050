//! HTTP client for the inventory provider's hotel search endpoint.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use ecostay_core::{Coordinates, RawListing};
use reqwest::{Client, StatusCode, Url};

use crate::error::InventoryError;
use crate::normalize::normalize_hotel;
use crate::types::HotelSearchResponse;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lists hotels near a coordinate pair for a stay window.
#[async_trait]
pub trait HotelInventory: Send + Sync {
    /// Returns the provider's listings in the provider's ranking order.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError`] on an inverted date range, a non-success
    /// response, or a malformed payload. Zero listings is not an error.
    async fn search(
        &self,
        coords: Coordinates,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<RawListing>, InventoryError>;
}

/// Client for the provider's `hotels/search` endpoint.
///
/// Use [`InventoryClient::new`] with its own connection pool or
/// [`InventoryClient::with_client`] to share one.
pub struct InventoryClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl InventoryClient {
    /// # Errors
    ///
    /// Returns [`InventoryError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`InventoryError::InvalidBaseUrl`] for a malformed `base_url`.
    pub fn new(
        api_key: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, InventoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Self::with_client(client, api_key, base_url)
    }

    /// # Errors
    ///
    /// Returns [`InventoryError::MissingApiKey`] for a blank key, or
    /// [`InventoryError::InvalidBaseUrl`] for a malformed `base_url`.
    pub fn with_client(
        client: Client,
        api_key: &str,
        base_url: &str,
    ) -> Result<Self, InventoryError> {
        if api_key.trim().is_empty() {
            return Err(InventoryError::MissingApiKey);
        }

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| InventoryError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    fn search_url(
        &self,
        coords: Coordinates,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Url, InventoryError> {
        let mut url =
            self.base_url
                .join("hotels/search")
                .map_err(|e| InventoryError::InvalidBaseUrl {
                    base_url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;
        url.query_pairs_mut()
            .append_pair("latitude", &coords.latitude.to_string())
            .append_pair("longitude", &coords.longitude.to_string())
            .append_pair("checkin", &check_in.format(DATE_FORMAT).to_string())
            .append_pair("checkout", &check_out.format(DATE_FORMAT).to_string())
            .append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl HotelInventory for InventoryClient {
    async fn search(
        &self,
        coords: Coordinates,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<RawListing>, InventoryError> {
        if check_out <= check_in {
            return Err(InventoryError::InvertedDates {
                check_in,
                check_out,
            });
        }

        let url = self.search_url(coords, check_in, check_out)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(InventoryError::Rejected {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            return Err(InventoryError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<HotelSearchResponse>(&body).map_err(|e| {
            InventoryError::Deserialize {
                context: format!(
                    "hotel search ({}, {})",
                    coords.latitude, coords.longitude
                ),
                source: e,
            }
        })?;

        let listings = parsed
            .hotels
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, hotel)| normalize_hotel(hotel, index))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            latitude = coords.latitude,
            longitude = coords.longitude,
            %check_in,
            %check_out,
            count = listings.len(),
            "inventory search returned listings"
        );

        Ok(listings)
    }
}
