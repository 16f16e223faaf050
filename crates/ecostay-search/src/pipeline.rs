//! Search orchestration: geocode, inventory, merge, filter.

use std::sync::Arc;
use std::time::Duration;

use ecostay_core::{CanonicalHotel, ProviderSettings, SearchQuery};
use ecostay_geocode::{build_geocoder, Geocoder};
use ecostay_inventory::{HotelInventory, InventoryClient};
use reqwest::Client;

use crate::error::SearchError;
use crate::filter::filter;
use crate::merge::merge;
use crate::registry::CertificationRegistry;

/// Builds the HTTP client shared by both provider adapters.
///
/// # Errors
///
/// Returns the `reqwest` error if the TLS backend cannot be initialised.
pub fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()
}

/// One configured instance of the search pipeline.
///
/// Holds no per-search state; concurrent searches may share a pipeline.
#[derive(Clone)]
pub struct SearchPipeline {
    geocoder: Arc<dyn Geocoder>,
    inventory: Arc<dyn HotelInventory>,
    registry: Arc<dyn CertificationRegistry>,
}

impl SearchPipeline {
    #[must_use]
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        inventory: Arc<dyn HotelInventory>,
        registry: Arc<dyn CertificationRegistry>,
    ) -> Self {
        Self {
            geocoder,
            inventory,
            registry,
        }
    }

    /// Wires the HTTP-backed adapters selected by `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::ConfigurationMissing`] when the selected
    /// geocoding backend or the inventory provider has no credential, or when
    /// a configured base URL is malformed.
    pub fn from_settings(
        settings: &ProviderSettings,
        client: &Client,
        registry: Arc<dyn CertificationRegistry>,
    ) -> Result<Self, SearchError> {
        let geocoder = build_geocoder(settings, client.clone())?;

        let inventory_key = settings.inventory_api_key.as_deref().ok_or_else(|| {
            SearchError::ConfigurationMissing("inventory provider API key is not set".to_string())
        })?;
        let inventory =
            InventoryClient::with_client(client.clone(), inventory_key, &settings.inventory_base_url)?;

        Ok(Self::new(Arc::from(geocoder), Arc::new(inventory), registry))
    }

    /// Runs one search to completion and returns the filtered hotels in
    /// inventory ranking order.
    ///
    /// 1. Geocode the destination. Nothing else runs if this fails.
    /// 2. Fetch inventory listings for the coordinates and stay window.
    /// 3. Take a registry snapshot and merge, dropping uncertified listings.
    /// 4. Apply the query's filters.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure as a [`SearchError`]. No stage is
    /// retried.
    pub async fn run(&self, query: &SearchQuery) -> Result<Vec<CanonicalHotel>, SearchError> {
        // Step 1: Geocode.
        let coords = self
            .geocoder
            .geocode(&query.destination)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    destination = %query.destination,
                    provider = %self.geocoder.provider(),
                    error = %e,
                    "geocoding failed"
                );
            })?;
        tracing::debug!(
            destination = %query.destination,
            latitude = coords.latitude,
            longitude = coords.longitude,
            "destination geocoded"
        );

        // Step 2: Inventory.
        let listings = self
            .inventory
            .search(coords, query.check_in, query.check_out)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "inventory search failed"))?;
        let listing_count = listings.len();

        // Step 3: Registry snapshot + merge.
        let registry = self.registry.certified_hotels().await?;
        let merged = merge(listings, &registry);
        let certified_count = merged.len();

        // Step 4: Filter.
        let hotels = filter(merged, &query.filters);

        tracing::info!(
            destination = %query.destination,
            listings = listing_count,
            certified = certified_count,
            matched = hotels.len(),
            "search completed"
        );

        Ok(hotels)
    }
}
