//! End-to-end pipeline tests with in-process fakes and wiremock providers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use ecostay_core::{
    CertificationLevel, CertificationRecord, Coordinates, FilterCriteria, GeocodingProvider,
    ProviderSettings, RawListing, SearchQuery,
};
use ecostay_geocode::{GeocodeError, Geocoder};
use ecostay_inventory::{HotelInventory, InventoryError};
use ecostay_search::{
    build_http_client, stream_hotels, CertificationRegistry, SearchError, SearchEvent,
    SearchPipeline, StaticRegistry,
};
use futures::StreamExt;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

struct FakeGeocoder {
    result: Option<Coordinates>,
    calls: AtomicUsize,
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    fn provider(&self) -> GeocodingProvider {
        GeocodingProvider::Mapbox
    }

    async fn geocode(&self, destination: &str) -> Result<Coordinates, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.ok_or_else(|| GeocodeError::NotFound {
            destination: destination.to_string(),
        })
    }
}

struct FakeInventory {
    listings: Vec<RawListing>,
    calls: AtomicUsize,
}

#[async_trait]
impl HotelInventory for FakeInventory {
    async fn search(
        &self,
        _coords: Coordinates,
        _check_in: NaiveDate,
        _check_out: NaiveDate,
    ) -> Result<Vec<RawListing>, InventoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.listings.clone())
    }
}

struct DownRegistry;

#[async_trait]
impl CertificationRegistry for DownRegistry {
    async fn certified_hotels(&self) -> Result<Vec<CertificationRecord>, SearchError> {
        Err(SearchError::Registry("connection refused".to_string()))
    }
}

fn aspen() -> Coordinates {
    Coordinates {
        latitude: 39.19,
        longitude: -106.82,
    }
}

fn listing(id: &str, price: f64) -> RawListing {
    RawListing {
        external_id: id.to_string(),
        name: format!("Hotel {id}"),
        city: Some("Aspen".to_string()),
        region: Some("Colorado".to_string()),
        country: Some("United States".to_string()),
        price: Some(price),
        rating: Some(4.5),
        review_count: Some(12),
        image_url: None,
    }
}

fn gold_registry() -> Arc<StaticRegistry> {
    Arc::new(StaticRegistry::new(vec![CertificationRecord {
        id: "123456".to_string(),
        certification_level: CertificationLevel::Gold,
        description: "Renewable energy".to_string(),
    }]))
}

fn query(filters: FilterCriteria) -> SearchQuery {
    SearchQuery {
        destination: "Aspen".to_string(),
        check_in: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
        check_out: NaiveDate::from_ymd_opt(2026, 11, 3).unwrap(),
        filters,
    }
}

fn aspen_pipeline() -> (SearchPipeline, Arc<FakeGeocoder>, Arc<FakeInventory>) {
    let geocoder = Arc::new(FakeGeocoder {
        result: Some(aspen()),
        calls: AtomicUsize::new(0),
    });
    let inventory = Arc::new(FakeInventory {
        listings: vec![listing("123456", 289.0), listing("999999", 99.0)],
        calls: AtomicUsize::new(0),
    });
    let pipeline = SearchPipeline::new(geocoder.clone(), inventory.clone(), gold_registry());
    (pipeline, geocoder, inventory)
}

// ---------------------------------------------------------------------------
// Aspen scenario
// ---------------------------------------------------------------------------

#[tokio::test]
async fn aspen_merges_only_the_certified_listing() {
    let (pipeline, geocoder, inventory) = aspen_pipeline();

    let hotels = pipeline.run(&query(FilterCriteria::default())).await.unwrap();

    assert_eq!(hotels.len(), 1);
    assert_eq!(hotels[0].id, "123456");
    assert_eq!(hotels[0].certification, CertificationLevel::Gold);
    assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    assert_eq!(inventory.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn aspen_silver_filter_yields_nothing() {
    let (pipeline, _, _) = aspen_pipeline();
    let filters = FilterCriteria {
        certifications: [CertificationLevel::Silver].into_iter().collect(),
        ..FilterCriteria::default()
    };

    let hotels = pipeline.run(&query(filters)).await.unwrap();
    assert!(hotels.is_empty());

    let events: Vec<SearchEvent> = stream_hotels(hotels).collect().await;
    assert_eq!(events, vec![SearchEvent::Complete { total: 0 }]);
}

#[tokio::test]
async fn aspen_stream_emits_one_hotel_then_completion() {
    let (pipeline, _, _) = aspen_pipeline();

    let hotels = pipeline.run(&query(FilterCriteria::default())).await.unwrap();
    let events: Vec<SearchEvent> = stream_hotels(hotels).collect().await;

    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], SearchEvent::Hotel(h) if h.id == "123456"));
    assert_eq!(
        serde_json::to_value(&events[1]).unwrap(),
        json!({ "type": "complete", "total": 1 })
    );
}

// ---------------------------------------------------------------------------
// Failure ordering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_destination_skips_inventory() {
    let geocoder = Arc::new(FakeGeocoder {
        result: None,
        calls: AtomicUsize::new(0),
    });
    let inventory = Arc::new(FakeInventory {
        listings: vec![listing("123456", 289.0)],
        calls: AtomicUsize::new(0),
    });
    let pipeline = SearchPipeline::new(geocoder, inventory.clone(), gold_registry());

    let err = pipeline
        .run(&query(FilterCriteria::default()))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::NotFound { .. }));
    assert_eq!(inventory.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn registry_outage_is_registry_error() {
    let geocoder = Arc::new(FakeGeocoder {
        result: Some(aspen()),
        calls: AtomicUsize::new(0),
    });
    let inventory = Arc::new(FakeInventory {
        listings: vec![listing("123456", 289.0)],
        calls: AtomicUsize::new(0),
    });
    let pipeline = SearchPipeline::new(geocoder, inventory, Arc::new(DownRegistry));

    let err = pipeline
        .run(&query(FilterCriteria::default()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "registry_error");
}

// ---------------------------------------------------------------------------
// HTTP-backed adapters
// ---------------------------------------------------------------------------

fn settings(server: &MockServer, geocoding_key: Option<&str>, inventory_key: Option<&str>) -> ProviderSettings {
    ProviderSettings {
        geocoding_provider: GeocodingProvider::Mapbox,
        geocoding_api_key: geocoding_key.map(str::to_owned),
        inventory_api_key: inventory_key.map(str::to_owned),
        inventory_base_url: server.uri(),
        mapbox_base_url: server.uri(),
        ninjas_base_url: server.uri(),
        http_timeout_secs: 5,
        http_user_agent: "ecostay-test/0.1".to_string(),
    }
}

#[tokio::test]
async fn missing_credentials_are_configuration_errors() {
    let server = MockServer::start().await;
    let client = build_http_client(5, "ecostay-test/0.1").unwrap();

    let no_geocoding = SearchPipeline::from_settings(
        &settings(&server, None, Some("inv")),
        &client,
        gold_registry(),
    );
    assert!(matches!(
        no_geocoding,
        Err(SearchError::ConfigurationMissing(_))
    ));

    let no_inventory = SearchPipeline::from_settings(
        &settings(&server, Some("tok"), None),
        &client,
        gold_registry(),
    );
    assert!(matches!(
        no_inventory,
        Err(SearchError::ConfigurationMissing(_))
    ));
}

#[tokio::test]
async fn http_pipeline_runs_against_mock_providers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocoding/v5/mapbox.places/Aspen.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "features": [{ "center": [-106.82, 39.19] }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hotels/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hotels": [
                {
                    "id": "123456",
                    "name": "EcoLodge Mountain Retreat",
                    "location": { "address_obj": { "city": "Aspen", "state": "Colorado" } },
                    "price": 289,
                    "rating": 4.8,
                    "review_count": 342
                },
                { "id": 999999, "name": "Roadside Inn" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_http_client(5, "ecostay-test/0.1").unwrap();
    let pipeline = SearchPipeline::from_settings(
        &settings(&server, Some("tok"), Some("inv")),
        &client,
        gold_registry(),
    )
    .unwrap();

    let hotels = pipeline.run(&query(FilterCriteria::default())).await.unwrap();

    assert_eq!(hotels.len(), 1);
    assert_eq!(hotels[0].name, "EcoLodge Mountain Retreat");
    assert_eq!(hotels[0].primary_location, "Aspen");
    assert_eq!(hotels[0].secondary_location, "Colorado");
    assert_eq!(hotels[0].review_count, 342);
}

#[tokio::test]
async fn inventory_outage_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocoding/v5/mapbox.places/Aspen.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "features": [{ "center": [-106.82, 39.19] }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hotels/search"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = build_http_client(5, "ecostay-test/0.1").unwrap();
    let pipeline = SearchPipeline::from_settings(
        &settings(&server, Some("tok"), Some("inv")),
        &client,
        gold_registry(),
    )
    .unwrap();

    let err = pipeline
        .run(&query(FilterCriteria::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Upstream { service: "inventory", .. }));
}
