//! Integration tests for both geocoding backends using wiremock HTTP mocks.

use ecostay_core::GeocodingProvider;
use ecostay_geocode::{GeocodeError, Geocoder, MapboxGeocoder, NinjasGeocoder};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mapbox(base_url: &str) -> MapboxGeocoder {
    MapboxGeocoder::new("mapbox-token", base_url, 5, "ecostay-test/0.1")
        .expect("client construction should not fail")
}

fn ninjas(base_url: &str) -> NinjasGeocoder {
    NinjasGeocoder::new("ninjas-key", base_url, 5, "ecostay-test/0.1")
        .expect("client construction should not fail")
}

// ---------------------------------------------------------------------------
// Mapbox
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mapbox_returns_first_feature_center_as_lat_lng() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocoding/v5/mapbox.places/Aspen.json"))
        .and(query_param("access_token", "mapbox-token"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "FeatureCollection",
            "features": [
                { "place_name": "Aspen, Colorado, United States", "center": [-106.82, 39.19] }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let coords = mapbox(&server.uri())
        .geocode("Aspen")
        .await
        .expect("should resolve");

    assert!((coords.latitude - 39.19).abs() < 1e-9);
    assert!((coords.longitude - -106.82).abs() < 1e-9);
}

#[tokio::test]
async fn mapbox_empty_features_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocoding/v5/mapbox.places/Atlantis.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .mount(&server)
        .await;

    let err = mapbox(&server.uri()).geocode("Atlantis").await.unwrap_err();
    assert!(
        matches!(err, GeocodeError::NotFound { ref destination } if destination == "Atlantis"),
        "expected NotFound, got: {err:?}"
    );
}

#[tokio::test]
async fn mapbox_unauthorized_is_rejected_credential() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Not Authorized - Invalid Token" })))
        .mount(&server)
        .await;

    let err = mapbox(&server.uri()).geocode("Aspen").await.unwrap_err();
    assert!(
        matches!(
            err,
            GeocodeError::Rejected {
                provider: GeocodingProvider::Mapbox,
                status: 401
            }
        ),
        "expected Rejected, got: {err:?}"
    );
}

#[tokio::test]
async fn mapbox_server_error_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = mapbox(&server.uri()).geocode("Aspen").await.unwrap_err();
    assert!(matches!(
        err,
        GeocodeError::UnexpectedStatus { status: 503, .. }
    ));
}

#[tokio::test]
async fn mapbox_malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = mapbox(&server.uri()).geocode("Aspen").await.unwrap_err();
    assert!(matches!(err, GeocodeError::Deserialize { .. }));
}

#[tokio::test]
async fn blank_destination_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = mapbox(&server.uri()).geocode("   ").await.unwrap_err();
    assert!(matches!(err, GeocodeError::EmptyDestination));
}

// ---------------------------------------------------------------------------
// API Ninjas
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ninjas_sends_key_header_and_returns_first_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/geocoding"))
        .and(query_param("city", "Aspen"))
        .and(header("X-Api-Key", "ninjas-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "Aspen", "latitude": 39.19, "longitude": -106.82, "country": "US", "state": "Colorado" },
            { "name": "Aspen Hill", "latitude": 39.07, "longitude": -77.08, "country": "US", "state": "Maryland" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let coords = ninjas(&server.uri()).geocode("Aspen").await.unwrap();
    assert!((coords.latitude - 39.19).abs() < 1e-9);
    assert!((coords.longitude - -106.82).abs() < 1e-9);
}

#[tokio::test]
async fn ninjas_empty_array_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/geocoding"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = ninjas(&server.uri()).geocode("Nowhere").await.unwrap_err();
    assert!(matches!(err, GeocodeError::NotFound { .. }));
}

#[tokio::test]
async fn ninjas_forbidden_is_rejected_credential() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = ninjas(&server.uri()).geocode("Aspen").await.unwrap_err();
    assert!(matches!(
        err,
        GeocodeError::Rejected {
            provider: GeocodingProvider::ApiNinjas,
            status: 403
        }
    ));
}
