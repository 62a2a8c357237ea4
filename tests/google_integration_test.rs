//! Wiremock integration tests for GooglePlacesClient.
//!
//! These tests verify correct HTTP interaction and error handling using mocked responses.

use std::sync::Arc;
use std::time::Duration;

use sightseer::{
    Coordinate, FetchOrchestrator, GooglePlacesClient, LocationBias, PhotoProvider,
    PhotoReference, PhotoSize, PlaceField, PlaceProvider, RetryConfig, SightseerError,
};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn lisbon_json() -> serde_json::Value {
    serde_json::json!({
        "id": "ChIJO_PkYRozGQ0R0DaQ5L3rAAQ",
        "displayName": {"text": "Lisbon", "languageCode": "en"},
        "formattedAddress": "Lisbon, Portugal",
        "location": {"latitude": 38.7223, "longitude": -9.1393},
        "photos": [{
            "name": "places/ChIJO_PkYRozGQ0R0DaQ5L3rAAQ/photos/AUc7tXW",
            "widthPx": 4000,
            "heightPx": 3000,
            "authorAttributions": [{"displayName": "A. Photographer"}]
        }]
    })
}

/// Match the whole field mask header (the mask itself contains commas).
fn field_mask(expected: &'static str) -> impl Fn(&Request) -> bool + Send + Sync + 'static {
    move |req: &Request| {
        req.headers
            .get("X-Goog-FieldMask")
            .and_then(|v| v.to_str().ok())
            == Some(expected)
    }
}

fn client(server: &MockServer) -> GooglePlacesClient {
    GooglePlacesClient::with_base_url("test_key", server.uri()).expect("client should build")
}

/// Test successful text search with field mask and API key headers.
#[tokio::test]
async fn test_search_text_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .and(header("X-Goog-Api-Key", "test_key"))
        .and(field_mask(
            "places.id,places.displayName,places.formattedAddress,places.location,places.photos",
        ))
        .and(body_partial_json(serde_json::json!({
            "textQuery": "Lisbon",
            "maxResultCount": 1
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "places": [lisbon_json()] })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let places = client(&mock_server)
        .search_text("Lisbon", PlaceField::MINIMAL, LocationBias::Global, 1)
        .await
        .expect("search should succeed");

    assert_eq!(places.len(), 1);
    let place = &places[0];
    assert_eq!(place.id, "ChIJO_PkYRozGQ0R0DaQ5L3rAAQ");
    assert_eq!(place.display_name, "Lisbon");
    assert_eq!(place.address.as_deref(), Some("Lisbon, Portugal"));
    assert!((place.coordinate.longitude + 9.1393).abs() < 1e-9);
    assert_eq!(place.photos[0].width_px, 4000);
    assert_eq!(place.photos[0].attributions[0].display_name, "A. Photographer");
}

/// No match comes back as an empty object.
#[tokio::test]
async fn test_search_text_empty_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let places = client(&mock_server)
        .search_text("zzzz", PlaceField::MINIMAL, LocationBias::Global, 1)
        .await
        .unwrap();
    assert!(places.is_empty());
}

#[tokio::test]
async fn test_search_text_sends_circle_bias() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .and(body_partial_json(serde_json::json!({
            "locationBias": {"circle": {"radius": 2000.0}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bias = LocationBias::Circle {
        center: Coordinate::new(38.7, -9.1),
        radius_m: 2000.0,
    };
    client(&mock_server)
        .search_text("cafe", PlaceField::MINIMAL, bias, 5)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_empty_query_is_rejected_locally() {
    let mock_server = MockServer::start().await;

    let result = client(&mock_server)
        .search_text("   ", PlaceField::MINIMAL, LocationBias::Global, 1)
        .await;
    assert!(matches!(result, Err(SightseerError::InvalidInput(_))));
}

/// Test authentication failure (401/403).
#[tokio::test]
async fn test_auth_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server)
        .search_text("Lisbon", PlaceField::MINIMAL, LocationBias::Global, 1)
        .await;
    assert!(matches!(result, Err(SightseerError::AuthenticationFailed)));
}

/// Test rate limiting (429) with retry-after header.
#[tokio::test]
async fn test_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server)
        .search_text("Lisbon", PlaceField::MINIMAL, LocationBias::Global, 1)
        .await;
    match result {
        Err(SightseerError::RateLimited { retry_after }) => {
            assert_eq!(retry_after, Some(Duration::from_secs(7)));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

/// Test generic server error.
#[tokio::test]
async fn test_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server)
        .search_text("Lisbon", PlaceField::MINIMAL, LocationBias::Global, 1)
        .await;
    assert!(matches!(result, Err(SightseerError::Api { status: 500, .. })));
}

#[tokio::test]
async fn test_fetch_place_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/places/ChIJO_PkYRozGQ0R0DaQ5L3rAAQ"))
        .and(field_mask(
            "id,displayName,location,rating,userRatingCount,reviews",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "ChIJO_PkYRozGQ0R0DaQ5L3rAAQ",
            "displayName": {"text": "Lisbon"},
            "location": {"latitude": 38.7223, "longitude": -9.1393},
            "rating": 4.7,
            "userRatingCount": 310,
            "reviews": [{
                "rating": 4,
                "text": {"text": "Hilly but worth it"},
                "authorAttribution": {"displayName": "Rui"},
                "relativePublishTimeDescription": "2 weeks ago"
            }]
        })))
        .mount(&mock_server)
        .await;

    let place = client(&mock_server)
        .fetch_place("ChIJO_PkYRozGQ0R0DaQ5L3rAAQ", PlaceField::REVIEWS)
        .await
        .unwrap()
        .expect("place should exist");

    assert_eq!(place.user_rating_count, Some(310));
    assert_eq!(place.reviews.len(), 1);
    assert_eq!(place.reviews[0].author, "Rui");
    assert_eq!(place.reviews[0].rating, 4);
    assert_eq!(place.reviews[0].text.as_deref(), Some("Hilly but worth it"));
}

#[tokio::test]
async fn test_fetch_place_unknown_id_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/places/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let place = client(&mock_server)
        .fetch_place("nope", PlaceField::MINIMAL)
        .await
        .unwrap();
    assert!(place.is_none());
}

#[tokio::test]
async fn test_fetch_place_rejects_path_segments() {
    let mock_server = MockServer::start().await;

    let result = client(&mock_server)
        .fetch_place("a/b", PlaceField::MINIMAL)
        .await;
    assert!(matches!(result, Err(SightseerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_fetch_photo_success() {
    let mock_server = MockServer::start().await;
    let photo = PhotoReference::new("places/abc/photos/xyz", 4000, 3000);

    Mock::given(method("GET"))
        .and(path("/v1/places/abc/photos/xyz/media"))
        .and(query_param("maxWidthPx", "400"))
        .and(query_param("maxHeightPx", "400"))
        .and(header("X-Goog-Api-Key", "test_key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0xFFu8, 0xD8, 0xFF, 0xE0])
                .insert_header("content-type", "image/jpeg"),
        )
        .mount(&mock_server)
        .await;

    let image = client(&mock_server)
        .fetch_photo(&photo, PhotoSize::compact())
        .await
        .unwrap();

    assert_eq!(&image.data[..], &[0xFF, 0xD8, 0xFF, 0xE0]);
    assert_eq!(image.content_type, "image/jpeg");
}

#[tokio::test]
async fn test_fetch_photo_error() {
    let mock_server = MockServer::start().await;
    let photo = PhotoReference::new("places/abc/photos/xyz", 4000, 3000);

    Mock::given(method("GET"))
        .and(path("/v1/places/abc/photos/xyz/media"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server)
        .fetch_photo(&photo, PhotoSize::compact())
        .await;
    assert!(matches!(result, Err(SightseerError::Api { status: 400, .. })));
}

/// Orchestrator over HTTP: the photo is fetched once, then served from cache.
#[tokio::test]
async fn test_orchestrator_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "places": [lisbon_json()] })),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(
            "/v1/places/ChIJO_PkYRozGQ0R0DaQ5L3rAAQ/photos/AUc7tXW/media",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"png-bytes".to_vec())
                .insert_header("content-type", "image/png"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let orchestrator = FetchOrchestrator::builder()
        .provider(Arc::new(client(&mock_server)))
        .retry(RetryConfig::new().initial_delay(Duration::from_millis(1)))
        .build()
        .unwrap();

    for _ in 0..2 {
        let (place, image) = orchestrator
            .fetch_place_and_image("Lisbon", PhotoSize::expanded())
            .await
            .unwrap();
        assert_eq!(place.display_name, "Lisbon");
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.extension(), "png");
    }
}

/// Orchestrator over HTTP: searches that keep failing end in NoResults.
#[tokio::test]
async fn test_orchestrator_http_failures_exhaust_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let orchestrator = FetchOrchestrator::builder()
        .provider(Arc::new(client(&mock_server)))
        .retry(RetryConfig::new().initial_delay(Duration::from_millis(1)))
        .build()
        .unwrap();

    let result = orchestrator
        .fetch_place_and_image("Lisbon", PhotoSize::compact())
        .await;
    assert!(matches!(result, Err(SightseerError::NoResults(_))));
}
