//! Google Places API client for place search, place details, and photos.
//!
//! Uses the JSON endpoints of the Places API with field masks, so each call
//! returns (and bills) only the requested [`PlaceField`]s.
//! See: <https://developers.google.com/maps/documentation/places/web-service/op-overview>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{PhotoProvider, PlaceProvider};
use crate::types::{
    Attribution, Coordinate, Image, LocationBias, PhotoReference, PhotoSize, PlaceField,
    PlaceRecord, Review,
};
use crate::{Result, SightseerError};

/// Default base URL for the Places API
pub const DEFAULT_BASE_URL: &str = "https://places.googleapis.com";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest page the text search endpoint returns.
const MAX_RESULT_COUNT: u32 = 20;

/// Client for the Google Places API.
///
/// Supports:
/// - Text search (`places:searchText`)
/// - Place details by id
/// - Photo media
#[derive(Clone)]
pub struct GooglePlacesClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl GooglePlacesClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Self::with_options(api_key, base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom base URL and request timeout.
    pub fn with_options(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            SightseerError::Configuration(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Map non-success statuses to errors.
    fn handle_response_errors(&self, response: &reqwest::Response, subject: &str) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            401 | 403 => Err(SightseerError::AuthenticationFailed),
            404 => Err(SightseerError::NotFound(subject.to_string())),
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);
                Err(SightseerError::RateLimited { retry_after })
            }
            code => Err(SightseerError::Api {
                status: code,
                message: format!("Places API error: {status}"),
            }),
        }
    }
}

#[async_trait]
impl PlaceProvider for GooglePlacesClient {
    fn name(&self) -> &str {
        "google_places"
    }

    async fn search_text(
        &self,
        query: &str,
        fields: &[PlaceField],
        bias: LocationBias,
        max_results: u32,
    ) -> Result<Vec<PlaceRecord>> {
        if query.trim().is_empty() {
            return Err(SightseerError::InvalidInput("empty search query".into()));
        }

        let url = format!("{}/v1/places:searchText", self.base_url);
        let body = SearchTextRequest {
            text_query: query,
            max_result_count: max_results.clamp(1, MAX_RESULT_COUNT),
            location_bias: ApiLocationBias::from_bias(bias),
        };

        let response = self
            .http
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", PlaceField::mask(fields, "places."))
            .json(&body)
            .send()
            .await?;

        self.handle_response_errors(&response, query)?;

        // An empty match set comes back as `{}`
        let parsed: SearchTextResponse = response.json().await?;
        debug!(query, count = parsed.places.len(), "text search complete");

        Ok(parsed.places.into_iter().map(PlaceRecord::from).collect())
    }

    async fn fetch_place(&self, id: &str, fields: &[PlaceField]) -> Result<Option<PlaceRecord>> {
        if id.is_empty() || id.contains('/') {
            return Err(SightseerError::InvalidInput(format!(
                "invalid place id: {id:?}"
            )));
        }

        let url = format!("{}/v1/places/{}", self.base_url, id);

        let response = self
            .http
            .get(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", PlaceField::mask(fields, ""))
            .send()
            .await?;

        match self.handle_response_errors(&response, id) {
            Ok(()) => {}
            Err(SightseerError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        }

        let place: ApiPlace = response.json().await?;
        Ok(Some(place.into()))
    }
}

#[async_trait]
impl PhotoProvider for GooglePlacesClient {
    fn name(&self) -> &str {
        "google_places"
    }

    async fn fetch_photo(&self, photo: &PhotoReference, size: PhotoSize) -> Result<Image> {
        let url = format!(
            "{}/v1/{}/media?maxWidthPx={}&maxHeightPx={}",
            self.base_url, photo.name, size.max_width_px, size.max_height_px
        );

        // The media endpoint redirects to the image; reqwest follows it.
        let response = self
            .http
            .get(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .send()
            .await?;

        self.handle_response_errors(&response, &photo.name)?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(SightseerError::Http(format!(
                "empty body for photo {}",
                photo.name
            )));
        }

        Ok(Image::new(bytes.to_vec(), content_type))
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchTextRequest<'a> {
    text_query: &'a str,
    max_result_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    location_bias: Option<ApiLocationBias>,
}

#[derive(Serialize)]
struct ApiLocationBias {
    circle: ApiCircle,
}

impl ApiLocationBias {
    fn from_bias(bias: LocationBias) -> Option<Self> {
        match bias {
            LocationBias::Global => None,
            LocationBias::Circle { center, radius_m } => Some(Self {
                circle: ApiCircle {
                    center: ApiLatLng {
                        latitude: center.latitude,
                        longitude: center.longitude,
                    },
                    radius: radius_m,
                },
            }),
        }
    }
}

#[derive(Serialize)]
struct ApiCircle {
    center: ApiLatLng,
    radius: f64,
}

#[derive(Deserialize)]
struct SearchTextResponse {
    #[serde(default)]
    places: Vec<ApiPlace>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPlace {
    #[serde(default)]
    id: String,
    display_name: Option<LocalizedText>,
    formatted_address: Option<String>,
    location: Option<ApiLatLng>,
    #[serde(default)]
    photos: Vec<ApiPhoto>,
    rating: Option<f32>,
    user_rating_count: Option<u32>,
    #[serde(default)]
    reviews: Vec<ApiReview>,
}

#[derive(Deserialize)]
struct LocalizedText {
    text: String,
}

#[derive(Serialize, Deserialize)]
struct ApiLatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPhoto {
    name: String,
    #[serde(default)]
    width_px: u32,
    #[serde(default)]
    height_px: u32,
    #[serde(default)]
    author_attributions: Vec<ApiAttribution>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiAttribution {
    #[serde(default)]
    display_name: String,
    uri: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiReview {
    rating: Option<f32>,
    text: Option<LocalizedText>,
    author_attribution: Option<ApiAttribution>,
    relative_publish_time_description: Option<String>,
}

impl From<ApiPlace> for PlaceRecord {
    fn from(place: ApiPlace) -> Self {
        let coordinate = place
            .location
            .map(|l| Coordinate::new(l.latitude, l.longitude))
            .unwrap_or(Coordinate::new(0.0, 0.0));

        PlaceRecord {
            id: place.id,
            display_name: place.display_name.map(|t| t.text).unwrap_or_default(),
            coordinate,
            photos: place.photos.into_iter().map(PhotoReference::from).collect(),
            address: place.formatted_address,
            rating: place.rating,
            user_rating_count: place.user_rating_count,
            reviews: place.reviews.into_iter().map(Review::from).collect(),
        }
    }
}

impl From<ApiPhoto> for PhotoReference {
    fn from(photo: ApiPhoto) -> Self {
        PhotoReference {
            name: photo.name,
            width_px: photo.width_px,
            height_px: photo.height_px,
            attributions: photo
                .author_attributions
                .into_iter()
                .map(|a| Attribution {
                    display_name: a.display_name,
                    uri: a.uri,
                })
                .collect(),
        }
    }
}

impl From<ApiReview> for Review {
    fn from(review: ApiReview) -> Self {
        Review {
            author: review
                .author_attribution
                .map(|a| a.display_name)
                .unwrap_or_default(),
            rating: review.rating.map(|r| r.round().clamp(0.0, 5.0) as u8).unwrap_or(0),
            text: review.text.map(|t| t.text),
            relative_time: review.relative_publish_time_description,
        }
    }
}
