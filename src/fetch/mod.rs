//! Place/photo fetch orchestration.
//!
//! [`FetchOrchestrator`] is the public entry point. It resolves a place, picks
//! its first photo, and returns both, consulting the [`PlaceCache`] and
//! [`ImageCache`] around every network call.
//!
//! # Entry points
//!
//! - [`fetch_place_and_image`](FetchOrchestrator::fetch_place_and_image):
//!   free-text query. Place search is retried with exponential backoff; the
//!   photo step is not.
//! - [`fetch_place_and_image_by_id`](FetchOrchestrator::fetch_place_and_image_by_id):
//!   provider place id. Cache first, no retry; only the missing piece is
//!   fetched on a partial hit.
//!
//! Both populate the caches after each successful network fetch, before
//! returning.

mod builder;
pub mod resolve;

pub use builder::FetchOrchestratorBuilder;
pub use resolve::{PhotoResolver, PlaceResolver};

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::{ImageCache, PlaceCache};
use crate::cities::CityList;
use crate::providers::{RetryConfig, Sleeper};
use crate::telemetry;
use crate::types::{Image, PhotoSize, PlaceRecord};
use crate::{Result, SightseerError};

/// Composes place and photo resolution with the two caches and the retry
/// policy.
///
/// All methods take `&self`; share one instance behind an `Arc` across
/// concurrent callers.
pub struct FetchOrchestrator {
    places: PlaceResolver,
    photos: PhotoResolver,
    place_cache: Arc<PlaceCache>,
    image_cache: Arc<ImageCache>,
    retry: RetryConfig,
    sleeper: Arc<dyn Sleeper>,
}

impl FetchOrchestrator {
    /// Create a new builder.
    pub fn builder() -> FetchOrchestratorBuilder {
        FetchOrchestratorBuilder::new()
    }

    pub(crate) fn new(
        places: PlaceResolver,
        photos: PhotoResolver,
        place_cache: Arc<PlaceCache>,
        image_cache: Arc<ImageCache>,
        retry: RetryConfig,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            places,
            photos,
            place_cache,
            image_cache,
            retry,
            sleeper,
        }
    }

    /// The place cache, keyed on place id.
    pub fn place_cache(&self) -> &Arc<PlaceCache> {
        &self.place_cache
    }

    /// The image cache, keyed on [`PhotoReference::cache_key_for`](crate::PhotoReference::cache_key_for).
    pub fn image_cache(&self) -> &Arc<ImageCache> {
        &self.image_cache
    }

    /// Retry policy for place search.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Empty both caches.
    pub fn clear_caches(&self) {
        self.place_cache.clear();
        self.image_cache.clear();
    }

    /// Resolve `query` to a place and its first photo, bounded by `size`.
    ///
    /// # Errors
    ///
    /// - [`SightseerError::NoResults`] once every attempt came back empty
    /// - [`SightseerError::PlaceMissingPhoto`] if the match has no photos
    /// - [`SightseerError::PhotoFetchFailed`] if the photo call failed
    pub async fn fetch_place_and_image(
        &self,
        query: &str,
        size: PhotoSize,
    ) -> Result<(PlaceRecord, Image)> {
        let result: Result<(PlaceRecord, Image)> = async {
            let place = self.resolve_with_retry(query).await?;
            self.place_cache.set(place.clone(), place.id.clone());
            let image = self.image_for(&place, size).await?;
            Ok((place, image))
        }
        .await;
        record_outcome(&result);
        result
    }

    /// Look up a place by provider id and return it with its first photo.
    ///
    /// Cached values are returned without any network call. On a partial
    /// hit only the missing piece is fetched. An unknown id (or a failed
    /// lookup) is reported as [`SightseerError::NoResults`].
    pub async fn fetch_place_and_image_by_id(
        &self,
        id: &str,
        size: PhotoSize,
    ) -> Result<(PlaceRecord, Image)> {
        let result: Result<(PlaceRecord, Image)> = async {
            let place = match self.place_cache.get(id) {
                Some(place) => place,
                None => {
                    let place = self
                        .places
                        .resolve_id(id)
                        .await
                        .ok_or_else(|| SightseerError::NoResults(id.to_string()))?;
                    self.place_cache.set(place.clone(), id);
                    place
                }
            };
            let image = self.image_for(&place, size).await?;
            Ok((place, image))
        }
        .await;
        record_outcome(&result);
        result
    }

    /// Pick a random city from `cities` and fetch it as a query.
    pub async fn fetch_random_city(
        &self,
        cities: &CityList,
        size: PhotoSize,
    ) -> Result<(PlaceRecord, Image)> {
        let query = cities
            .random_query()
            .ok_or_else(|| SightseerError::InvalidInput("city list is empty".into()))?;
        info!(query = %query, "fetching random city");
        self.fetch_place_and_image(&query, size).await
    }

    /// Search for `query`, backing off after each empty attempt.
    ///
    /// The delay after attempt `n` (0-indexed) is
    /// [`RetryConfig::delay_for_attempt(n)`](RetryConfig::delay_for_attempt),
    /// including after the final attempt. A single-attempt policy never
    /// sleeps.
    async fn resolve_with_retry(&self, query: &str) -> Result<PlaceRecord> {
        for attempt in 0..self.retry.max_attempts {
            if let Some(place) = self.places.resolve(query).await {
                debug!(query, place_id = %place.id, attempt = attempt + 1, "place resolved");
                return Ok(place);
            }

            let delay = self.retry.delay_for_attempt(attempt);
            warn!(
                query,
                attempt = attempt + 1,
                max_attempts = self.retry.max_attempts,
                delay_ms = delay.as_millis() as u64,
                "place resolution came back empty, backing off"
            );
            if attempt + 1 < self.retry.max_attempts {
                metrics::counter!(telemetry::RETRIES_TOTAL,
                    "provider" => self.places.provider_name().to_owned(),
                )
                .increment(1);
            }
            if self.retry.max_attempts > 1 {
                self.sleeper.sleep(delay).await;
            }
        }
        Err(SightseerError::NoResults(query.to_string()))
    }

    /// First photo of `place`, from the image cache or the provider.
    async fn image_for(&self, place: &PlaceRecord, size: PhotoSize) -> Result<Image> {
        let photo = place
            .primary_photo()
            .ok_or_else(|| SightseerError::PlaceMissingPhoto(place.id.clone()))?;

        let key = photo.cache_key_for(size);
        if let Some(image) = self.image_cache.get(&key) {
            return Ok(image);
        }

        let image = self.photos.resolve(photo, size).await?;
        self.image_cache.set(image.clone(), key);
        Ok(image)
    }
}

fn record_outcome<T>(result: &Result<T>) {
    if let Err(e) = result {
        metrics::counter!(telemetry::FETCH_FAILURES_TOTAL, "kind" => e.kind()).increment(1);
    }
}
