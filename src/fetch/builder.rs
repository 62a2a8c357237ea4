//! Builder for configuring orchestrator instances

use std::sync::Arc;

use super::{FetchOrchestrator, PhotoResolver, PlaceResolver};
use crate::cache::{CacheConfig, ImageCache, PlaceCache};
use crate::providers::{PhotoProvider, PlaceProvider, RetryConfig, Sleeper, TokioSleeper};
use crate::{Result, SightseerError};

/// Builder for [`FetchOrchestrator`].
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use sightseer::{FetchOrchestrator, GooglePlacesClient, RetryConfig};
/// # fn main() -> sightseer::Result<()> {
/// let client = Arc::new(GooglePlacesClient::new("places-api-key")?);
/// let orchestrator = FetchOrchestrator::builder()
///     .provider(client)
///     .retry(RetryConfig::new().max_attempts(3))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct FetchOrchestratorBuilder {
    places: Option<Arc<dyn PlaceProvider>>,
    photos: Option<Arc<dyn PhotoProvider>>,
    retry: RetryConfig,
    cache_config: CacheConfig,
    place_cache: Option<Arc<PlaceCache>>,
    image_cache: Option<Arc<ImageCache>>,
    sleeper: Arc<dyn Sleeper>,
}

impl FetchOrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            places: None,
            photos: None,
            retry: RetryConfig::default(),
            cache_config: CacheConfig::default(),
            place_cache: None,
            image_cache: None,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Use one client for both place and photo lookups.
    pub fn provider<P>(self, provider: Arc<P>) -> Self
    where
        P: PlaceProvider + PhotoProvider + 'static,
    {
        self.place_provider(provider.clone()).photo_provider(provider)
    }

    /// Set the place search and lookup provider.
    pub fn place_provider(mut self, provider: Arc<dyn PlaceProvider>) -> Self {
        self.places = Some(provider);
        self
    }

    /// Set the photo download provider.
    pub fn photo_provider(mut self, provider: Arc<dyn PhotoProvider>) -> Self {
        self.photos = Some(provider);
        self
    }

    /// Set the place-resolution retry policy (default: 3 attempts, 100ms base).
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = config;
        self
    }

    /// Bounds for caches created by [`build()`](Self::build).
    ///
    /// Ignored for caches supplied via [`place_cache()`](Self::place_cache)
    /// or [`image_cache()`](Self::image_cache).
    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }

    /// Share an existing place cache.
    pub fn place_cache(mut self, cache: Arc<PlaceCache>) -> Self {
        self.place_cache = Some(cache);
        self
    }

    /// Share an existing image cache.
    pub fn image_cache(mut self, cache: Arc<ImageCache>) -> Self {
        self.image_cache = Some(cache);
        self
    }

    /// Replace the backoff sleeper (tests inject one that records delays).
    pub fn sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Build the orchestrator.
    ///
    /// Fails with [`SightseerError::Configuration`] if either provider is
    /// missing.
    pub fn build(self) -> Result<FetchOrchestrator> {
        let places = self
            .places
            .ok_or_else(|| SightseerError::Configuration("no place provider configured".into()))?;
        let photos = self
            .photos
            .ok_or_else(|| SightseerError::Configuration("no photo provider configured".into()))?;

        let place_cache = self
            .place_cache
            .unwrap_or_else(|| Arc::new(PlaceCache::places(&self.cache_config)));
        let image_cache = self
            .image_cache
            .unwrap_or_else(|| Arc::new(ImageCache::images(&self.cache_config)));

        Ok(FetchOrchestrator::new(
            PlaceResolver::new(places),
            PhotoResolver::new(photos),
            place_cache,
            image_cache,
            self.retry,
            self.sleeper,
        ))
    }
}

impl Default for FetchOrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
