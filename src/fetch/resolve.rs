//! Single-round-trip resolution clients.
//!
//! [`PlaceResolver`] turns "did the provider find anything" into an
//! `Option`: failed calls and empty results both come back as `None`, and
//! the orchestrator decides whether to retry. [`PhotoResolver`] keeps
//! failures distinct as [`SightseerError::PhotoFetchFailed`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::providers::{PhotoProvider, PlaceProvider};
use crate::telemetry;
use crate::types::{Image, LocationBias, PhotoReference, PhotoSize, PlaceField, PlaceRecord};
use crate::{Result, SightseerError};

fn record_request(provider: &str, operation: &'static str, ok: bool) {
    metrics::counter!(telemetry::REQUESTS_TOTAL,
        "provider" => provider.to_owned(),
        "operation" => operation,
        "status" => if ok { "ok" } else { "error" },
    )
    .increment(1);
}

/// Resolves a free-text query or place id to at most one place.
#[derive(Clone)]
pub struct PlaceResolver {
    provider: Arc<dyn PlaceProvider>,
}

impl PlaceResolver {
    pub fn new(provider: Arc<dyn PlaceProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Best match for `query`, searched globally with the minimal field set.
    pub async fn resolve(&self, query: &str) -> Option<PlaceRecord> {
        let result = self
            .provider
            .search_text(query, PlaceField::MINIMAL, LocationBias::Global, 1)
            .await;
        record_request(self.provider.name(), "search_text", result.is_ok());

        match result {
            Ok(places) => {
                let place = places.into_iter().next();
                if place.is_none() {
                    debug!(provider = self.provider.name(), query, "no place matched");
                }
                place
            }
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    query,
                    error = %e,
                    "place search failed"
                );
                None
            }
        }
    }

    /// Place with id `id`, fetched with the minimal field set.
    pub async fn resolve_id(&self, id: &str) -> Option<PlaceRecord> {
        let result = self.provider.fetch_place(id, PlaceField::MINIMAL).await;
        record_request(self.provider.name(), "fetch_place", result.is_ok());

        match result {
            Ok(place) => {
                if place.is_none() {
                    debug!(provider = self.provider.name(), place_id = id, "unknown place id");
                }
                place
            }
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    place_id = id,
                    error = %e,
                    "place lookup failed"
                );
                None
            }
        }
    }
}

/// Exchanges a photo reference for image bytes.
#[derive(Clone)]
pub struct PhotoResolver {
    provider: Arc<dyn PhotoProvider>,
}

impl PhotoResolver {
    pub fn new(provider: Arc<dyn PhotoProvider>) -> Self {
        Self { provider }
    }

    /// Fetch `photo` bounded by `size`.
    ///
    /// Any provider error is reported as [`SightseerError::PhotoFetchFailed`].
    pub async fn resolve(&self, photo: &PhotoReference, size: PhotoSize) -> Result<Image> {
        let result = self.provider.fetch_photo(photo, size).await;
        record_request(self.provider.name(), "fetch_photo", result.is_ok());

        result.map_err(|e| {
            warn!(
                provider = self.provider.name(),
                photo = %photo.name,
                error = %e,
                "photo fetch failed"
            );
            SightseerError::PhotoFetchFailed(e.to_string())
        })
    }
}
