//! Provider traits for the external places and photo services.
//!
//! The orchestrator only ever talks to these two traits, so the backing
//! service can be swapped (or mocked) without touching fetch or cache logic.
//! One implementation may serve both, as
//! [`GooglePlacesClient`](super::GooglePlacesClient) does.

use async_trait::async_trait;

use crate::Result;
use crate::types::{Image, LocationBias, PhotoReference, PhotoSize, PlaceField, PlaceRecord};

// ============================================================================
// Place Provider
// ============================================================================

/// Provider for place search and lookup.
#[async_trait]
pub trait PlaceProvider: Send + Sync {
    /// Provider name for logging/metrics.
    fn name(&self) -> &str;

    /// Free-text place search.
    ///
    /// Returns up to `max_results` places, best match first. An empty vec
    /// means no match; errors are reserved for failed calls.
    async fn search_text(
        &self,
        query: &str,
        fields: &[PlaceField],
        bias: LocationBias,
        max_results: u32,
    ) -> Result<Vec<PlaceRecord>>;

    /// Direct lookup by provider place id.
    ///
    /// Returns `Ok(None)` when the id is unknown.
    async fn fetch_place(&self, id: &str, fields: &[PlaceField]) -> Result<Option<PlaceRecord>>;
}

// ============================================================================
// Photo Provider
// ============================================================================

/// Provider that exchanges photo references for image bytes.
#[async_trait]
pub trait PhotoProvider: Send + Sync {
    /// Provider name for logging/metrics.
    fn name(&self) -> &str;

    /// Fetch `photo`, scaled down to fit within `size`.
    async fn fetch_photo(&self, photo: &PhotoReference, size: PhotoSize) -> Result<Image>;
}
