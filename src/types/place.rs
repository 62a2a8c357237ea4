//! Place records as returned by a place provider.

use serde::{Deserialize, Serialize};

use super::{PhotoReference, Review};

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A resolved place.
///
/// Values are never mutated after a fetch; a refetch produces a new record
/// that replaces the cached one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Provider-assigned unique identifier.
    pub id: String,
    /// Human-readable name.
    pub display_name: String,
    pub coordinate: Coordinate,
    /// Photo handles, best first.
    #[serde(default)]
    pub photos: Vec<PhotoReference>,
    #[serde(default)]
    pub address: Option<String>,
    /// Average rating (1.0–5.0), when requested and known.
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub user_rating_count: Option<u32>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl PlaceRecord {
    /// Create a record with the required fields; everything else empty.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            coordinate,
            photos: Vec::new(),
            address: None,
            rating: None,
            user_rating_count: None,
            reviews: Vec::new(),
        }
    }

    pub fn with_photo(mut self, photo: PhotoReference) -> Self {
        self.photos.push(photo);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_rating(mut self, rating: f32, count: u32) -> Self {
        self.rating = Some(rating);
        self.user_rating_count = Some(count);
        self
    }

    pub fn with_review(mut self, review: Review) -> Self {
        self.reviews.push(review);
        self
    }

    /// The photo used for display, if any.
    pub fn primary_photo(&self) -> Option<&PhotoReference> {
        self.photos.first()
    }
}
