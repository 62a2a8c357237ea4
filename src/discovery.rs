//! City guides: top sights, top eateries, and place reviews.
//!
//! Thin layer over a [`PlaceProvider`]. Each list is a single text search
//! with no retry; places without photos are dropped because they cannot be
//! shown in a photo carousel.

use std::sync::Arc;

use futures_util::future::try_join;
use tracing::debug;

use crate::providers::PlaceProvider;
use crate::types::{LocationBias, PlaceField, PlaceRecord};
use crate::{Result, SightseerError};

/// Default number of places per list.
pub const DEFAULT_LIMIT: u32 = 10;

/// Fields requested for guide entries.
const GUIDE_FIELDS: &[PlaceField] = &[
    PlaceField::Id,
    PlaceField::DisplayName,
    PlaceField::FormattedAddress,
    PlaceField::Location,
    PlaceField::Photos,
    PlaceField::Rating,
    PlaceField::UserRatingCount,
];

/// Category of places in a city guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuideCategory {
    Sights,
    Eateries,
}

impl GuideCategory {
    /// Text search query for this category in `city`.
    pub fn query(&self, city: &str) -> String {
        match self {
            GuideCategory::Sights => format!("top sights in {city}"),
            GuideCategory::Eateries => format!("best restaurants in {city}"),
        }
    }
}

/// Both lists for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct CityGuide {
    pub city: String,
    pub sights: Vec<PlaceRecord>,
    pub eateries: Vec<PlaceRecord>,
}

/// Builds city guides from a place provider.
#[derive(Clone)]
pub struct Discovery {
    provider: Arc<dyn PlaceProvider>,
}

impl Discovery {
    pub fn new(provider: Arc<dyn PlaceProvider>) -> Self {
        Self { provider }
    }

    /// Up to `limit` places of `category` in `city`, best first.
    pub async fn list(
        &self,
        category: GuideCategory,
        city: &str,
        limit: u32,
    ) -> Result<Vec<PlaceRecord>> {
        if city.trim().is_empty() {
            return Err(SightseerError::InvalidInput("empty city".into()));
        }
        if limit == 0 {
            return Ok(Vec::new());
        }

        let places = self
            .provider
            .search_text(&category.query(city), GUIDE_FIELDS, LocationBias::Global, limit)
            .await?;
        let total = places.len();
        let displayable: Vec<PlaceRecord> = places
            .into_iter()
            .filter(|p| !p.photos.is_empty())
            .take(limit as usize)
            .collect();

        debug!(
            city,
            category = ?category,
            total,
            kept = displayable.len(),
            "guide list fetched"
        );
        Ok(displayable)
    }

    pub async fn top_sights(&self, city: &str, limit: u32) -> Result<Vec<PlaceRecord>> {
        self.list(GuideCategory::Sights, city, limit).await
    }

    pub async fn top_eateries(&self, city: &str, limit: u32) -> Result<Vec<PlaceRecord>> {
        self.list(GuideCategory::Eateries, city, limit).await
    }

    /// Sights and eateries for `city`, fetched concurrently.
    pub async fn city_guide(&self, city: &str, limit: u32) -> Result<CityGuide> {
        let (sights, eateries) =
            try_join(self.top_sights(city, limit), self.top_eateries(city, limit)).await?;
        Ok(CityGuide {
            city: city.to_string(),
            sights,
            eateries,
        })
    }

    /// Place `place_id` with rating and reviews populated.
    pub async fn reviews(&self, place_id: &str) -> Result<PlaceRecord> {
        self.provider
            .fetch_place(place_id, PlaceField::REVIEWS)
            .await?
            .ok_or_else(|| SightseerError::NotFound(place_id.to_string()))
    }
}
