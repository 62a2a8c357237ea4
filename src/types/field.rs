//! Request shaping: field masks and search bias.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A place attribute that can be requested from the provider.
///
/// Providers bill and respond per requested field, so callers ask only for
/// what they display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceField {
    Id,
    DisplayName,
    FormattedAddress,
    Location,
    Photos,
    Rating,
    UserRatingCount,
    Reviews,
}

impl PlaceField {
    /// Fields needed to show a place and its photo.
    pub const MINIMAL: &'static [PlaceField] = &[
        PlaceField::Id,
        PlaceField::DisplayName,
        PlaceField::FormattedAddress,
        PlaceField::Location,
        PlaceField::Photos,
    ];

    /// Fields needed for a place's review panel.
    pub const REVIEWS: &'static [PlaceField] = &[
        PlaceField::Id,
        PlaceField::DisplayName,
        PlaceField::Location,
        PlaceField::Rating,
        PlaceField::UserRatingCount,
        PlaceField::Reviews,
    ];

    /// Field name as used in provider field masks.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceField::Id => "id",
            PlaceField::DisplayName => "displayName",
            PlaceField::FormattedAddress => "formattedAddress",
            PlaceField::Location => "location",
            PlaceField::Photos => "photos",
            PlaceField::Rating => "rating",
            PlaceField::UserRatingCount => "userRatingCount",
            PlaceField::Reviews => "reviews",
        }
    }

    /// Build a comma-separated field mask, each field prefixed with `prefix`.
    pub fn mask(fields: &[PlaceField], prefix: &str) -> String {
        fields
            .iter()
            .map(|f| format!("{prefix}{}", f.as_str()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Region to prefer when ranking text search results.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum LocationBias {
    /// No regional preference.
    #[default]
    Global,
    /// Prefer results within `radius_m` metres of `center`.
    Circle { center: Coordinate, radius_m: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_with_prefix() {
        let mask = PlaceField::mask(&[PlaceField::Id, PlaceField::Photos], "places.");
        assert_eq!(mask, "places.id,places.photos");
    }

    #[test]
    fn mask_without_prefix() {
        assert_eq!(
            PlaceField::mask(PlaceField::MINIMAL, ""),
            "id,displayName,formattedAddress,location,photos"
        );
    }

    #[test]
    fn default_bias_is_global() {
        assert_eq!(LocationBias::default(), LocationBias::Global);
    }
}
