//! Bundled list of destination cities.
//!
//! Used only to seed a query string when the user asks for a random
//! destination. The list is read-only and compiled into the binary.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::Result;

const BUNDLED_CITIES: &str = include_str!("../data/cities.json");

/// A city and the country it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub city: String,
    pub country: String,
}

impl City {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
        }
    }

    /// Search query for this city, e.g. `"Lisbon, Portugal"`.
    pub fn query(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

/// Read-only list of cities to draw random destinations from.
#[derive(Debug, Clone, Default)]
pub struct CityList {
    cities: Vec<City>,
}

impl CityList {
    /// The list shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CITIES)
    }

    /// Parse a JSON array of `{"city": ..., "country": ...}` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let cities: Vec<City> = serde_json::from_str(json)?;
        Ok(Self { cities })
    }

    pub fn from_cities(cities: Vec<City>) -> Self {
        Self { cities }
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &City> {
        self.cities.iter()
    }

    /// Pick a city using `rng`.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&City> {
        self.cities.choose(rng)
    }

    /// Query string for a city picked with the thread-local RNG.
    pub fn random_query(&self) -> Option<String> {
        self.choose(&mut rand::thread_rng()).map(City::query)
    }
}
