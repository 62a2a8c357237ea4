//! Public types for the Sightseer API.

mod field;
mod photo;
mod place;
mod review;

pub use field::{LocationBias, PlaceField};
pub use photo::{Attribution, Image, PhotoReference, PhotoSize};
pub use place::{Coordinate, PlaceRecord};
pub use review::Review;
