//! Sightseer - place and photo fetch-and-cache layer for travel discovery
//!
//! This crate resolves a place query (free text, place id, or a random
//! destination city) to a [`PlaceRecord`] and a representative [`Image`],
//! caching both. Backing services sit behind the [`PlaceProvider`] and
//! [`PhotoProvider`] traits; [`GooglePlacesClient`] implements both.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sightseer::{FetchOrchestrator, GooglePlacesClient, PhotoSize};
//!
//! #[tokio::main]
//! async fn main() -> sightseer::Result<()> {
//!     let client = Arc::new(GooglePlacesClient::new("places-api-key")?);
//!     let orchestrator = FetchOrchestrator::builder().provider(client).build()?;
//!
//!     let (place, image) = orchestrator
//!         .fetch_place_and_image("Lisbon, Portugal", PhotoSize::expanded())
//!         .await?;
//!
//!     println!("{} ({} bytes of {})", place.display_name, image.len(), image.content_type);
//!     Ok(())
//! }
//! ```
//!
//! # City guides
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sightseer::{Discovery, GooglePlacesClient};
//!
//! #[tokio::main]
//! async fn main() -> sightseer::Result<()> {
//!     let discovery = Discovery::new(Arc::new(GooglePlacesClient::new("places-api-key")?));
//!     let guide = discovery.city_guide("Kyoto", 10).await?;
//!
//!     for sight in &guide.sights {
//!         println!("{}", sight.display_name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod cities;
pub mod config;
pub mod discovery;
pub mod error;
pub mod fetch;
pub mod providers;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use cache::{CacheConfig, ImageCache, ObjectCache, PlaceCache};
pub use cities::{City, CityList};
pub use discovery::{CityGuide, Discovery, GuideCategory};
pub use error::{Result, SightseerError};
pub use fetch::{FetchOrchestrator, FetchOrchestratorBuilder};
pub use providers::{
    GooglePlacesClient, PhotoProvider, PlaceProvider, RetryConfig, Sleeper, TokioSleeper,
};

// Re-export all types
pub use types::{
    Attribution, Coordinate, Image, LocationBias, PhotoReference, PhotoSize, PlaceField,
    PlaceRecord, Review,
};

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
