//! Provider traits and implementations.
//!
//! [`traits`] defines the two collaborator seams (places, photos);
//! [`google`] implements both over HTTP; [`retry`] holds the backoff policy
//! used by the fetch orchestrator.

pub mod google;
pub mod retry;
pub mod traits;

pub use google::GooglePlacesClient;
pub use retry::{RetryConfig, Sleeper, TokioSleeper};
pub use traits::{PhotoProvider, PlaceProvider};
