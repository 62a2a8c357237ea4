//! Sightseer error types

use std::time::Duration;

/// Sightseer error types
#[derive(Debug, thiserror::Error)]
pub enum SightseerError {
    // Orchestrator outcomes
    /// Place resolution exhausted its attempts without a match.
    #[error("no results for '{0}'")]
    NoResults(String),

    /// A place matched but carries no photo reference to display.
    #[error("place {0} has no photos")]
    PlaceMissingPhoto(String),

    /// The photo provider call itself failed.
    #[error("photo fetch failed: {0}")]
    PhotoFetchFailed(String),

    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("not found: {0}")]
    NotFound(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl SightseerError {
    /// Short label used for the `kind` metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoResults(_) => "no_results",
            Self::PlaceMissingPhoto(_) => "place_missing_photo",
            Self::PhotoFetchFailed(_) => "photo_fetch_failed",
            Self::Http(_) => "http",
            Self::Api { .. } => "api",
            Self::RateLimited { .. } => "rate_limited",
            Self::AuthenticationFailed => "authentication_failed",
            Self::NotFound(_) => "not_found",
            Self::Json(_) => "json",
            Self::InvalidInput(_) => "invalid_input",
            Self::Configuration(_) => "configuration",
        }
    }
}

impl From<reqwest::Error> for SightseerError {
    fn from(err: reqwest::Error) -> Self {
        SightseerError::Http(err.to_string())
    }
}

/// Result type alias for Sightseer operations
pub type Result<T> = std::result::Result<T, SightseerError>;
