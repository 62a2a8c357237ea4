//! User reviews attached to a place.

use serde::{Deserialize, Serialize};

/// A single user review attached to a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    /// Star rating, 1–5.
    pub rating: u8,
    pub text: Option<String>,
    /// Provider-formatted age, e.g. "a month ago".
    pub relative_time: Option<String>,
}

impl Review {
    pub fn new(author: impl Into<String>, rating: u8) -> Self {
        Self {
            author: author.into(),
            rating,
            text: None,
            relative_time: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}
