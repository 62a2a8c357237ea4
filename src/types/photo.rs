//! Photo handles, size bounds, and fetched images.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Credit line the provider requires to be shown alongside a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub display_name: String,
    pub uri: Option<String>,
}

/// Opaque provider handle for a photo, plus its native size.
///
/// Owned by the [`PlaceRecord`](super::PlaceRecord) that lists it. Used only
/// as input to photo resolution and, via [`cache_key_for()`](Self::cache_key_for),
/// to derive image cache keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoReference {
    /// Provider resource name, e.g. `places/{place}/photos/{photo}`.
    pub name: String,
    pub width_px: u32,
    pub height_px: u32,
    #[serde(default)]
    pub attributions: Vec<Attribution>,
}

impl PhotoReference {
    pub fn new(name: impl Into<String>, width_px: u32, height_px: u32) -> Self {
        Self {
            name: name.into(),
            width_px,
            height_px,
            attributions: Vec::new(),
        }
    }

    /// Stable image cache key for this photo rendered within `size`.
    ///
    /// Derived from the resource name, native dimensions and the requested
    /// bound, so each rendition is cached separately. Attributions are
    /// display data and do not participate.
    pub fn cache_key_for(&self, size: PhotoSize) -> String {
        let mut hasher = DefaultHasher::new();
        self.name.hash(&mut hasher);
        self.width_px.hash(&mut hasher);
        self.height_px.hash(&mut hasher);
        size.hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }
}

/// Upper bound on the pixel size of a fetched photo.
///
/// The provider scales the photo down to fit while keeping its aspect ratio.
/// Callers pick the tier for their display context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhotoSize {
    pub max_width_px: u32,
    pub max_height_px: u32,
}

impl PhotoSize {
    /// Largest bound the provider accepts on either axis.
    pub const MAX_PX: u32 = 4800;

    pub fn new(max_width_px: u32, max_height_px: u32) -> Self {
        Self {
            max_width_px: max_width_px.clamp(1, Self::MAX_PX),
            max_height_px: max_height_px.clamp(1, Self::MAX_PX),
        }
    }

    /// Thumbnail tier (carousel cells, compact layouts).
    pub fn compact() -> Self {
        Self::new(400, 400)
    }

    /// Full-width tier (detail views, regular layouts).
    pub fn expanded() -> Self {
        Self::new(1600, 1600)
    }
}

impl Default for PhotoSize {
    fn default() -> Self {
        Self::compact()
    }
}

/// A fetched photo.
///
/// Holds the encoded bytes exactly as served together with their media type.
/// Cloning is cheap; the byte buffer is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub data: Arc<[u8]>,
    pub content_type: String,
}

impl Image {
    pub fn new(data: impl Into<Arc<[u8]>>, content_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into(),
        }
    }

    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// File extension matching the media type, for writing to disk.
    pub fn extension(&self) -> &'static str {
        match self.content_type.split(';').next().map(str::trim) {
            Some("image/png") => "png",
            Some("image/webp") => "webp",
            Some("image/gif") => "gif",
            _ => "jpg",
        }
    }
}
