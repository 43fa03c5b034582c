//! Gallery data shared by the lightbox controller and the browser binding.

use serde::{Deserialize, Serialize};

/// One image in the lightbox gallery.
///
/// Items are read once from the page's gallery markup and never change.
/// They are identified by their position in the [`Gallery`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Full-size image source shown in the lightbox.
    pub src: String,
    /// Caption shown under the image, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl GalleryItem {
    pub fn new(src: impl Into<String>, caption: Option<String>) -> Self {
        Self {
            src: src.into(),
            caption,
        }
    }

    /// Build an item from a gallery element's attribute values.
    ///
    /// A missing source becomes an empty one so the item keeps its position;
    /// an empty caption counts as no caption.
    pub fn from_attributes(src: Option<String>, caption: Option<String>) -> Self {
        Self {
            src: src.unwrap_or_default(),
            caption: caption.filter(|c| !c.is_empty()),
        }
    }

    /// Caption text for display; empty when the item has none.
    pub fn caption_text(&self) -> &str {
        self.caption.as_deref().unwrap_or("")
    }
}

/// Ordered, non-empty sequence of gallery items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    items: Vec<GalleryItem>,
}

impl Gallery {
    /// Build a gallery, or `None` when there is nothing to show.
    pub fn new(items: Vec<GalleryItem>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    /// Map any integer onto a valid position, wrapping in both directions.
    ///
    /// With 5 items, `-1` maps to `4` and `5` maps to `0`.
    pub fn normalize(&self, index: i64) -> usize {
        let len = self.items.len() as i64;
        index.rem_euclid(len) as usize
    }

    pub fn get(&self, index: usize) -> Option<&GalleryItem> {
        self.items.get(index)
    }
}
