//! Keys the lightbox reacts to.

/// A key press, reduced to what the lightbox cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Space,
    Other,
}

impl Key {
    /// Classify a DOM `KeyboardEvent` from its `key` and `code` fields.
    ///
    /// Space is matched on either field: `key` is `" "` on most layouts but
    /// some input methods only report `code == "Space"`.
    pub fn from_dom(key: &str, code: &str) -> Self {
        match key {
            "Escape" => Key::Escape,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            " " => Key::Space,
            _ if code == "Space" => Key::Space,
            _ => Key::Other,
        }
    }
}
