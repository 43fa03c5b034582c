//! Navigation button placement around the lightbox image.
//!
//! The previous/next buttons sit beside the displayed image rather than on
//! top of it. Wide images push the buttons further out, and the buttons are
//! always kept inside the lightbox panel:
//!
//! ```text
//!  panel
//! ┌──────────────────────────────────────────────┐
//! │ 8px                                      8px │
//! │  [<] spacing ┌──────────────┐ spacing [>]    │
//! │              │    image     │                │
//! │              └──────────────┘                │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! `spacing = max(side_margin, round(ratio × image_width))`. Everything here
//! is pure arithmetic on rectangles in viewport coordinates; the browser
//! binding measures the elements and applies the result.

use crate::config::LayoutConfig;

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// True when either dimension is zero, i.e. nothing has been laid out yet.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlap of two rectangles; empty (zero-sized) when they do not touch.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }
}

/// Rendered size of a button (`offsetWidth` / `offsetHeight`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Top-left corner of a button, relative to the panel, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub left: i64,
    pub top: i64,
}

/// Where both navigation buttons go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavPlacement {
    pub prev: Position,
    pub next: Position,
}

/// Everything measured from the page that placement needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    /// Rendered image, viewport coordinates.
    pub image: Rect,
    /// Lightbox panel, viewport coordinates.
    pub panel: Rect,
    pub prev: Size,
    pub next: Size,
}

/// Spacing rules for [`place_nav_buttons`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavLayout {
    pub side_margin: f64,
    pub side_spacing_ratio: f64,
    pub edge_margin: f64,
}

impl Default for NavLayout {
    fn default() -> Self {
        Self::from(&LayoutConfig::default())
    }
}

impl From<&LayoutConfig> for NavLayout {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            side_margin: config.side_margin_px,
            side_spacing_ratio: config.side_spacing_ratio,
            edge_margin: config.edge_margin_px,
        }
    }
}

/// Round half-way cases towards positive infinity, like CSS pixel snapping
/// in the browser (`-2.5` becomes `-2`, `2.5` becomes `3`).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Compute button positions beside the image.
///
/// Returns `None` while the image has no rendered size; callers then leave
/// the buttons where they are.
pub fn place_nav_buttons(m: &Measurements, layout: &NavLayout) -> Option<NavPlacement> {
    if m.image.is_empty() {
        return None;
    }

    let image_left = m.image.left - m.panel.left;
    let image_right = image_left + m.image.width;
    let center_y = m.image.top - m.panel.top + m.image.height / 2.0;

    let spacing = layout
        .side_margin
        .max(round_half_up(m.image.width * layout.side_spacing_ratio));
    let prev_left = image_left - m.prev.width - spacing;
    let next_left = image_right + spacing;

    let clamp = |candidate: f64, button: Size| {
        let max_left = m.panel.width - button.width - layout.edge_margin;
        layout.edge_margin.max(candidate.min(max_left))
    };
    let position = |candidate: f64, button: Size| Position {
        left: round_half_up(clamp(candidate, button)) as i64,
        top: round_half_up(center_y - button.height / 2.0) as i64,
    };

    Some(NavPlacement {
        prev: position(prev_left, m.prev),
        next: position(next_left, m.next),
    })
}
