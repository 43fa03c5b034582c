//! Page behavior configuration.
//!
//! Handles loading, validating, and merging `lightbox.toml` files, and
//! parsing the JSON blob the browser module reads from the page. Every value
//! has a stock default matching the stock page markup, so a page with no
//! configuration at all behaves exactly like the defaults below.
//!
//! ## Where Configuration Lives
//!
//! Authors keep a `lightbox.toml` next to their site sources and export it to
//! JSON with the CLI:
//!
//! ```text
//! lightbox-reveal export --config site/ > site/lightbox-config.json
//! ```
//!
//! The JSON is embedded in the page as
//! `<script type="application/json" id="lightbox-reveal-config">`. The
//! browser module parses it on startup; anything missing keeps its default.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [reveal]
//! selectors = [".app-card", ".timeline-event", ".intro-content", "section"]
//! threshold = 0.1           # Share of the element that must be visible
//! bottom_margin_px = 50     # Viewport shrink at the bottom edge
//! offset_px = 30            # Initial downward offset
//! duration_secs = 0.6       # Opacity/transform transition length
//! easing = "ease"
//!
//! [lightbox]
//! item_selector = ".galerie-full-item"
//! source_attribute = "data-src"
//! caption_attribute = "data-caption"
//! panel_selector = ".lightbox-content"
//! hidden_class = "lightbox-hidden"
//! visible_class = "lightbox-visible"
//! autoplay_interval_ms = 3000
//!
//! [lightbox.elements]
//! modal = "lightbox-modal"
//! image = "lightbox-img"
//! caption = "lightbox-caption"
//! prev = "lb-prev"
//! next = "lb-next"
//! close = "lb-close"
//! play = "lb-play"
//!
//! [layout]
//! side_margin_px = 12       # Minimum gap between image and buttons
//! side_spacing_ratio = 0.06 # Gap as a share of the image width
//! edge_margin_px = 8        # Minimum gap between buttons and panel edge
//! button_z_index = 6000
//! load_settle_ms = 30       # Delay after image load before measuring
//! resize_settle_ms = 50     # Delay after window resize before measuring
//! open_settle_ms = 50       # Delay after opening before measuring
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE: &str = "lightbox.toml";

/// Element id of the inline JSON config block in the page.
pub const PAGE_CONFIG_ID: &str = "lightbox-reveal-config";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Behavior configuration for one page.
///
/// All fields have defaults. Config files need only specify the values they
/// want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Scroll-reveal settings.
    pub reveal: RevealConfig,
    /// Lightbox markup contract and autoplay settings.
    pub lightbox: LightboxConfig,
    /// Navigation button placement and layout-settle delays.
    pub layout: LayoutConfig,
}

impl PageConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reveal = &self.reveal;
        if reveal.selectors.is_empty() {
            return Err(ConfigError::Validation(
                "reveal.selectors must not be empty".into(),
            ));
        }
        if reveal.selectors.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "reveal.selectors must not contain blank entries".into(),
            ));
        }
        if !(0.0..=1.0).contains(&reveal.threshold) {
            return Err(ConfigError::Validation(
                "reveal.threshold must be between 0 and 1".into(),
            ));
        }
        if !(reveal.duration_secs.is_finite() && reveal.duration_secs > 0.0) {
            return Err(ConfigError::Validation(
                "reveal.duration_secs must be a positive number".into(),
            ));
        }

        let lightbox = &self.lightbox;
        if lightbox.autoplay_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "lightbox.autoplay_interval_ms must be non-zero".into(),
            ));
        }
        for (key, value) in lightbox.named_values() {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "lightbox.{key} must not be empty"
                )));
            }
        }
        if lightbox.hidden_class == lightbox.visible_class {
            return Err(ConfigError::Validation(
                "lightbox.hidden_class and lightbox.visible_class must differ".into(),
            ));
        }

        let layout = &self.layout;
        if !(0.0..1.0).contains(&layout.side_spacing_ratio) {
            return Err(ConfigError::Validation(
                "layout.side_spacing_ratio must be in [0, 1)".into(),
            ));
        }
        for (key, value) in [
            ("side_margin_px", layout.side_margin_px),
            ("edge_margin_px", layout.edge_margin_px),
        ] {
            // NaN compares false both ways, so test for the valid range.
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Validation(format!(
                    "layout.{key} must be a non-negative number"
                )));
            }
        }
        Ok(())
    }
}

/// Scroll-reveal settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// CSS selectors whose matches fade in on first sight.
    pub selectors: Vec<String>,
    /// Share of the element's area that must be inside the viewport (0-1).
    pub threshold: f64,
    /// How far the viewport's bottom edge is pulled up before testing.
    pub bottom_margin_px: u32,
    /// Initial downward offset of hidden elements.
    pub offset_px: u32,
    /// Transition length for opacity and transform.
    pub duration_secs: f64,
    /// CSS timing function for the transition.
    pub easing: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selectors: vec![
                ".app-card".to_string(),
                ".timeline-event".to_string(),
                ".intro-content".to_string(),
                "section".to_string(),
            ],
            threshold: 0.1,
            bottom_margin_px: 50,
            offset_px: 30,
            duration_secs: 0.6,
            easing: "ease".to_string(),
        }
    }
}

impl RevealConfig {
    /// All selectors joined into one selector list for `querySelectorAll`.
    pub fn selector_list(&self) -> String {
        self.selectors.join(", ")
    }
}

/// Lightbox markup contract and autoplay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    /// Selector matching gallery items, in gallery order.
    pub item_selector: String,
    /// Attribute on each item holding the full-size image source.
    pub source_attribute: String,
    /// Attribute on each item holding the optional caption.
    pub caption_attribute: String,
    /// Selector of the panel the navigation buttons are positioned in.
    pub panel_selector: String,
    /// Class present on the modal while it is closed.
    pub hidden_class: String,
    /// Class present on the modal while it is open.
    pub visible_class: String,
    /// Autoplay period in milliseconds.
    pub autoplay_interval_ms: u32,
    /// Ids of the modal and its controls.
    pub elements: ElementIds,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            item_selector: ".galerie-full-item".to_string(),
            source_attribute: "data-src".to_string(),
            caption_attribute: "data-caption".to_string(),
            panel_selector: ".lightbox-content".to_string(),
            hidden_class: "lightbox-hidden".to_string(),
            visible_class: "lightbox-visible".to_string(),
            autoplay_interval_ms: 3000,
            elements: ElementIds::default(),
        }
    }
}

impl LightboxConfig {
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.autoplay_interval_ms))
    }

    fn named_values(&self) -> [(&'static str, &str); 13] {
        let ids = &self.elements;
        [
            ("item_selector", self.item_selector.as_str()),
            ("source_attribute", self.source_attribute.as_str()),
            ("caption_attribute", self.caption_attribute.as_str()),
            ("panel_selector", self.panel_selector.as_str()),
            ("hidden_class", self.hidden_class.as_str()),
            ("visible_class", self.visible_class.as_str()),
            ("elements.modal", ids.modal.as_str()),
            ("elements.image", ids.image.as_str()),
            ("elements.caption", ids.caption.as_str()),
            ("elements.prev", ids.prev.as_str()),
            ("elements.next", ids.next.as_str()),
            ("elements.close", ids.close.as_str()),
            ("elements.play", ids.play.as_str()),
        ]
    }
}

/// Element ids of the lightbox modal and its controls.
///
/// The modal, image and caption are required for the lightbox to run.
/// Missing controls only disable their own click handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementIds {
    pub modal: String,
    pub image: String,
    pub caption: String,
    pub prev: String,
    pub next: String,
    pub close: String,
    pub play: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            modal: "lightbox-modal".to_string(),
            image: "lightbox-img".to_string(),
            caption: "lightbox-caption".to_string(),
            prev: "lb-prev".to_string(),
            next: "lb-next".to_string(),
            close: "lb-close".to_string(),
            play: "lb-play".to_string(),
        }
    }
}

/// Navigation button placement and layout-settle delays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Minimum horizontal gap between the image and each button.
    pub side_margin_px: f64,
    /// Gap as a share of the rendered image width; the larger gap wins.
    pub side_spacing_ratio: f64,
    /// Minimum gap between a button and the panel edge.
    pub edge_margin_px: f64,
    /// Stacking order applied to positioned buttons.
    pub button_z_index: i32,
    /// Delay after the image `load` event before measuring.
    pub load_settle_ms: u32,
    /// Delay after a window resize before measuring.
    pub resize_settle_ms: u32,
    /// Delay after opening the lightbox before measuring.
    pub open_settle_ms: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            side_margin_px: 12.0,
            side_spacing_ratio: 0.06,
            edge_margin_px: 8.0,
            button_z_index: 6000,
            load_settle_ms: 30,
            resize_settle_ms: 50,
            open_settle_ms: 50,
        }
    }
}

impl LayoutConfig {
    pub fn load_settle(&self) -> Duration {
        Duration::from_millis(u64::from(self.load_settle_ms))
    }

    pub fn resize_settle(&self) -> Duration {
        Duration::from_millis(u64::from(self.resize_settle_ms))
    }

    pub fn open_settle(&self) -> Duration {
        Duration::from_millis(u64::from(self.open_settle_ms))
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(PageConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `lightbox.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `lightbox.toml`.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<PageConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: PageConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `lightbox.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<PageConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Parse the page-embedded JSON config.
///
/// Missing keys keep their defaults, exactly like sparse TOML files.
pub fn from_json(json: &str) -> Result<PageConfig, ConfigError> {
    let config: PageConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Serialize a config into the JSON blob embedded in the page.
pub fn to_json(config: &PageConfig, pretty: bool) -> Result<String, ConfigError> {
    let json = if pretty {
        serde_json::to_string_pretty(config)?
    } else {
        serde_json::to_string(config)?
    };
    Ok(json)
}

/// Returns a fully-commented stock `lightbox.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# lightbox-reveal Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Export to the JSON the page reads with:
#   lightbox-reveal export --config <dir-containing-this-file>
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Scroll reveal
# ---------------------------------------------------------------------------
[reveal]
# Elements matching any of these selectors fade and slide in on first sight.
selectors = [".app-card", ".timeline-event", ".intro-content", "section"]

# Share of an element (0-1) that must be inside the viewport to reveal it.
threshold = 0.1

# The viewport's bottom edge is pulled up by this many pixels, so elements
# reveal slightly before they reach the real bottom of the screen.
bottom_margin_px = 50

# Hidden elements start this many pixels below their final position.
offset_px = 30

# Transition length (seconds) and timing function.
duration_secs = 0.6
easing = "ease"

# ---------------------------------------------------------------------------
# Lightbox
# ---------------------------------------------------------------------------
[lightbox]
# Gallery items, in order. Each carries its image source and caption.
item_selector = ".galerie-full-item"
source_attribute = "data-src"
caption_attribute = "data-caption"

# Panel that the navigation buttons are positioned inside.
panel_selector = ".lightbox-content"

# Exactly one of these classes is on the modal at any time.
hidden_class = "lightbox-hidden"
visible_class = "lightbox-visible"

# Autoplay (toggled with Space) advances every this many milliseconds.
autoplay_interval_ms = 3000

# Element ids. modal, image and caption are required; a missing control only
# disables its own button.
[lightbox.elements]
modal = "lightbox-modal"
image = "lightbox-img"
caption = "lightbox-caption"
prev = "lb-prev"
next = "lb-next"
close = "lb-close"
play = "lb-play"

# ---------------------------------------------------------------------------
# Navigation button layout
# ---------------------------------------------------------------------------
[layout]
# Gap between image and buttons: the larger of side_margin_px and
# side_spacing_ratio x rendered image width.
side_margin_px = 12.0
side_spacing_ratio = 0.06

# Buttons never come closer than this to the panel edge.
edge_margin_px = 8.0

button_z_index = 6000

# Delays (ms) that let layout settle before the buttons are measured.
load_settle_ms = 30
resize_settle_ms = 50
open_settle_ms = 50
"##
}
