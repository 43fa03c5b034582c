//! CLI output formatting for `lightbox-reveal check`.
//!
//! Prints the resolved configuration as the page will experience it, grouped
//! by feature, with the source file (if any) as secondary context:
//!
//! ```text
//! Reveal
//!     Selectors: .app-card, .timeline-event, .intro-content, section
//!     Trigger: 10% visible, 50px above the viewport bottom
//!     Motion: 30px slide, 0.6s ease
//!
//! Lightbox
//!     Items: .galerie-full-item (data-src, data-caption)
//!     Modal: #lightbox-modal, image #lightbox-img, caption #lightbox-caption
//!     Controls: #lb-prev #lb-next #lb-close #lb-play
//!     Autoplay: every 3000ms
//!
//! Layout
//!     Button spacing: max(12px, 6% of image width), 8px from panel edge
//!     Settle delays: load 30ms, resize 50ms, open 50ms
//!
//! Config
//!     site/lightbox.toml
//! ```
//!
//! `format_check_output` is pure and returns lines for testability;
//! `print_check_output` writes them to stdout.

use crate::config::{CONFIG_FILE, PageConfig};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn percent(ratio: f64) -> String {
    format!("{}%", (ratio * 100.0).round())
}

/// Format the summary of a resolved config.
///
/// `config_dir` is where `lightbox.toml` was looked up; the Config section
/// names the file only when it exists.
pub fn format_check_output(config: &PageConfig, config_dir: &Path) -> Vec<String> {
    let reveal = &config.reveal;
    let lightbox = &config.lightbox;
    let ids = &lightbox.elements;
    let layout = &config.layout;
    let mut lines = Vec::new();

    lines.push("Reveal".to_string());
    lines.push(format!("{}Selectors: {}", indent(1), reveal.selector_list()));
    lines.push(format!(
        "{}Trigger: {} visible, {}px above the viewport bottom",
        indent(1),
        percent(reveal.threshold),
        reveal.bottom_margin_px
    ));
    lines.push(format!(
        "{}Motion: {}px slide, {}s {}",
        indent(1),
        reveal.offset_px,
        reveal.duration_secs,
        reveal.easing
    ));
    lines.push(String::new());

    lines.push("Lightbox".to_string());
    lines.push(format!(
        "{}Items: {} ({}, {})",
        indent(1),
        lightbox.item_selector,
        lightbox.source_attribute,
        lightbox.caption_attribute
    ));
    lines.push(format!(
        "{}Modal: #{}, image #{}, caption #{}",
        indent(1),
        ids.modal,
        ids.image,
        ids.caption
    ));
    lines.push(format!(
        "{}Controls: #{} #{} #{} #{}",
        indent(1),
        ids.prev,
        ids.next,
        ids.close,
        ids.play
    ));
    lines.push(format!(
        "{}Autoplay: every {}ms",
        indent(1),
        lightbox.autoplay_interval_ms
    ));
    lines.push(String::new());

    lines.push("Layout".to_string());
    lines.push(format!(
        "{}Button spacing: max({}px, {} of image width), {}px from panel edge",
        indent(1),
        layout.side_margin_px,
        percent(layout.side_spacing_ratio),
        layout.edge_margin_px
    ));
    lines.push(format!(
        "{}Settle delays: load {}ms, resize {}ms, open {}ms",
        indent(1),
        layout.load_settle_ms,
        layout.resize_settle_ms,
        layout.open_settle_ms
    ));

    let config_path = config_dir.join(CONFIG_FILE);
    if config_path.exists() {
        lines.push(String::new());
        lines.push("Config".to_string());
        lines.push(format!("{}{}", indent(1), config_path.display()));
    }

    lines
}

/// Print check output to stdout.
pub fn print_check_output(config: &PageConfig, config_dir: &Path) {
    for line in format_check_output(config, config_dir) {
        println!("{}", line);
    }
}
