//! Scroll-triggered reveal of page sections.
//!
//! Every element matching one of the configured selectors starts invisible
//! and shifted down. The first time the intersection watcher reports it in
//! view, it fades and slides into place. There is no un-reveal: once shown,
//! an element stays shown, and later reports re-apply the same final style.
//!
//! The animator only decides *which style* an element gets. The browser
//! binding owns the actual `IntersectionObserver` and feeds its entries to
//! [`RevealAnimator::handle_entry`]; [`Intersection::measure`] reproduces the
//! observer's decision for code that runs without a browser.

use crate::config::RevealConfig;
use crate::geometry::Rect;

/// Anything whose inline style can be set, one CSS property at a time.
pub trait Stylable {
    fn set_style(&self, property: &str, value: &str);
}

/// Intersection watcher settings.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    /// Share of the target that must be visible (0-1).
    pub threshold: f64,
    /// Pixels removed from the bottom of the viewport before testing.
    pub bottom_margin: f64,
}

impl WatchOptions {
    /// The margin in `IntersectionObserver` `rootMargin` syntax.
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin)
    }

    /// The viewport as the watcher sees it: shrunk at the bottom.
    pub fn effective_viewport(&self, viewport: Rect) -> Rect {
        Rect::new(
            viewport.left,
            viewport.top,
            viewport.width,
            (viewport.height - self.bottom_margin).max(0.0),
        )
    }
}

impl From<&RevealConfig> for WatchOptions {
    fn from(config: &RevealConfig) -> Self {
        Self {
            threshold: config.threshold,
            bottom_margin: f64::from(config.bottom_margin_px),
        }
    }
}

/// One report from the intersection watcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// The watcher considers the target visible enough.
    pub is_intersecting: bool,
    /// Visible share of the target (0-1).
    pub ratio: f64,
}

impl Intersection {
    /// Compute what the watcher would report for `target` inside `viewport`.
    pub fn measure(target: Rect, viewport: Rect, options: &WatchOptions) -> Self {
        let area = target.area();
        if area == 0.0 {
            return Self {
                is_intersecting: false,
                ratio: 0.0,
            };
        }
        let visible = target.intersection(&options.effective_viewport(viewport));
        let ratio = visible.area() / area;
        Self {
            is_intersecting: ratio > 0.0 && ratio >= options.threshold,
            ratio,
        }
    }
}

/// Applies the hidden and revealed styles.
#[derive(Debug, Clone)]
pub struct RevealAnimator {
    options: WatchOptions,
    hidden_transform: String,
    transition: String,
}

impl RevealAnimator {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            options: WatchOptions::from(config),
            hidden_transform: format!("translateY({}px)", config.offset_px),
            transition: format!(
                "opacity {d}s {e}, transform {d}s {e}",
                d = config.duration_secs,
                e = config.easing
            ),
        }
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    /// Put a target into its initial, hidden state.
    pub fn prepare(&self, target: &impl Stylable) {
        target.set_style("opacity", "0");
        target.set_style("transform", &self.hidden_transform);
        target.set_style("transition", &self.transition);
    }

    /// Reveal the target if the watcher reports it visible.
    ///
    /// Returns whether the revealed style was applied.
    pub fn handle_entry(&self, target: &impl Stylable, entry: Intersection) -> bool {
        if !entry.is_intersecting {
            return false;
        }
        target.set_style("opacity", "1");
        target.set_style("transform", "translateY(0)");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::FakeElement;

    fn animator() -> RevealAnimator {
        RevealAnimator::new(&RevealConfig::default())
    }

    const VIEWPORT: Rect = Rect {
        left: 0.0,
        top: 0.0,
        width: 1200.0,
        height: 800.0,
    };

    #[test]
    fn prepare_hides_and_offsets() {
        let el = FakeElement::default();
        animator().prepare(&el);
        assert_eq!(el.style("opacity").as_deref(), Some("0"));
        assert_eq!(el.style("transform").as_deref(), Some("translateY(30px)"));
        assert_eq!(
            el.style("transition").as_deref(),
            Some("opacity 0.6s ease, transform 0.6s ease")
        );
    }

    #[test]
    fn intersecting_entry_reveals() {
        let el = FakeElement::default();
        let animator = animator();
        animator.prepare(&el);
        let revealed = animator.handle_entry(
            &el,
            Intersection {
                is_intersecting: true,
                ratio: 0.2,
            },
        );
        assert!(revealed);
        assert_eq!(el.style("opacity").as_deref(), Some("1"));
        assert_eq!(el.style("transform").as_deref(), Some("translateY(0)"));
    }

    #[test]
    fn leaving_the_viewport_does_not_unreveal() {
        let el = FakeElement::default();
        let animator = animator();
        animator.prepare(&el);
        let shown = Intersection {
            is_intersecting: true,
            ratio: 1.0,
        };
        let gone = Intersection {
            is_intersecting: false,
            ratio: 0.0,
        };
        animator.handle_entry(&el, shown);
        assert!(!animator.handle_entry(&el, gone));
        assert_eq!(el.style("opacity").as_deref(), Some("1"));

        // Re-entering re-applies the same terminal style.
        animator.handle_entry(&el, shown);
        assert_eq!(el.style("opacity").as_deref(), Some("1"));
    }

    #[test]
    fn element_never_in_view_stays_hidden() {
        let el = FakeElement::default();
        let animator = animator();
        animator.prepare(&el);
        // Far below the fold, scrolled through several positions above it.
        let target = Rect::new(0.0, 5000.0, 1200.0, 400.0);
        for scroll in (0..3000).step_by(250) {
            let viewport = Rect::new(0.0, f64::from(scroll), 1200.0, 800.0);
            let entry = Intersection::measure(target, viewport, animator.options());
            animator.handle_entry(&el, entry);
        }
        assert_eq!(el.style("opacity").as_deref(), Some("0"));
    }

    #[test]
    fn measure_applies_threshold() {
        let options = WatchOptions::from(&RevealConfig::default());
        // 400px tall target with 30px inside the shrunk viewport (750px).
        let barely = Rect::new(0.0, 720.0, 100.0, 400.0);
        let entry = Intersection::measure(barely, VIEWPORT, &options);
        assert!(!entry.is_intersecting);
        assert!((entry.ratio - 0.075).abs() < 1e-9);

        // 50px inside: 12.5% visible.
        let enough = Rect::new(0.0, 700.0, 100.0, 400.0);
        assert!(Intersection::measure(enough, VIEWPORT, &options).is_intersecting);
    }

    #[test]
    fn bottom_margin_delays_reveal() {
        let options = WatchOptions::from(&RevealConfig::default());
        // Fully inside the real viewport's bottom 50px, outside the shrunk one.
        let target = Rect::new(0.0, 760.0, 100.0, 40.0);
        assert!(!Intersection::measure(target, VIEWPORT, &options).is_intersecting);

        let no_margin = WatchOptions {
            bottom_margin: 0.0,
            ..options
        };
        assert!(Intersection::measure(target, VIEWPORT, &no_margin).is_intersecting);
    }

    #[test]
    fn zero_sized_target_never_intersects() {
        let options = WatchOptions::from(&RevealConfig::default());
        let target = Rect::new(10.0, 10.0, 0.0, 0.0);
        assert!(!Intersection::measure(target, VIEWPORT, &options).is_intersecting);
    }

    #[test]
    fn root_margin_syntax() {
        let options = WatchOptions::from(&RevealConfig::default());
        assert_eq!(options.root_margin(), "0px 0px -50px 0px");
    }

    #[test]
    fn custom_offset_and_duration() {
        let config = RevealConfig {
            offset_px: 12,
            duration_secs: 1.25,
            easing: "ease-out".into(),
            ..RevealConfig::default()
        };
        let el = FakeElement::default();
        RevealAnimator::new(&config).prepare(&el);
        assert_eq!(el.style("transform").as_deref(), Some("translateY(12px)"));
        assert_eq!(
            el.style("transition").as_deref(),
            Some("opacity 1.25s ease-out, transform 1.25s ease-out")
        );
    }
}
