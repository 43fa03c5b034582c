//! Shared test doubles for the reveal and lightbox modules.
//!
//! Provides an in-memory modal ([`FakeView`]), a manual clock
//! ([`ManualScheduler`]) and a style-recording element ([`FakeElement`]), so
//! controller behavior can be exercised without a browser.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let mut lb = test_lightbox(3);
//! lb.open_at(0);
//! lb.start_autoplay();
//! advance(&mut lb, 3000);
//! assert_eq!(lb.current_index(), 1);
//! ```

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use crate::config::PageConfig;
use crate::geometry::{Measurements, NavPlacement};
use crate::lightbox::{Lightbox, LightboxError, LightboxEvent, LightboxView, Scheduler, TimerEvent};
use crate::reveal::Stylable;
use crate::types::{Gallery, GalleryItem};

const HIDDEN: &str = "lightbox-hidden";
const VISIBLE: &str = "lightbox-visible";

// =========================================================================
// Fixture setup
// =========================================================================

/// A closed lightbox over `n` items named `img/{i}.jpg`.
///
/// Every item is captioned `Caption {i}` except the last one of galleries
/// with more than three items, which has no caption.
pub fn test_lightbox(n: usize) -> Lightbox<FakeView, ManualScheduler> {
    let items = (0..n)
        .map(|i| {
            let caption = (n <= 3 || i + 1 < n).then(|| format!("Caption {i}"));
            GalleryItem::new(format!("img/{i}.jpg"), caption)
        })
        .collect();
    let gallery = Gallery::new(items).expect("test gallery must not be empty");
    Lightbox::new(
        gallery,
        FakeView::default(),
        ManualScheduler::default(),
        &PageConfig::default(),
    )
}

/// Move the manual clock forward, dispatching every timer that comes due.
pub fn advance(lb: &mut Lightbox<FakeView, ManualScheduler>, ms: u64) {
    let until = lb.scheduler().now + ms;
    while let Some(event) = lb.scheduler_mut().pop_due(until) {
        lb.dispatch(LightboxEvent::Timer(event));
    }
    lb.scheduler_mut().now = until;
}

// =========================================================================
// FakeView
// =========================================================================

/// In-memory modal that records what the controller did to it.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeView {
    pub classes: BTreeSet<&'static str>,
    pub src: String,
    pub caption: String,
    pub aria_hidden: Option<bool>,
    pub close_focus_count: usize,
    pub show_count: usize,
    pub measurements: Option<Measurements>,
    pub placements: Vec<NavPlacement>,
}

impl Default for FakeView {
    fn default() -> Self {
        Self {
            classes: BTreeSet::from([HIDDEN]),
            src: String::new(),
            caption: String::new(),
            aria_hidden: Some(true),
            close_focus_count: 0,
            show_count: 0,
            measurements: None,
            placements: Vec::new(),
        }
    }
}

impl FakeView {
    pub fn has_exactly_one_visibility_class(&self) -> bool {
        self.classes.contains(HIDDEN) != self.classes.contains(VISIBLE)
    }
}

impl LightboxView for FakeView {
    fn show(&mut self, item: &GalleryItem) {
        self.src = item.src.clone();
        self.caption = item.caption_text().to_string();
        self.classes.remove(HIDDEN);
        self.classes.insert(VISIBLE);
        self.aria_hidden = Some(false);
        self.close_focus_count += 1;
        self.show_count += 1;
    }

    fn hide(&mut self) {
        self.classes.remove(VISIBLE);
        self.classes.insert(HIDDEN);
        self.aria_hidden = Some(true);
        self.src.clear();
        self.caption.clear();
    }

    fn is_visible(&self) -> bool {
        self.classes.contains(VISIBLE)
    }

    fn measure(&self) -> Option<Measurements> {
        self.measurements
    }

    fn place_buttons(&mut self, placement: &NavPlacement) {
        self.placements.push(*placement);
    }
}

// =========================================================================
// ManualScheduler
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalId(u64);

#[derive(Debug)]
struct ScheduledInterval {
    id: u64,
    period: u64,
    next_fire: u64,
    event: TimerEvent,
}

#[derive(Debug)]
struct Deferred {
    at: u64,
    seq: u64,
    event: TimerEvent,
}

/// Clock that only moves when a test says so. Times are in milliseconds.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pub now: u64,
    /// Intervals ever started.
    pub started: usize,
    /// Intervals ever cancelled.
    pub cancelled: usize,
    /// Make `start_interval` fail, like a browser refusing the timer.
    pub fail_intervals: bool,
    next_id: u64,
    intervals: Vec<ScheduledInterval>,
    deferred: Vec<Deferred>,
}

impl ManualScheduler {
    pub fn active_intervals(&self) -> usize {
        self.intervals.len()
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// advancing `now` to its firing time. Deferrals win ties.
    pub fn pop_due(&mut self, until: u64) -> Option<TimerEvent> {
        let deferred = self
            .deferred
            .iter()
            .enumerate()
            .filter(|(_, d)| d.at <= until)
            .min_by_key(|(_, d)| (d.at, d.seq))
            .map(|(i, d)| (i, d.at));
        let interval = self
            .intervals
            .iter()
            .enumerate()
            .filter(|(_, iv)| iv.next_fire <= until)
            .min_by_key(|(_, iv)| iv.next_fire)
            .map(|(i, iv)| (i, iv.next_fire));

        match (deferred, interval) {
            (Some((i, at)), Some((_, fire))) if at <= fire => Some(self.fire_deferred(i)),
            (Some((i, _)), None) => Some(self.fire_deferred(i)),
            (_, Some((i, _))) => {
                let iv = &mut self.intervals[i];
                self.now = iv.next_fire;
                iv.next_fire += iv.period;
                Some(iv.event)
            }
            (None, None) => None,
        }
    }

    fn fire_deferred(&mut self, index: usize) -> TimerEvent {
        let d = self.deferred.remove(index);
        self.now = d.at;
        d.event
    }
}

impl Scheduler for ManualScheduler {
    type Interval = IntervalId;

    fn start_interval(
        &mut self,
        period: Duration,
        event: TimerEvent,
    ) -> Result<IntervalId, LightboxError> {
        if self.fail_intervals {
            return Err(LightboxError::Schedule("interval refused".into()));
        }
        let period = period.as_millis() as u64;
        assert!(period > 0, "zero-period interval would never let time advance");
        self.next_id += 1;
        self.started += 1;
        self.intervals.push(ScheduledInterval {
            id: self.next_id,
            period,
            next_fire: self.now + period,
            event,
        });
        Ok(IntervalId(self.next_id))
    }

    fn cancel_interval(&mut self, interval: IntervalId) {
        self.intervals.retain(|iv| iv.id != interval.0);
        self.cancelled += 1;
    }

    fn defer(&mut self, delay: Duration, event: TimerEvent) {
        self.next_id += 1;
        self.deferred.push(Deferred {
            at: self.now + delay.as_millis() as u64,
            seq: self.next_id,
            event,
        });
    }
}

// =========================================================================
// FakeElement
// =========================================================================

/// Element stand-in that remembers its inline style.
#[derive(Debug, Default)]
pub struct FakeElement {
    styles: RefCell<BTreeMap<String, String>>,
}

impl FakeElement {
    pub fn style(&self, property: &str) -> Option<String> {
        self.styles.borrow().get(property).cloned()
    }
}

impl Stylable for FakeElement {
    fn set_style(&self, property: &str, value: &str) {
        self.styles
            .borrow_mut()
            .insert(property.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_scheduler_orders_deferrals_before_intervals_on_ties() {
        let mut s = ManualScheduler::default();
        s.start_interval(Duration::from_millis(50), TimerEvent::AutoplayTick)
            .unwrap();
        s.defer(Duration::from_millis(50), TimerEvent::Reposition);
        assert_eq!(s.pop_due(50), Some(TimerEvent::Reposition));
        assert_eq!(s.pop_due(50), Some(TimerEvent::AutoplayTick));
        assert_eq!(s.pop_due(50), None);
        assert_eq!(s.pop_due(100), Some(TimerEvent::AutoplayTick));
    }

    #[test]
    fn cancelled_interval_never_fires() {
        let mut s = ManualScheduler::default();
        let id = s
            .start_interval(Duration::from_millis(10), TimerEvent::AutoplayTick)
            .unwrap();
        s.cancel_interval(id);
        assert_eq!(s.pop_due(1000), None);
    }
}
