//! Lightbox carousel controller.
//!
//! One [`Lightbox`] exists per page. It owns the gallery, the index of the
//! image on screen and the autoplay interval, and it is the only thing that
//! changes them. Everything the page reports (clicks, keys, image loads,
//! resizes, timer ticks) arrives as a [`LightboxEvent`] through
//! [`Lightbox::dispatch`].
//!
//! # States
//!
//! ```text
//!            item click                      Space
//!  Closed ─────────────────▶ Open ◀───────────────────▶ Autoplaying
//!    ▲                        │  next/prev                │  tick → next
//!    └────────────────────────┴───────────────────────────┘
//!        Escape, overlay click, image click, close button
//! ```
//!
//! Whether the lightbox is open is read from the view (the modal's
//! visibility class), never tracked separately, so the two cannot disagree.
//! Autoplay is the interval handle itself: `Some` while running, `None`
//! otherwise.
//!
//! # Seams
//!
//! - [`LightboxView`] is the modal: show an item, hide, measure, place
//!   buttons. The browser binding implements it over the DOM.
//! - [`Scheduler`] is time: a recurring interval for autoplay and one-shot
//!   deferrals that let layout settle before buttons are measured. Each timer
//!   carries a [`TimerEvent`] that the scheduler dispatches back when it
//!   fires.

use crate::config::PageConfig;
use crate::geometry::{Measurements, NavLayout, NavPlacement, place_nav_buttons};
use crate::keyboard::Key;
use crate::types::{Gallery, GalleryItem};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace, warn};

#[derive(Error, Debug)]
pub enum LightboxError {
    #[error("failed to schedule timer: {0}")]
    Schedule(String),
}

/// The modal viewer as the controller sees it.
pub trait LightboxView {
    /// Display `item`: image source, caption, visible state, accessibility
    /// attribute, focus on the close control.
    fn show(&mut self, item: &GalleryItem);
    /// Switch to the hidden state and clear image source and caption.
    fn hide(&mut self);
    /// Whether the modal currently carries its visible class.
    fn is_visible(&self) -> bool;
    /// Current geometry, or `None` when a required element is missing.
    fn measure(&self) -> Option<Measurements>;
    fn place_buttons(&mut self, placement: &NavPlacement);
}

/// What a timer was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    AutoplayTick,
    Reposition,
}

/// Timer services. Fired timers come back as `LightboxEvent::Timer`.
pub trait Scheduler {
    type Interval;

    fn start_interval(
        &mut self,
        period: Duration,
        event: TimerEvent,
    ) -> Result<Self::Interval, LightboxError>;
    fn cancel_interval(&mut self, interval: Self::Interval);
    fn defer(&mut self, delay: Duration, event: TimerEvent);
}

/// Everything the page can tell the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxEvent {
    /// A gallery item at this position was clicked.
    ItemClicked(usize),
    NextClicked,
    PrevClicked,
    CloseClicked,
    PlayClicked,
    ImageClicked,
    /// A click landed on the overlay itself, not on anything inside it.
    OverlayClicked,
    Key(Key),
    ImageLoaded,
    Resized,
    Timer(TimerEvent),
}

/// How the originating DOM event should be treated after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Handled,
    /// Handled, and the browser's default action must be suppressed.
    PreventDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxState {
    Closed,
    Open,
    Autoplaying,
}

#[derive(Debug, Clone, Copy)]
struct Timings {
    autoplay: Duration,
    load_settle: Duration,
    resize_settle: Duration,
    open_settle: Duration,
}

pub struct Lightbox<V, S: Scheduler> {
    gallery: Gallery,
    view: V,
    scheduler: S,
    current: usize,
    autoplay: Option<S::Interval>,
    layout: NavLayout,
    timings: Timings,
}

impl<V: LightboxView, S: Scheduler> Lightbox<V, S> {
    pub fn new(gallery: Gallery, view: V, scheduler: S, config: &PageConfig) -> Self {
        Self {
            gallery,
            view,
            scheduler,
            current: 0,
            autoplay: None,
            layout: NavLayout::from(&config.layout),
            timings: Timings {
                autoplay: config.lightbox.autoplay_interval(),
                load_settle: config.layout.load_settle(),
                resize_settle: config.layout.resize_settle(),
                open_settle: config.layout.open_settle(),
            },
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_open(&self) -> bool {
        self.view.is_visible()
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_some()
    }

    pub fn state(&self) -> LightboxState {
        match (self.is_open(), self.is_autoplaying()) {
            (false, _) => LightboxState::Closed,
            (true, false) => LightboxState::Open,
            (true, true) => LightboxState::Autoplaying,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Show the item at `index`, wrapping out-of-range values in both
    /// directions, and schedule a button reposition once layout settles.
    pub fn open_at(&mut self, index: i64) {
        self.current = self.gallery.normalize(index);
        if let Some(item) = self.gallery.get(self.current) {
            debug!(index = self.current, src = %item.src, "lightbox showing item");
            self.view.show(item);
        }
        // The image `load` event does not fire for cached images.
        self.scheduler
            .defer(self.timings.open_settle, TimerEvent::Reposition);
    }

    /// Hide the lightbox and stop autoplay. Safe to call when already closed.
    pub fn close(&mut self) {
        debug!("lightbox closed");
        self.view.hide();
        self.stop_autoplay();
    }

    pub fn show_next(&mut self) {
        self.open_at(self.current as i64 + 1);
    }

    pub fn show_prev(&mut self) {
        self.open_at(self.current as i64 - 1);
    }

    pub fn start_autoplay(&mut self) {
        if self.autoplay.is_some() {
            return;
        }
        match self
            .scheduler
            .start_interval(self.timings.autoplay, TimerEvent::AutoplayTick)
        {
            Ok(handle) => {
                debug!(period_ms = self.timings.autoplay.as_millis() as u64, "autoplay started");
                self.autoplay = Some(handle);
            }
            Err(e) => warn!("autoplay not started: {e}"),
        }
    }

    pub fn stop_autoplay(&mut self) {
        if let Some(handle) = self.autoplay.take() {
            self.scheduler.cancel_interval(handle);
            debug!("autoplay stopped");
        }
    }

    pub fn toggle_autoplay(&mut self) {
        if self.autoplay.is_some() {
            self.stop_autoplay();
        } else {
            self.start_autoplay();
        }
    }

    /// Move the navigation buttons beside the current image.
    ///
    /// Does nothing while closed, while an element is missing, or while the
    /// image has no rendered size. Deferred calls that outlive the lightbox
    /// land here and are harmless.
    pub fn position_nav_buttons(&mut self) {
        if !self.view.is_visible() {
            return;
        }
        let Some(measurements) = self.view.measure() else {
            return;
        };
        match place_nav_buttons(&measurements, &self.layout) {
            Some(placement) => {
                trace!(?placement, "placing navigation buttons");
                self.view.place_buttons(&placement);
            }
            None => trace!("image has no size yet; buttons left in place"),
        }
    }

    /// Route one page event to the matching operation.
    pub fn dispatch(&mut self, event: LightboxEvent) -> Outcome {
        match event {
            LightboxEvent::ItemClicked(index) => self.open_at(index as i64),
            LightboxEvent::NextClicked => self.show_next(),
            LightboxEvent::PrevClicked => self.show_prev(),
            LightboxEvent::CloseClicked
            | LightboxEvent::ImageClicked
            | LightboxEvent::OverlayClicked => self.close(),
            LightboxEvent::PlayClicked => {
                if !self.is_open() {
                    return Outcome::Ignored;
                }
                self.toggle_autoplay();
            }
            LightboxEvent::Key(key) => return self.handle_key(key),
            LightboxEvent::ImageLoaded => self
                .scheduler
                .defer(self.timings.load_settle, TimerEvent::Reposition),
            LightboxEvent::Resized => self
                .scheduler
                .defer(self.timings.resize_settle, TimerEvent::Reposition),
            LightboxEvent::Timer(TimerEvent::AutoplayTick) => {
                if self.autoplay.is_none() {
                    return Outcome::Ignored;
                }
                self.show_next();
            }
            LightboxEvent::Timer(TimerEvent::Reposition) => self.position_nav_buttons(),
        }
        Outcome::Handled
    }

    fn handle_key(&mut self, key: Key) -> Outcome {
        if !self.is_open() {
            return Outcome::Ignored;
        }
        match key {
            Key::Escape => self.close(),
            Key::ArrowRight => self.show_next(),
            Key::ArrowLeft => self.show_prev(),
            Key::Space => {
                self.toggle_autoplay();
                return Outcome::PreventDefault;
            }
            Key::Other => return Outcome::Ignored,
        }
        Outcome::Handled
    }
}
