//! Lightbox over the page's modal markup.
//!
//! [`DomView`] and [`DomScheduler`] implement the controller's seams; the
//! rest of this module turns DOM events into [`LightboxEvent`]s.

use super::{OrLog, listen};
use crate::config::{LightboxConfig, PageConfig};
use crate::geometry::{Measurements, NavPlacement, Position, Rect, Size};
use crate::keyboard::Key;
use crate::lightbox::{
    Lightbox, LightboxError, LightboxEvent, LightboxView, Outcome, Scheduler, TimerEvent,
};
use crate::types::{Gallery, GalleryItem};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, DomRect, Element, Event, HtmlElement, HtmlImageElement, KeyboardEvent, Window,
};

type DomLightbox = Lightbox<DomView, DomScheduler>;
type Shared = Rc<RefCell<DomLightbox>>;

// =============================================================================
// View
// =============================================================================

pub struct DomView {
    document: Document,
    modal: Element,
    image: HtmlImageElement,
    caption: Element,
    prev: Option<HtmlElement>,
    next: Option<HtmlElement>,
    close: Option<HtmlElement>,
    panel_selector: String,
    hidden_class: String,
    visible_class: String,
    z_index: String,
}

impl DomView {
    /// Find the modal markup. `None` when the modal, image or caption is
    /// missing; absent controls are tolerated.
    fn locate(document: &Document, config: &PageConfig) -> Option<Self> {
        let ids = &config.lightbox.elements;
        let required = |id: &str| {
            let found = document.get_element_by_id(id);
            if found.is_none() {
                warn!("lightbox element #{id} not found");
            }
            found
        };
        let modal = required(ids.modal.as_str())?;
        let image = required(ids.image.as_str())?.dyn_into::<HtmlImageElement>().ok()?;
        let caption = required(ids.caption.as_str())?;

        Some(Self {
            document: document.clone(),
            modal,
            image,
            caption,
            prev: control(document, &ids.prev),
            next: control(document, &ids.next),
            close: control(document, &ids.close),
            panel_selector: config.lightbox.panel_selector.clone(),
            hidden_class: config.lightbox.hidden_class.clone(),
            visible_class: config.lightbox.visible_class.clone(),
            z_index: config.layout.button_z_index.to_string(),
        })
    }

    /// Give a modal that carries neither visibility class the hidden one.
    /// Its content and attributes are otherwise left as the page shipped them.
    fn ensure_visibility_class(&self) {
        let classes = self.modal.class_list();
        if !classes.contains(&self.hidden_class) && !classes.contains(&self.visible_class) {
            classes.add_1(&self.hidden_class).or_log("adding hidden class");
        }
    }

    fn set_aria_hidden(&self, hidden: bool) {
        let value = if hidden { "true" } else { "false" };
        self.modal
            .set_attribute("aria-hidden", value)
            .or_log("setting aria-hidden");
    }
}

impl LightboxView for DomView {
    fn show(&mut self, item: &GalleryItem) {
        self.image.set_src(&item.src);
        self.caption.set_text_content(Some(item.caption_text()));
        let classes = self.modal.class_list();
        classes.remove_1(&self.hidden_class).or_log("removing hidden class");
        classes.add_1(&self.visible_class).or_log("adding visible class");
        self.set_aria_hidden(false);
        if let Some(close) = &self.close {
            close.focus().or_log("focusing close control");
        }
    }

    fn hide(&mut self) {
        let classes = self.modal.class_list();
        classes.remove_1(&self.visible_class).or_log("removing visible class");
        classes.add_1(&self.hidden_class).or_log("adding hidden class");
        self.set_aria_hidden(true);
        self.image.set_src("");
        self.caption.set_text_content(Some(""));
    }

    fn is_visible(&self) -> bool {
        self.modal.class_list().contains(&self.visible_class)
    }

    fn measure(&self) -> Option<Measurements> {
        let prev = self.prev.as_ref()?;
        let next = self.next.as_ref()?;
        let panel = self.document.query_selector(&self.panel_selector).ok()??;
        Some(Measurements {
            image: rect(&self.image.get_bounding_client_rect()),
            panel: rect(&panel.get_bounding_client_rect()),
            prev: offset_size(prev),
            next: offset_size(next),
        })
    }

    fn place_buttons(&mut self, placement: &NavPlacement) {
        let buttons = [
            (self.prev.as_ref(), placement.prev),
            (self.next.as_ref(), placement.next),
        ];
        for (button, position) in buttons {
            if let Some(button) = button {
                self.position_button(button, position);
            }
        }
    }
}

impl DomView {
    fn position_button(&self, button: &HtmlElement, position: Position) {
        let style = button.style();
        for (property, value) in [
            ("position", "absolute".to_string()),
            ("z-index", self.z_index.clone()),
            ("left", format!("{}px", position.left)),
            ("top", format!("{}px", position.top)),
        ] {
            style
                .set_property(property, &value)
                .or_log("positioning navigation button");
        }
    }
}

fn control(document: &Document, id: &str) -> Option<HtmlElement> {
    let found = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if found.is_none() {
        debug!("optional lightbox control #{id} not present");
    }
    found
}

fn rect(r: &DomRect) -> Rect {
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

fn offset_size(el: &HtmlElement) -> Size {
    Size::new(f64::from(el.offset_width()), f64::from(el.offset_height()))
}

// =============================================================================
// Scheduler
// =============================================================================

pub struct DomScheduler {
    window: Window,
    owner: Weak<RefCell<DomLightbox>>,
}

/// A running `setInterval`. The closure lives exactly as long as the timer.
pub struct IntervalHandle {
    id: i32,
    _tick: Closure<dyn FnMut()>,
}

impl Scheduler for DomScheduler {
    type Interval = IntervalHandle;

    fn start_interval(
        &mut self,
        period: Duration,
        event: TimerEvent,
    ) -> Result<IntervalHandle, LightboxError> {
        let owner = self.owner.clone();
        let tick = Closure::<dyn FnMut()>::new(move || deliver(&owner, event));
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                millis(period),
            )
            .map_err(|e| LightboxError::Schedule(format!("{e:?}")))?;
        Ok(IntervalHandle { id, _tick: tick })
    }

    fn cancel_interval(&mut self, interval: IntervalHandle) {
        self.window.clear_interval_with_handle(interval.id);
    }

    fn defer(&mut self, delay: Duration, event: TimerEvent) {
        let owner = self.owner.clone();
        let callback = Closure::once_into_js(move || deliver(&owner, event));
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis(delay),
            )
        {
            warn!("deferred {event:?} not scheduled: {e:?}");
        }
    }
}

fn millis(duration: Duration) -> i32 {
    duration.as_millis().min(i32::MAX as u128) as i32
}

/// Hand a fired timer back to the controller, if it still exists.
fn deliver(owner: &Weak<RefCell<DomLightbox>>, event: TimerEvent) {
    if let Some(lightbox) = owner.upgrade() {
        dispatch(&lightbox, LightboxEvent::Timer(event));
    }
}

fn dispatch(lightbox: &Shared, event: LightboxEvent) -> Outcome {
    match lightbox.try_borrow_mut() {
        Ok(mut lightbox) => lightbox.dispatch(event),
        Err(_) => {
            warn!(?event, "lightbox busy; event dropped");
            Outcome::Ignored
        }
    }
}

// =============================================================================
// Wiring
// =============================================================================

/// Read the gallery in document order.
///
/// Items without a source keep their position (with an empty source) so
/// click indices stay aligned with the markup.
fn read_gallery(
    document: &Document,
    config: &LightboxConfig,
) -> Result<Vec<(Element, GalleryItem)>, JsValue> {
    let nodes = document.query_selector_all(&config.item_selector)?;
    let mut gallery = Vec::new();
    for i in 0..nodes.length() {
        let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let src = element.get_attribute(&config.source_attribute);
        if src.is_none() {
            warn!(index = i, "gallery item has no {}", config.source_attribute);
        }
        let caption = element.get_attribute(&config.caption_attribute);
        gallery.push((element, GalleryItem::from_attributes(src, caption)));
    }
    Ok(gallery)
}

/// Wire the lightbox. Returns `Ok(false)` when the page has no gallery
/// items or no usable modal, which leaves the page untouched.
pub fn install(window: &Window, document: &Document, config: &PageConfig) -> Result<bool, JsValue> {
    let (elements, items): (Vec<Element>, Vec<GalleryItem>) =
        read_gallery(document, &config.lightbox)?.into_iter().unzip();
    let count = items.len();
    let Some(gallery) = Gallery::new(items) else {
        debug!("no gallery items; lightbox not installed");
        return Ok(false);
    };
    let Some(view) = DomView::locate(document, config) else {
        return Ok(false);
    };
    view.ensure_visibility_class();
    debug!(items = count, "gallery read");

    let modal = view.modal.clone();
    let image = view.image.clone();
    let controls = [
        (view.prev.clone(), LightboxEvent::PrevClicked),
        (view.next.clone(), LightboxEvent::NextClicked),
        (view.close.clone(), LightboxEvent::CloseClicked),
        (
            control(document, &config.lightbox.elements.play),
            LightboxEvent::PlayClicked,
        ),
    ];

    let lightbox: Shared = Rc::new_cyclic(|owner| {
        let scheduler = DomScheduler {
            window: window.clone(),
            owner: owner.clone(),
        };
        RefCell::new(Lightbox::new(gallery, view, scheduler, config))
    });

    for (index, element) in elements.iter().enumerate() {
        let lb = lightbox.clone();
        listen(element, "click", move |_| {
            dispatch(&lb, LightboxEvent::ItemClicked(index));
        })?;
    }

    for (button, event) in controls {
        let Some(button) = button else {
            continue;
        };
        let lb = lightbox.clone();
        listen(&button, "click", move |e: Event| {
            e.stop_propagation();
            dispatch(&lb, event);
        })?;
    }

    let lb = lightbox.clone();
    let overlay = modal.clone();
    listen(&modal, "click", move |e: Event| {
        let on_overlay = e
            .target()
            .is_some_and(|target| js_sys::Object::is(&target, &overlay));
        if on_overlay {
            dispatch(&lb, LightboxEvent::OverlayClicked);
        }
    })?;

    let lb = lightbox.clone();
    listen(&image, "click", move |e: Event| {
        e.stop_propagation();
        dispatch(&lb, LightboxEvent::ImageClicked);
    })?;

    let lb = lightbox.clone();
    listen(&image, "load", move |_| {
        dispatch(&lb, LightboxEvent::ImageLoaded);
    })?;

    let lb = lightbox.clone();
    listen(window, "resize", move |_| {
        dispatch(&lb, LightboxEvent::Resized);
    })?;

    let lb = lightbox;
    listen(document, "keydown", move |e: Event| {
        let Some(key_event) = e.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = Key::from_dom(&key_event.key(), &key_event.code());
        if dispatch(&lb, LightboxEvent::Key(key)) == Outcome::PreventDefault {
            key_event.prevent_default();
        }
    })?;

    Ok(true)
}
