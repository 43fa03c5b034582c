//! Browser binding, compiled for `wasm32` only.
//!
//! The module starts itself when the `.wasm` file is instantiated. Once the
//! document has been parsed (immediately, if that already happened) it:
//!
//! 1. installs a `tracing` subscriber that prints to the browser console;
//! 2. reads the optional JSON config block (see [`crate::config`]);
//! 3. wires scroll reveal ([`reveal`]) and the lightbox ([`lightbox`]).
//!
//! The two features are independent: a failure in one is logged and does
//! not stop the other.
//!
//! Tests run in a real browser: `wasm-pack test --headless --chrome --lib`.

mod console;
mod lightbox;
mod reveal;

use crate::config::{self, PageConfig};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget};

#[cfg(test)]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen(start)]
pub fn start() {
    console::init_logging();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(run);
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .or_log("waiting for DOMContentLoaded");
    } else {
        run();
    }
}

fn run() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let config = page_config(&document);

    match reveal::install(&document, &config.reveal) {
        Ok(watched) => debug!(watched, "scroll reveal ready"),
        Err(e) => warn!("scroll reveal disabled: {e:?}"),
    }
    match lightbox::install(&window, &document, &config) {
        Ok(true) => debug!("lightbox ready"),
        Ok(false) => {}
        Err(e) => warn!("lightbox disabled: {e:?}"),
    }
}

/// The page's embedded config, or the defaults when absent or invalid.
fn page_config(document: &Document) -> PageConfig {
    let Some(json) = document
        .get_element_by_id(config::PAGE_CONFIG_ID)
        .and_then(|el| el.text_content())
    else {
        return PageConfig::default();
    };
    config::from_json(&json).unwrap_or_else(|e| {
        warn!("ignoring page config: {e}");
        PageConfig::default()
    })
}

/// Register `handler` for `kind` events on `target` for the page's lifetime.
fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Log DOM call failures that the page can live with.
trait OrLog {
    fn or_log(self, what: &str);
}

impl OrLog for Result<(), JsValue> {
    fn or_log(self, what: &str) {
        if let Err(e) = self {
            warn!("{what} failed: {e:?}");
        }
    }
}
