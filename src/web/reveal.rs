//! Scroll reveal over `IntersectionObserver`.

use crate::config::RevealConfig;
use crate::reveal::{Intersection, RevealAnimator, Stylable};
use js_sys::Array;
use tracing::trace;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

impl Stylable for HtmlElement {
    fn set_style(&self, property: &str, value: &str) {
        if let Err(e) = self.style().set_property(property, value) {
            trace!("style {property}: {value} rejected: {e:?}");
        }
    }
}

/// Hide every reveal target and start watching it. Returns how many
/// elements are watched; zero matches is fine.
pub fn install(document: &Document, config: &RevealConfig) -> Result<usize, JsValue> {
    let animator = RevealAnimator::new(config);

    let handler = animator.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let Ok(target) = entry.target().dyn_into::<HtmlElement>() else {
                    continue;
                };
                handler.handle_entry(
                    &target,
                    Intersection {
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    },
                );
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(animator.options().threshold));
    options.set_root_margin(&animator.options().root_margin());
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    let nodes = document.query_selector_all(&config.selector_list())?;
    let mut watched = 0;
    for i in 0..nodes.length() {
        let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        animator.prepare(&element);
        observer.observe(&element);
        watched += 1;
    }
    Ok(watched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::Element;

    fn mount(markup: &str) -> (Document, Element) {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(markup);
        document.body().unwrap().append_child(&root).unwrap();
        (document, root)
    }

    fn config(selectors: &[&str]) -> RevealConfig {
        RevealConfig {
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            ..RevealConfig::default()
        }
    }

    #[wasm_bindgen_test]
    fn install_hides_every_match() {
        let (document, root) = mount(
            r#"<div class="rv-card"></div><p class="rv-intro"></p><div class="rv-card"></div>"#,
        );
        let watched = install(&document, &config(&[".rv-card", ".rv-intro"])).unwrap();
        assert_eq!(watched, 3);

        let nodes = document.query_selector_all(".rv-card, .rv-intro").unwrap();
        for i in 0..nodes.length() {
            let style = nodes
                .item(i)
                .unwrap()
                .dyn_into::<HtmlElement>()
                .unwrap()
                .style();
            assert_eq!(style.get_property_value("opacity").unwrap(), "0");
            assert_eq!(
                style.get_property_value("transform").unwrap(),
                "translateY(30px)"
            );
        }
        root.remove();
    }

    #[wasm_bindgen_test]
    fn install_without_matches_is_a_noop() {
        let (document, root) = mount(r#"<div class="rv-other"></div>"#);
        assert_eq!(install(&document, &config(&[".rv-missing"])).unwrap(), 0);
        let other = document
            .query_selector(".rv-other")
            .unwrap()
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap();
        assert_eq!(other.style().get_property_value("opacity").unwrap(), "");
        root.remove();
    }
}
