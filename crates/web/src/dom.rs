//! Thin helpers over `web_sys` so the controllers stay readable.
//!
//! Every lookup is fallible and degrades to a no-op; nothing in here
//! panics. Failures that matter at init time are surfaced as [`FxError`].

use homepage_fx_core::{FxError, Result, ScrollMetrics};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(FxError::Capability("window"))
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(FxError::Capability("document"))
}

pub fn body() -> Result<HtmlElement> {
    document()?.body().ok_or_else(|| FxError::dom("no body"))
}

pub fn js_err(value: JsValue) -> FxError {
    FxError::dom(format!("{value:?}"))
}

/// Creates a `<div>` carrying the given class name.
pub fn create_div(document: &Document, class: &str) -> Result<HtmlElement> {
    let element = document.create_element("div").map_err(js_err)?;
    element.set_class_name(class);
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| FxError::dom("created element is not an HtmlElement"))
}

/// All elements matching `selector`, or an empty vec when the selector
/// matches nothing (or is invalid).
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Like [`query_all`] but narrowed to `HtmlElement`s.
pub fn query_all_html(document: &Document, selector: &str) -> Vec<HtmlElement> {
    query_all(document, selector)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Idempotently adds or removes a class.
pub fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let _ = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
}

pub fn add_class(element: &Element, class: &str) {
    set_class(element, class, true);
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

/// Current viewport width in px, zero when unavailable.
pub fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// Samples the page geometry for one handled frame.
pub fn scroll_metrics(window: &Window) -> ScrollMetrics {
    let scroll_top = window.page_y_offset().unwrap_or(0.0);
    let scroll_height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|root| root.scroll_height() as f64)
        .unwrap_or(0.0);
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    ScrollMetrics::new(scroll_top, scroll_height, viewport_height)
}

/// Document-coordinate extent of an element.
pub fn element_extent(element: &HtmlElement) -> homepage_fx_core::SectionExtent {
    homepage_fx_core::SectionExtent::new(
        element.offset_top() as f64,
        element.offset_height() as f64,
    )
}

/// Smoothly scrolls the window to a vertical offset.
pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = web_sys::ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// Index of `element` among its parent's element children.
pub fn sibling_index(element: &Element) -> usize {
    let mut index = 0;
    let mut current = element.previous_element_sibling();
    while let Some(el) = current {
        index += 1;
        current = el.previous_element_sibling();
    }
    index
}

/// Whether the environment offers frame scheduling and intersection
/// observation. Checked once before a controller initialises.
pub fn supports_frame_effects(window: &Window) -> bool {
    let has = |name: &str| {
        js_sys::Reflect::has(window.as_ref(), &JsValue::from_str(name)).unwrap_or(false)
    };
    has("requestAnimationFrame") && has("IntersectionObserver")
}

/// Touch-class device detection, sampled once at init.
pub fn has_touch(window: &Window) -> bool {
    js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("ontouchstart")).unwrap_or(false)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn created_div_carries_its_class() {
        let document = document().unwrap();
        let div = create_div(&document, "fx-test-node").unwrap();
        assert!(has_class(&div, "fx-test-node"));
    }

    #[wasm_bindgen_test]
    fn class_toggling_is_idempotent() {
        let document = document().unwrap();
        let div = create_div(&document, "base").unwrap();

        set_class(&div, "active", true);
        set_class(&div, "active", true);
        assert!(has_class(&div, "active"));
        assert_eq!(div.class_name(), "base active");

        set_class(&div, "active", false);
        set_class(&div, "active", false);
        assert!(!has_class(&div, "active"));
    }

    #[wasm_bindgen_test]
    fn sibling_index_counts_preceding_elements() {
        let document = document().unwrap();
        let parent = create_div(&document, "parent").unwrap();
        for i in 0..3 {
            let child = create_div(&document, &format!("child-{i}")).unwrap();
            parent.append_child(&child).unwrap();
        }
        let last = parent.last_element_child().unwrap();
        assert_eq!(sibling_index(&last), 2);
    }

    #[wasm_bindgen_test]
    fn frame_effects_are_available_in_the_test_browser() {
        let window = window().unwrap();
        assert!(supports_frame_effects(&window));
    }
}
