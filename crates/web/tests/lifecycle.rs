//! Controller lifecycle tests: every injected node must disappear again
//! when its controller is dropped.

#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use homepage_fx_core::{CursorConfig, PageConfig, ScrollConfig};
use homepage_fx_web::{CursorFx, PageAnimator, ScrollSync};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Document, Element, HtmlElement, KeyboardEvent, KeyboardEventInit, MouseEvent, MouseEventInit,
};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn count(document: &Document, selector: &str) -> u32 {
    document.query_selector_all(selector).unwrap().length()
}

fn mouse_event(kind: &str) -> MouseEvent {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap()
}

fn nav_key_event(key: &str) -> KeyboardEvent {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    init.set_cancelable(true);
    KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap()
}

#[wasm_bindgen_test]
fn scroll_sync_injects_and_removes_its_nodes() {
    let document = document();
    let body = document.body().unwrap();
    for _ in 0..2 {
        let heading = document.create_element("h2").unwrap();
        body.append_child(&heading).unwrap();
    }

    let progress_before = count(&document, ".scroll-progress");
    let dots_before = count(&document, ".scroll-dot");

    let sync = ScrollSync::init(ScrollConfig::default()).unwrap();
    assert_eq!(count(&document, ".scroll-progress"), progress_before + 1);
    assert!(count(&document, ".scroll-dot") >= dots_before + 2);

    drop(sync);
    assert_eq!(count(&document, ".scroll-progress"), progress_before);
    assert_eq!(count(&document, ".scroll-dot"), dots_before);
}

#[wasm_bindgen_test]
fn page_animator_owns_its_particle_container() {
    let document = document();
    let containers_before = count(&document, ".particles-container");

    let animator = PageAnimator::init(PageConfig::default()).unwrap();
    assert_eq!(
        count(&document, ".particles-container"),
        containers_before + 1
    );

    drop(animator);
    assert_eq!(count(&document, ".particles-container"), containers_before);
}

#[wasm_bindgen_test]
fn reveal_targets_gain_the_marker_class_at_init() {
    let document = document();
    let body = document.body().unwrap();
    let row = document.create_element("div").unwrap();
    row.set_class_name("pub-row");
    body.append_child(&row).unwrap();

    let animator = PageAnimator::init(PageConfig::default()).unwrap();
    assert!(row.class_list().contains("scroll-animate"));
    drop(animator);
}

#[wasm_bindgen_test]
fn nav_keys_only_prevent_default_when_they_act() {
    let document = document();
    let sync = ScrollSync::init(ScrollConfig::default()).unwrap();

    // No update pass has run yet, so no dot is active: arrows fall
    // through to the browser.
    let arrow = nav_key_event("ArrowDown");
    document.dispatch_event(&arrow).unwrap();
    assert!(!arrow.default_prevented());

    // Home always resolves and therefore claims the key.
    let home = nav_key_event("Home");
    document.dispatch_event(&home).unwrap();
    assert!(home.default_prevented());

    drop(sync);
}

#[wasm_bindgen_test]
async fn cursor_transients_expire_within_their_lifetime() {
    let document = document();

    let mut config = CursorConfig::default();
    config.min_viewport_width = 0.0;
    config.trail_probability = 1.0;
    config.trail_ttl_ms = 80;
    config.ripple_ttl_ms = 80;

    let cursors_before = count(&document, ".cursor");
    let fx = CursorFx::init(config).unwrap();
    assert_eq!(count(&document, ".cursor"), cursors_before + 1);

    for i in 0..5 {
        let init = MouseEventInit::new();
        init.set_bubbles(true);
        init.set_client_x(40 + i * 10);
        init.set_client_y(40);
        let event = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).unwrap();
        document.dispatch_event(&event).unwrap();
    }
    assert!(count(&document, ".mouse-particle") >= 1);

    document.dispatch_event(&mouse_event("mousedown")).unwrap();
    assert!(count(&document, ".click-ripple") >= 1);
    document.dispatch_event(&mouse_event("mouseup")).unwrap();

    // Past every trail and ripple lifetime in play.
    TimeoutFuture::new(1_200).await;
    assert_eq!(count(&document, ".mouse-particle"), 0);
    assert_eq!(count(&document, ".click-ripple"), 0);

    drop(fx);
    assert_eq!(count(&document, ".cursor"), cursors_before);
}

#[wasm_bindgen_test]
fn cursor_stays_off_below_the_width_threshold() {
    let document = document();
    let mut config = CursorConfig::default();
    config.min_viewport_width = f64::MAX;

    let cursors_before = count(&document, ".cursor");
    let fx = CursorFx::init(config).unwrap();
    assert_eq!(count(&document, ".cursor"), cursors_before);
    drop(fx);
}

#[wasm_bindgen_test]
fn cursor_shrinks_over_text_and_restores_on_leave() {
    let document = document();
    let body = document.body().unwrap();

    let mut config = CursorConfig::default();
    config.min_viewport_width = 0.0;
    config.trail_probability = 0.0;
    let fx = CursorFx::init(config).unwrap();

    let cursors = document.query_selector_all(".cursor").unwrap();
    let cursor: HtmlElement = cursors
        .item(cursors.length() - 1)
        .unwrap()
        .dyn_into()
        .unwrap();

    let paragraph = document.create_element("p").unwrap();
    body.append_child(&paragraph).unwrap();

    paragraph.dispatch_event(&mouse_event("mouseover")).unwrap();
    assert_eq!(cursor.style().get_property_value("width").unwrap(), "8px");

    paragraph.dispatch_event(&mouse_event("mouseout")).unwrap();
    assert_eq!(cursor.style().get_property_value("width").unwrap(), "20px");

    drop(fx);
}

#[wasm_bindgen_test]
async fn a_second_tooltip_keeps_its_full_lifetime() {
    let document = document();
    let body = document.body().unwrap();

    let email = document.create_element("email").unwrap();
    email.set_text_content(Some("someone@example.org"));
    body.append_child(&email).unwrap();

    let mut config = PageConfig::default();
    config.tooltip_visible_ms = 300;
    config.tooltip_fade_ms = 150;
    let animator = PageAnimator::init(config).unwrap();

    click(&email);
    // Land the second copy inside the first tooltip's fade window.
    TimeoutFuture::new(350).await;
    click(&email);

    // When the first tooltip's fade deadline passes, the second one must
    // still be up.
    TimeoutFuture::new(150).await;
    assert_eq!(count(&document, ".copy-tooltip"), 1);

    TimeoutFuture::new(3_000).await;
    assert_eq!(count(&document, ".copy-tooltip"), 0);

    drop(animator);
    email.remove();
}

fn click(target: &Element) {
    target.dispatch_event(&mouse_event("click")).unwrap();
}
