//! Browser-side decoration layer for the homepage.
//!
//! Three controllers run side by side once the document is ready: the
//! scroll synchronizer, the custom cursor and the one-time page
//! animations. Each owns the nodes, listeners and timers it creates and
//! releases them on drop, so page unload (or an individual controller
//! failing its capability check) leaves the document untouched.

mod cursor_fx;
mod dom;
mod observe;
mod page_animator;
mod sched;
mod scroll_sync;
mod transient;

pub use cursor_fx::CursorFx;
pub use page_animator::PageAnimator;
pub use scroll_sync::ScrollSync;

use std::cell::RefCell;

use gloo_events::EventListener;
use homepage_fx_core::{FxConfig, FxError};
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsValue;

/// The live controllers. Dropping this tears the whole layer down.
struct App {
    _scroll: Option<ScrollSync>,
    _cursor: Option<CursorFx>,
    _animator: Option<PageAnimator>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let document = dom::document().map_err(to_js)?;
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| boot()).forget();
    } else {
        boot();
    }
    Ok(())
}

fn boot() {
    let config = load_config();

    let scroll = ok_or_warn("scroll sync", ScrollSync::init(config.scroll));
    let cursor = ok_or_warn("cursor effects", CursorFx::init(config.cursor));
    let animator = ok_or_warn("page animations", PageAnimator::init(config.page));

    APP.with(|slot| {
        *slot.borrow_mut() = Some(App {
            _scroll: scroll,
            _cursor: cursor,
            _animator: animator,
        });
    });

    if let Ok(window) = dom::window() {
        EventListener::once(&window, "beforeunload", |_| {
            APP.with(|slot| slot.borrow_mut().take());
        })
        .forget();
    }

    tracing::info!("decoration layer initialised");
}

/// Page-supplied overrides, read from an optional embedded JSON fragment.
/// Anything missing or malformed falls back to the defaults.
fn load_config() -> FxConfig {
    let Ok(document) = dom::document() else {
        return FxConfig::default();
    };
    let Some(json) = document
        .get_element_by_id("fx-config")
        .and_then(|el| el.text_content())
    else {
        return FxConfig::default();
    };
    match FxConfig::from_json(&json) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring malformed config overrides");
            FxConfig::default()
        }
    }
}

fn ok_or_warn<T>(what: &str, result: homepage_fx_core::Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(error = %err, "{what} disabled");
            None
        }
    }
}

fn to_js(err: FxError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
