//! Custom cursor with hover/click states, trailing particles and click
//! ripples.
//!
//! Enablement is decided once at init (touch devices and narrow viewports
//! keep the native pointer); crossing the width threshold at runtime tears
//! the whole effect down and restores it when the viewport grows back.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use homepage_fx_core::{
    cursor::{INTERACTIVE_SELECTOR, MAGNETIC_SELECTOR, TEXT_HOVER_SELECTOR},
    cursor_enabled, should_spawn_trail, CursorConfig, CursorEnv, Result, TrailParticle,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, MouseEvent};

use crate::dom;
use crate::transient::TransientSet;

pub struct CursorFx {
    // Kept alive so page-unload teardown drops the active cursor with us.
    _state: Rc<RefCell<Option<ActiveCursor>>>,
    _resize: EventListener,
}

impl CursorFx {
    /// Decides enablement from the device environment and, when enabled,
    /// replaces the native pointer. A resize listener keeps watching the
    /// threshold either way.
    pub fn init(config: CursorConfig) -> Result<Self> {
        let window = dom::window()?;
        let has_touch = dom::has_touch(&window);
        let env = CursorEnv {
            viewport_width: dom::viewport_width(&window),
            has_touch,
        };

        let state = Rc::new(RefCell::new(None));
        if cursor_enabled(env, &config) {
            *state.borrow_mut() = Some(ActiveCursor::activate(&config)?);
        } else {
            tracing::debug!(
                width = env.viewport_width,
                has_touch,
                "cursor effects disabled for this device"
            );
        }

        let resize_state = state.clone();
        let resize_window = window.clone();
        let resize = EventListener::new(&window, "resize", move |_| {
            let env = CursorEnv {
                viewport_width: dom::viewport_width(&resize_window),
                has_touch,
            };
            let enabled = cursor_enabled(env, &config);
            let mut slot = resize_state.borrow_mut();
            match (&*slot, enabled) {
                (Some(_), false) => {
                    tracing::debug!("viewport narrowed, tearing down cursor effects");
                    *slot = None;
                }
                (None, true) => {
                    if let Ok(active) = ActiveCursor::activate(&config) {
                        *slot = Some(active);
                    }
                }
                _ => {}
            }
        });

        Ok(Self {
            _state: state,
            _resize: resize,
        })
    }
}

struct ActiveCursor {
    cursor: HtmlElement,
    body: HtmlElement,
    particles: TransientSet,
    _listeners: Vec<EventListener>,
}

impl ActiveCursor {
    fn activate(config: &CursorConfig) -> Result<Self> {
        let document = dom::document()?;
        let body = dom::body()?;

        let cursor = dom::create_div(&document, "cursor")?;
        body.append_child(&cursor).map_err(dom::js_err)?;
        dom::set_style(&body, "cursor", "none");

        let particles = TransientSet::new();
        let position = Rc::new(Cell::new((0.0f64, 0.0f64)));
        let mut listeners = Vec::new();

        {
            let cursor = cursor.clone();
            let body = body.clone();
            let particles = particles.clone();
            let position = position.clone();
            let config = config.clone();
            listeners.push(EventListener::new(&document, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let (x, y) = (event.client_x() as f64, event.client_y() as f64);
                position.set((x, y));
                dom::set_style(&cursor, "left", &format!("{x}px"));
                dom::set_style(&cursor, "top", &format!("{y}px"));

                if should_spawn_trail(js_sys::Math::random(), &config) {
                    let particle = TrailParticle::from_samples(
                        x,
                        y,
                        [
                            js_sys::Math::random(),
                            js_sys::Math::random(),
                            js_sys::Math::random(),
                        ],
                        &config,
                    );
                    spawn_trail(&body, &particles, particle, config.trail_ttl_ms);
                }
            }));
        }

        {
            let cursor = cursor.clone();
            let body = body.clone();
            let particles = particles.clone();
            let position = position.clone();
            let ripple_ttl = config.ripple_ttl_ms;
            listeners.push(EventListener::new(&document, "mousedown", move |_| {
                dom::add_class(&cursor, "click");
                let (x, y) = position.get();
                spawn_ripple(&body, &particles, x, y, ripple_ttl);
            }));
        }

        {
            let cursor = cursor.clone();
            listeners.push(EventListener::new(&document, "mouseup", move |_| {
                dom::set_class(&cursor, "click", false);
            }));
        }

        {
            let cursor = cursor.clone();
            listeners.push(EventListener::new(&document, "mouseover", move |event| {
                let Some(el) = target_element(event) else { return };
                if matches(&el, INTERACTIVE_SELECTOR) {
                    dom::add_class(&cursor, "hover");
                }
                // Ease toward magnetic elements with a slower transition.
                if matches(&el, MAGNETIC_SELECTOR) {
                    dom::set_style(
                        &cursor,
                        "transition",
                        "all 0.4s cubic-bezier(0.25, 0.46, 0.45, 0.94)",
                    );
                }
                // Shrink to a reading dot over text.
                if matches(&el, TEXT_HOVER_SELECTOR) {
                    dom::set_style(&cursor, "width", "8px");
                    dom::set_style(&cursor, "height", "8px");
                    dom::set_style(&cursor, "background", "#002D72");
                    dom::set_style(&cursor, "border", "none");
                }
            }));
        }
        {
            let cursor = cursor.clone();
            listeners.push(EventListener::new(&document, "mouseout", move |event| {
                let Some(el) = target_element(event) else { return };
                if matches(&el, INTERACTIVE_SELECTOR) {
                    dom::set_class(&cursor, "hover", false);
                }
                if matches(&el, MAGNETIC_SELECTOR) {
                    dom::set_style(
                        &cursor,
                        "transition",
                        "all 0.3s cubic-bezier(0.25, 0.46, 0.45, 0.94)",
                    );
                }
                if matches(&el, TEXT_HOVER_SELECTOR) {
                    dom::set_style(&cursor, "width", "20px");
                    dom::set_style(&cursor, "height", "20px");
                    dom::set_style(&cursor, "background", "rgba(0, 45, 114, 0.1)");
                    dom::set_style(&cursor, "border", "2px solid #002D72");
                }
            }));
        }

        // Fade out while the pointer is off the page.
        {
            let cursor = cursor.clone();
            listeners.push(EventListener::new(&document, "mouseleave", move |_| {
                dom::set_style(&cursor, "opacity", "0");
            }));
        }
        {
            let cursor = cursor.clone();
            listeners.push(EventListener::new(&document, "mouseenter", move |_| {
                dom::set_style(&cursor, "opacity", "1");
            }));
        }

        Ok(Self {
            cursor,
            body,
            particles,
            _listeners: listeners,
        })
    }
}

impl Drop for ActiveCursor {
    fn drop(&mut self) {
        self.cursor.remove();
        self.particles.clear();
        dom::set_style(&self.body, "cursor", "auto");
    }
}

fn target_element(event: &web_sys::Event) -> Option<Element> {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
}

fn matches(element: &Element, selector: &str) -> bool {
    element.matches(selector).unwrap_or(false)
}

fn spawn_trail(
    body: &HtmlElement,
    particles: &TransientSet,
    particle: TrailParticle,
    ttl_ms: u32,
) {
    let Ok(document) = dom::document() else { return };
    let Ok(node) = dom::create_div(&document, "mouse-particle") else {
        return;
    };
    dom::set_style(&node, "left", &format!("{}px", particle.x));
    dom::set_style(&node, "top", &format!("{}px", particle.y));
    dom::set_style(&node, "background", &particle.color);
    dom::set_style(
        &node,
        "transform",
        &format!(
            "translate({}px, {}px)",
            particle.offset_x, particle.offset_y
        ),
    );
    if body.append_child(&node).is_err() {
        return;
    }
    particles.track(node, ttl_ms);
}

fn spawn_ripple(body: &HtmlElement, particles: &TransientSet, x: f64, y: f64, ttl_ms: u32) {
    let Ok(document) = dom::document() else { return };
    let Ok(node) = dom::create_div(&document, "click-ripple") else {
        return;
    };
    let _ = node.set_attribute(
        "style",
        &format!(
            "position:fixed;left:{x}px;top:{y}px;width:20px;height:20px;\
             border:2px solid #002D72;border-radius:50%;\
             transform:translate(-50%,-50%);pointer-events:none;z-index:9997;\
             animation:click-ripple {}s ease-out forwards",
            ttl_ms as f64 / 1_000.0
        ),
    );
    if body.append_child(&node).is_err() {
        return;
    }
    particles.track(node, ttl_ms);
}
