//! Scroll-driven UI state synchronizer.
//!
//! Owns the progress bar, the section indicator dots, the parallax layer,
//! reveal classing, section highlighting and the one-shot counter
//! animations. Everything visual is recomputed in a single frame-coalesced
//! update pass; the maths lives in `homepage_fx_core::scroll`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use homepage_fx_core::{
    active_section, nav_target, navbar_scrolled, parallax_offset, progress_percent,
    reveal_triggered, CounterAnimation, FxError, NavKey, Result, ScrollConfig, ScrollTarget,
    SectionExtent,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Window,
};

use crate::dom;
use crate::observe::{ObserverCallback, ObserverHandle};
use crate::sched::FrameScheduler;

pub struct ScrollSync {
    state: Rc<SyncState>,
    _sched: FrameScheduler,
    _listeners: Vec<EventListener>,
    _observers: Vec<ObserverHandle>,
}

struct SyncState {
    window: Window,
    progress: HtmlElement,
    indicator: Option<HtmlElement>,
    dots: Vec<Element>,
    sections: Vec<HtmlElement>,
    page_sections: Vec<HtmlElement>,
    reveal_elements: Vec<HtmlElement>,
    topnav: Option<Element>,
    parallax: HtmlElement,
    active: Cell<Option<usize>>,
    config: ScrollConfig,
}

impl ScrollSync {
    /// Builds the injected nodes and registers the listeners. Refuses to
    /// initialise (leaving the page untouched) when frame scheduling or
    /// intersection observation is unavailable.
    pub fn init(config: ScrollConfig) -> Result<Self> {
        let window = dom::window()?;
        if !dom::supports_frame_effects(&window) {
            return Err(FxError::Capability(
                "requestAnimationFrame and IntersectionObserver",
            ));
        }
        let document = dom::document()?;
        let body = dom::body()?;

        let progress = dom::create_div(&document, "scroll-progress")?;
        body.append_child(&progress).map_err(dom::js_err)?;

        let parallax = dom::create_div(&document, "parallax-bg")?;
        body.append_child(&parallax).map_err(dom::js_err)?;

        let sections = dom::query_all_html(&document, "h2, .section-animate");
        let mut listeners = Vec::new();

        let (indicator, dots) = if sections.is_empty() {
            (None, Vec::new())
        } else {
            let indicator = dom::create_div(&document, "scroll-indicator")?;
            let mut dots = Vec::with_capacity(sections.len());
            for (index, section) in sections.iter().enumerate() {
                let dot = dom::create_div(&document, "scroll-dot")?;
                dot.set_attribute("data-section", &index.to_string())
                    .map_err(dom::js_err)?;
                indicator.append_child(&dot).map_err(dom::js_err)?;

                let window_for_click = window.clone();
                let section_for_click = section.clone();
                let nav_offset = config.nav_offset;
                listeners.push(EventListener::new(&dot, "click", move |_| {
                    let extent = dom::element_extent(&section_for_click);
                    dom::smooth_scroll_to(&window_for_click, extent.top - nav_offset);
                }));
                dots.push(dot.unchecked_into::<Element>());
            }
            body.append_child(&indicator).map_err(dom::js_err)?;
            (Some(indicator), dots)
        };

        let state = Rc::new(SyncState {
            window: window.clone(),
            progress,
            indicator,
            dots,
            sections,
            page_sections: dom::query_all_html(&document, "section"),
            reveal_elements: dom::query_all_html(
                &document,
                ".scroll-reveal, .scroll-reveal-left, .scroll-reveal-right, .section-animate",
            ),
            topnav: document.query_selector(".topnav").ok().flatten(),
            parallax,
            active: Cell::new(None),
            config,
        });

        let update_state = state.clone();
        let sched = FrameScheduler::new(move || run_update(&update_state));

        let scroll_sched = sched.clone();
        listeners.push(EventListener::new(&window, "scroll", move |_| {
            scroll_sched.request();
        }));
        let resize_sched = sched.clone();
        listeners.push(EventListener::new(&window, "resize", move |_| {
            resize_sched.request();
        }));

        let key_state = state.clone();
        listeners.push(EventListener::new_with_options(
            &document,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let Some(key) = NavKey::from_key(&event.key()) else {
                    return;
                };
                // Native key behaviour survives whenever we do not act,
                // e.g. arrows with no active dot or at a list edge.
                if navigate(&key_state, key) {
                    event.prevent_default();
                }
            },
        ));

        let mut observers = Vec::new();
        observers.extend(init_counters(&document, state.config.counter_duration_ms)?);
        if let Some(observer) = init_class_toggle(
            &document,
            ".float-on-scroll",
            "floating",
            0.5,
            None,
        )? {
            observers.push(observer);
        }
        if let Some(observer) = init_class_toggle(
            &document,
            ".content-shadow",
            "shadow-visible",
            0.3,
            Some("0px 0px -50px 0px"),
        )? {
            observers.push(observer);
        }

        // First pass so the page is styled before any scrolling happens.
        sched.request();

        Ok(Self {
            state,
            _sched: sched,
            _listeners: listeners,
            _observers: observers,
        })
    }
}

impl Drop for ScrollSync {
    fn drop(&mut self) {
        self.state.progress.remove();
        self.state.parallax.remove();
        if let Some(indicator) = &self.state.indicator {
            indicator.remove();
        }
    }
}

/// The single per-frame update pass.
fn run_update(state: &SyncState) {
    let metrics = dom::scroll_metrics(&state.window);

    dom::set_style(
        &state.progress,
        "width",
        &format!("{}%", progress_percent(metrics)),
    );

    if let Some(topnav) = &state.topnav {
        dom::set_class(
            topnav,
            "scrolled",
            navbar_scrolled(metrics, state.config.navbar_threshold),
        );
    }

    // Section geometry is re-read every pass; layout may have changed.
    let extents: Vec<SectionExtent> = state
        .sections
        .iter()
        .map(dom::element_extent)
        .collect();
    let active = active_section(metrics, &extents);
    state.active.set(active);
    for (index, dot) in state.dots.iter().enumerate() {
        dom::set_class(dot, "active", active == Some(index));
    }

    dom::set_style(
        &state.parallax,
        "transform",
        &format!(
            "translateY({}px)",
            parallax_offset(metrics, state.config.parallax_speed)
        ),
    );

    for element in &state.reveal_elements {
        if reveal_triggered(metrics, dom::element_extent(element)) {
            dom::add_class(element, "active");
        }
    }

    let page_extents: Vec<SectionExtent> = state
        .page_sections
        .iter()
        .map(dom::element_extent)
        .collect();
    let in_view = active_section(metrics, &page_extents);
    for (index, section) in state.page_sections.iter().enumerate() {
        dom::set_class(section, "in-view", in_view == Some(index));
    }
}

/// Resolves and performs a keyboard navigation. Returns whether the key
/// actually moved the viewport.
fn navigate(state: &SyncState, key: NavKey) -> bool {
    let target = nav_target(key, state.active.get(), state.sections.len());
    let Some(target) = target else { return false };
    match target {
        ScrollTarget::Top => dom::smooth_scroll_to(&state.window, 0.0),
        ScrollTarget::Bottom => {
            let metrics = dom::scroll_metrics(&state.window);
            dom::smooth_scroll_to(&state.window, metrics.scroll_height);
        }
        ScrollTarget::Section(index) => {
            if let Some(section) = state.sections.get(index) {
                let extent = dom::element_extent(section);
                dom::smooth_scroll_to(&state.window, extent.top - state.config.nav_offset);
            }
        }
    }
    true
}

/// One observer per `.counter` element; fires once, then unobserves.
fn init_counters(
    document: &web_sys::Document,
    duration_ms: f64,
) -> Result<Vec<ObserverHandle>> {
    let mut handles = Vec::new();
    for counter in dom::query_all_html(document, ".counter") {
        let target: f64 = counter
            .get_attribute("data-target")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0.0);
        let animation = CounterAnimation::new(target, duration_ms);

        let element = counter.clone();
        let callback: ObserverCallback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() && !dom::has_class(&element, "animate") {
                        dom::add_class(&element, "animate");
                        start_counter(element.clone(), animation);
                        observer.unobserve(&element);
                    }
                }
            },
        ));

        let handle = ObserverHandle::new(callback, None)?;
        handle.observer.observe(&counter);
        handles.push(handle);
    }
    Ok(handles)
}

/// Drives one counter with animation-frame timestamps until it completes.
/// The loop owns itself and drops its closure on the final frame.
fn start_counter(element: HtmlElement, animation: CounterAnimation) {
    let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let started: Rc<Cell<Option<f64>>> = Rc::new(Cell::new(None));

    let loop_slot = slot.clone();
    let callback = Closure::wrap(Box::new(move |now: f64| {
        let began = match started.get() {
            Some(t) => t,
            None => {
                started.set(Some(now));
                now
            }
        };
        let elapsed = now - began;
        element.set_text_content(Some(&animation.value_at(elapsed).to_string()));
        if animation.finished(elapsed) {
            loop_slot.borrow_mut().take();
        } else {
            request_frame(&loop_slot);
        }
    }) as Box<dyn FnMut(f64)>);

    *slot.borrow_mut() = Some(callback);
    request_frame(&slot);
}

fn request_frame(slot: &Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>) {
    let Some(window) = web_sys::window() else { return };
    if let Some(callback) = slot.borrow().as_ref() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

/// Observer that mirrors intersection state into a class, both ways.
fn init_class_toggle(
    document: &web_sys::Document,
    selector: &str,
    class: &'static str,
    threshold: f64,
    root_margin: Option<&str>,
) -> Result<Option<ObserverHandle>> {
    let elements = dom::query_all(document, selector);
    if elements.is_empty() {
        return Ok(None);
    }

    let callback: ObserverCallback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                dom::set_class(&entry.target(), class, entry.is_intersecting());
            }
        },
    ));

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    let handle = ObserverHandle::new(callback, Some(&options))?;
    for element in &elements {
        handle.observer.observe(element);
    }
    Ok(Some(handle))
}
