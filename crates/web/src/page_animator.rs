//! One-time page-load animations.
//!
//! Observer-driven reveal classing with staggered publication rows, the
//! typewriter takeover of the bio line, ambient background particles,
//! smooth anchor scrolling, the email copy affordance with its tooltip,
//! header parallax and the responsive animation-speed property.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::{Interval, Timeout};
use homepage_fx_core::{
    animation_duration_for_width, page::wants_typewriter, stagger_delay, tooltip_message,
    AmbientParticle, CopyOutcome, FxError, PageConfig, Result,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlTextAreaElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MediaQueryList, Window,
};

use crate::dom;
use crate::observe::{ObserverCallback, ObserverHandle};
use crate::sched::FrameScheduler;
use crate::transient::TransientSet;

pub struct PageAnimator {
    ambient_container: HtmlElement,
    ambient: TransientSet,
    _spawner: Interval,
    _typewriter: Option<TypewriterHandle>,
    tooltip: Rc<RefCell<Option<TooltipHandle>>>,
    _sched: Option<FrameScheduler>,
    _debounce: Rc<RefCell<Option<Timeout>>>,
    _media: Option<(MediaQueryList, EventListener)>,
    _observers: Vec<ObserverHandle>,
    _listeners: Vec<EventListener>,
}

impl PageAnimator {
    pub fn init(config: PageConfig) -> Result<Self> {
        let window = dom::window()?;
        if !dom::supports_frame_effects(&window) {
            return Err(FxError::Capability(
                "requestAnimationFrame and IntersectionObserver",
            ));
        }
        let document = dom::document()?;
        let body = dom::body()?;
        let config = Rc::new(config);

        let mut observers = Vec::new();
        let mut listeners = Vec::new();

        if let Some(observer) = init_reveal(&document, config.clone())? {
            observers.push(observer);
        }

        let typewriter = init_typewriter(&document, &config)?;

        let (ambient_container, ambient, spawner) =
            init_ambient_field(&document, &body, config.clone())?;

        listeners.push(init_anchor_scroll(&document));
        listeners.push(init_email_copy(&document, config.clone()));
        let tooltip = TOOLTIP.with(|slot| slot.clone());

        let sched = init_header_parallax(&window, &document, &config, &mut listeners);

        let debounce = Rc::new(RefCell::new(None));
        let media = init_responsive_durations(
            &window,
            &document,
            config.clone(),
            debounce.clone(),
            &mut listeners,
        );

        init_hover_accents(&document, &config, &mut listeners);

        // Body gains `loaded` once every asset has arrived.
        {
            let body = body.clone();
            listeners.push(EventListener::once(&window, "load", move |_| {
                dom::add_class(&body, "loaded");
            }));
        }

        Ok(Self {
            ambient_container,
            ambient,
            _spawner: spawner,
            _typewriter: typewriter,
            tooltip,
            _sched: sched,
            _debounce: debounce,
            _media: media,
            _observers: observers,
            _listeners: listeners,
        })
    }
}

impl Drop for PageAnimator {
    fn drop(&mut self) {
        self.ambient.clear();
        self.ambient_container.remove();
        self.tooltip.borrow_mut().take();
    }
}

thread_local! {
    // One tooltip at a time; replacing it drops (and detaches) the old one.
    static TOOLTIP: Rc<RefCell<Option<TooltipHandle>>> =
        Rc::new(RefCell::new(None));
}

struct TooltipHandle {
    node: HtmlElement,
    // Hide timer first, then the fade timer. Always owned here, so
    // replacing or dropping the handle cancels whichever phase is pending.
    _timer: Timeout,
}

impl Drop for TooltipHandle {
    fn drop(&mut self) {
        self.node.remove();
    }
}

struct TypewriterHandle {
    container: HtmlElement,
    _restore: Timeout,
}

impl Drop for TypewriterHandle {
    fn drop(&mut self) {
        self.container.remove();
    }
}

/// Reveal classing for headings, publication rows and marked sections, with
/// per-index stagger on the rows.
fn init_reveal(document: &Document, config: Rc<PageConfig>) -> Result<Option<ObserverHandle>> {
    let elements = dom::query_all(document, "h2, .pub-row, .section-animate");
    if elements.is_empty() {
        return Ok(None);
    }

    let callback: ObserverCallback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                dom::add_class(&target, "active");
                if target.matches(".pub-row").unwrap_or(false) {
                    if let Some(target) = target.dyn_ref::<HtmlElement>() {
                        let delay = stagger_delay(dom::sibling_index(target), &config);
                        dom::set_style(target, "animation-delay", &format!("{delay}s"));
                    }
                }
            }
        },
    ));

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(0.1));
    options.set_root_margin("0px 0px -50px 0px");
    let handle = ObserverHandle::new(callback, Some(&options))?;
    for element in &elements {
        dom::add_class(element, "scroll-animate");
        handle.observer.observe(element);
    }
    Ok(Some(handle))
}

/// Temporarily replaces the greeting paragraph with a typewriter-styled
/// copy of its own text, restoring the original with a fade.
fn init_typewriter(document: &Document, config: &PageConfig) -> Result<Option<TypewriterHandle>> {
    let Some(bio) = document.query_selector("h2 + p").ok().flatten() else {
        return Ok(None);
    };
    let text = bio.text_content().unwrap_or_default();
    if !wants_typewriter(&text) {
        return Ok(None);
    }
    let Some(bio) = bio.dyn_ref::<HtmlElement>() else {
        return Ok(None);
    };
    let Some(parent) = bio.parent_element() else {
        return Ok(None);
    };

    let container = dom::create_div(document, "typewriter-container")?;
    let line = document.create_element("span").map_err(dom::js_err)?;
    line.set_class_name("typewriter");
    line.set_text_content(Some(text.trim()));
    container.append_child(&line).map_err(dom::js_err)?;
    parent
        .insert_before(&container, Some(bio))
        .map_err(dom::js_err)?;

    dom::set_style(bio, "opacity", "0");
    let bio = bio.clone();
    let restore = Timeout::new(config.typewriter_restore_ms, move || {
        dom::set_style(&bio, "opacity", "1");
        dom::set_style(&bio, "animation", "fadeInUp 0.8s ease-out");
    });

    Ok(Some(TypewriterHandle {
        container,
        _restore: restore,
    }))
}

/// Fixed-interval spawner for the ambient background particle field.
fn init_ambient_field(
    document: &Document,
    body: &HtmlElement,
    config: Rc<PageConfig>,
) -> Result<(HtmlElement, TransientSet, Interval)> {
    let container = dom::create_div(document, "particles-container")?;
    let _ = container.set_attribute(
        "style",
        "position:fixed;top:0;left:0;width:100%;height:100%;\
         pointer-events:none;z-index:-1;overflow:hidden",
    );
    body.append_child(&container).map_err(dom::js_err)?;

    let particles = TransientSet::new();
    let spawn_container = container.clone();
    let spawn_particles = particles.clone();
    let spawner = Interval::new(config.ambient_interval_ms, move || {
        spawn_ambient(&spawn_container, &spawn_particles, &config);
    });

    Ok((container, particles, spawner))
}

fn spawn_ambient(container: &HtmlElement, particles: &TransientSet, config: &PageConfig) {
    let Ok(document) = dom::document() else { return };
    let Ok(node) = dom::create_div(&document, "ambient-particle") else {
        return;
    };
    let particle = AmbientParticle::from_samples(
        [js_sys::Math::random(), js_sys::Math::random()],
        config,
    );
    let ttl_s = config.ambient_ttl_ms as f64 / 1_000.0;
    let _ = node.set_attribute(
        "style",
        &format!(
            "position:absolute;width:4px;height:4px;\
             background:rgba(0,45,114,0.3);border-radius:50%;\
             pointer-events:none;left:{:.2}%;top:100%;\
             animation:particle-animation {ttl_s}s linear infinite;\
             animation-delay:{:.2}s",
            particle.left_percent, particle.delay_s
        ),
    );
    if container.append_child(&node).is_err() {
        return;
    }
    particles.track(node, config.ambient_ttl_ms);
}

/// Replaces the default jump on same-page anchors with a smooth scroll.
fn init_anchor_scroll(document: &Document) -> EventListener {
    let doc = document.clone();
    EventListener::new_with_options(
        document,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
            else {
                return;
            };
            let Ok(Some(anchor)) = target.closest("a[href^=\"#\"]") else {
                return;
            };
            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            if href.len() < 2 {
                return;
            }
            let Ok(Some(section)) = doc.query_selector(&href) else {
                return;
            };
            event.prevent_default();
            let options = web_sys::ScrollIntoViewOptions::new();
            options.set_behavior(web_sys::ScrollBehavior::Smooth);
            options.set_block(web_sys::ScrollLogicalPosition::Start);
            section.scroll_into_view_with_scroll_into_view_options(&options);
        },
    )
}

/// Copies the email element's text on click, with the clipboard API first
/// and the legacy copy-command path as best-effort fallback.
fn init_email_copy(document: &Document, config: Rc<PageConfig>) -> EventListener {
    let doc = document.clone();
    EventListener::new(document, "click", move |event| {
        let Some(target) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
        else {
            return;
        };
        if target.tag_name().to_lowercase() != "email" {
            return;
        }
        let text = target.text_content().unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return;
        }

        let navigator = match dom::window() {
            Ok(window) => window.navigator(),
            Err(_) => return,
        };
        let has_clipboard = js_sys::Reflect::get(navigator.as_ref(), &JsValue::from_str("clipboard"))
            .map(|value| !value.is_undefined() && !value.is_null())
            .unwrap_or(false);

        if has_clipboard {
            let promise = navigator.clipboard().write_text(&text);
            let doc = doc.clone();
            let target = target.clone();
            let config = config.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = match wasm_bindgen_futures::JsFuture::from(promise).await {
                    Ok(_) => CopyOutcome::Copied,
                    Err(_) => {
                        tracing::debug!("clipboard api rejected, trying copy command");
                        fallback_copy(&doc, &text)
                    }
                };
                show_tooltip(&target, outcome, &config);
            });
        } else {
            let outcome = fallback_copy(&doc, &text);
            show_tooltip(&target, outcome, &config);
        }
    })
}

/// Legacy selection-and-copy-command path. Best-effort only; modern
/// sandboxes may reject the command outright.
fn fallback_copy(document: &Document, text: &str) -> CopyOutcome {
    let Some(body) = document.body() else {
        return CopyOutcome::Unavailable;
    };
    let Ok(textarea) = document.create_element("textarea") else {
        return CopyOutcome::Unavailable;
    };
    let Ok(textarea) = textarea.dyn_into::<HtmlTextAreaElement>() else {
        return CopyOutcome::Unavailable;
    };
    textarea.set_value(text);
    if body.append_child(&textarea).is_err() {
        return CopyOutcome::Unavailable;
    }
    textarea.select();
    let copied = document
        .dyn_ref::<web_sys::HtmlDocument>()
        .and_then(|doc| doc.exec_command("copy").ok())
        .unwrap_or(false);
    textarea.remove();
    if copied {
        CopyOutcome::FallbackCopied
    } else {
        CopyOutcome::Unavailable
    }
}

fn show_tooltip(anchor: &Element, outcome: CopyOutcome, config: &PageConfig) {
    let Ok(document) = dom::document() else { return };
    let Ok(body) = dom::body() else { return };
    let Ok(node) = dom::create_div(&document, "copy-tooltip") else {
        return;
    };
    node.set_text_content(Some(tooltip_message(outcome)));

    let rect = anchor.get_bounding_client_rect();
    let _ = node.set_attribute(
        "style",
        &format!(
            "position:fixed;background:#002D72;color:white;padding:8px 12px;\
             border-radius:6px;font-size:12px;z-index:1000;white-space:nowrap;\
             transform:translateX(-50%);animation:fadeInUp 0.3s ease-out;\
             left:{:.0}px;top:{:.0}px",
            rect.left() + rect.width() / 2.0,
            rect.top() - 40.0
        ),
    );
    if body.append_child(&node).is_err() {
        return;
    }

    // This timer fires only while its own handle still occupies the slot;
    // a newer tooltip replacing the handle cancels it.
    let fade_ms = config.tooltip_fade_ms;
    let hide = Timeout::new(config.tooltip_visible_ms, move || {
        TOOLTIP.with(|slot| {
            let mut slot = slot.borrow_mut();
            let Some(handle) = slot.as_mut() else { return };
            dom::set_style(
                &handle.node,
                "animation",
                &format!("fadeIn {}s ease-out reverse", fade_ms as f64 / 1_000.0),
            );
            handle._timer = Timeout::new(fade_ms, || {
                TOOLTIP.with(|slot| slot.borrow_mut().take());
            });
        });
    });

    TOOLTIP.with(|slot| {
        *slot.borrow_mut() = Some(TooltipHandle { node, _timer: hide });
    });
}

/// Header parallax through the shared frame-coalescing scheduler.
fn init_header_parallax(
    window: &Window,
    document: &Document,
    config: &PageConfig,
    listeners: &mut Vec<EventListener>,
) -> Option<FrameScheduler> {
    let header = document
        .query_selector("header")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())?;

    let speed = config.header_parallax_speed;
    let parallax_window = window.clone();
    let sched = FrameScheduler::new(move || {
        let metrics = dom::scroll_metrics(&parallax_window);
        dom::set_style(
            &header,
            "transform",
            &format!(
                "translateY({}px)",
                homepage_fx_core::parallax_offset(metrics, speed)
            ),
        );
    });

    let scroll_sched = sched.clone();
    listeners.push(EventListener::new(window, "scroll", move |_| {
        scroll_sched.request();
    }));
    Some(sched)
}

/// Keeps `--animation-duration` in step with the viewport width, via the
/// media query and a debounced resize fallback.
fn init_responsive_durations(
    window: &Window,
    document: &Document,
    config: Rc<PageConfig>,
    debounce: Rc<RefCell<Option<Timeout>>>,
    listeners: &mut Vec<EventListener>,
) -> Option<(MediaQueryList, EventListener)> {
    apply_animation_duration(document, dom::viewport_width(window), &config);

    {
        let window = window.clone();
        let document = document.clone();
        let config = config.clone();
        let debounce = debounce.clone();
        listeners.push(EventListener::new(&window.clone(), "resize", move |_| {
            let window = window.clone();
            let document = document.clone();
            let config = config.clone();
            let timer = Timeout::new(config.resize_debounce_ms, move || {
                apply_animation_duration(&document, dom::viewport_width(&window), &config);
            });
            // Replacing the slot cancels any still-pending debounce timer.
            *debounce.borrow_mut() = Some(timer);
        }));
    }

    let query = format!("(max-width: {:.0}px)", config.narrow_width);
    let media = window.match_media(&query).ok().flatten()?;
    let media_document = document.clone();
    let media_window = window.clone();
    let listener = EventListener::new(&media, "change", move |_| {
        apply_animation_duration(
            &media_document,
            dom::viewport_width(&media_window),
            &config,
        );
    });
    Some((media, listener))
}

fn apply_animation_duration(document: &Document, width: f64, config: &PageConfig) {
    let Some(root) = document
        .document_element()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let duration = animation_duration_for_width(width, config);
    dom::set_style(&root, "--animation-duration", &format!("{duration}s"));
}

/// Avatar scale and social icon accents, straight class/style toggles.
fn init_hover_accents(
    document: &Document,
    config: &PageConfig,
    listeners: &mut Vec<EventListener>,
) {
    if let Some(avatar) = document
        .query_selector(".image.avatar")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        let enter = avatar.clone();
        listeners.push(EventListener::new(&avatar, "mouseenter", move |_| {
            dom::set_style(&enter, "transform", "scale(1.02)");
        }));
        let leave = avatar.clone();
        listeners.push(EventListener::new(&avatar, "mouseleave", move |_| {
            dom::set_style(&leave, "transform", "scale(1)");
        }));
    }

    for (index, icon) in dom::query_all_html(document, ".social-icons a")
        .into_iter()
        .enumerate()
    {
        let delay = stagger_delay(index, config);
        dom::set_style(
            &icon,
            "animation",
            &format!("fadeInUp 0.6s ease-out {delay}s both"),
        );
        let enter = icon.clone();
        listeners.push(EventListener::new(&icon, "mouseenter", move |_| {
            dom::set_style(&enter, "animation", "pulse 0.6s ease-in-out");
        }));
        let leave = icon.clone();
        listeners.push(EventListener::new(&icon, "mouseleave", move |_| {
            dom::set_style(&leave, "animation", "");
        }));
    }
}
