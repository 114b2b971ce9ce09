//! Shared intersection-observer plumbing.

use homepage_fx_core::Result;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverInit};

pub(crate) type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Keeps an intersection observer and its callback alive together;
/// disconnects on drop.
pub(crate) struct ObserverHandle {
    pub observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl ObserverHandle {
    pub fn new(callback: ObserverCallback, options: Option<&IntersectionObserverInit>) -> Result<Self> {
        let observer = match options {
            Some(options) => IntersectionObserver::new_with_options(
                callback.as_ref().unchecked_ref(),
                options,
            ),
            None => IntersectionObserver::new(callback.as_ref().unchecked_ref()),
        }
        .map_err(crate::dom::js_err)?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
