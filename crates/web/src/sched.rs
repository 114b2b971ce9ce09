//! Frame-coalescing scheduler shared by the scroll-driven controllers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Coalesces any number of `request` calls per frame into a single update
/// pass on the next animation frame.
///
/// One dirty flag plus one pending callback: the first `request` after an
/// idle frame schedules the callback, later requests in the same frame are
/// absorbed. Dropping the scheduler cancels any pending frame.
#[derive(Clone)]
pub struct FrameScheduler {
    inner: Rc<Inner>,
}

struct Inner {
    pending: Cell<bool>,
    raf_id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl FrameScheduler {
    pub fn new<F: FnMut() + 'static>(mut update: F) -> Self {
        let inner = Rc::new(Inner {
            pending: Cell::new(false),
            raf_id: Cell::new(None),
            callback: RefCell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let callback = Closure::wrap(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.pending.set(false);
                inner.raf_id.set(None);
            }
            update();
        }) as Box<dyn FnMut()>);
        *inner.callback.borrow_mut() = Some(callback);

        Self { inner }
    }

    /// Marks the state dirty and schedules one update pass unless a frame
    /// is already pending.
    pub fn request(&self) {
        if self.inner.pending.replace(true) {
            return;
        }
        let Some(window) = web_sys::window() else {
            self.inner.pending.set(false);
            return;
        };
        let borrowed = self.inner.callback.borrow();
        let Some(callback) = borrowed.as_ref() else {
            self.inner.pending.set(false);
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => self.inner.raf_id.set(Some(id)),
            Err(_) => self.inner.pending.set(false),
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.raf_id.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
    }
}
