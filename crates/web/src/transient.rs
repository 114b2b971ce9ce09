//! Tracking for short-lived decorative nodes.
//!
//! Every transient node (trail particle, ripple, ambient particle) is
//! registered here together with the owned timer that will remove it, so
//! teardown can cancel timers and detach nodes instead of relying on
//! run-to-completion.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::HtmlElement;

/// A live transient node and the timer that retires it. Dropping the
/// handle cancels the timer and detaches the node.
struct TimedNode {
    node: HtmlElement,
    _timer: Timeout,
}

impl Drop for TimedNode {
    fn drop(&mut self) {
        self.node.remove();
    }
}

/// Owned set of transient nodes, keyed by spawn order.
#[derive(Clone)]
pub(crate) struct TransientSet {
    inner: Rc<Inner>,
}

struct Inner {
    nodes: RefCell<HashMap<u64, TimedNode>>,
    next_id: Cell<u64>,
}

impl TransientSet {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                nodes: RefCell::new(HashMap::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Registers `node` for removal after `ttl_ms`. Expiry untracks the
    /// node as well as detaching it.
    pub fn track(&self, node: HtmlElement, ttl_ms: u32) {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        // Weak, so pending timers never keep the set alive past teardown.
        let weak = Rc::downgrade(&self.inner);
        let timer = Timeout::new(ttl_ms, move || {
            if let Some(inner) = weak.upgrade() {
                inner.nodes.borrow_mut().remove(&id);
            }
        });
        self.inner.nodes.borrow_mut().insert(
            id,
            TimedNode {
                node,
                _timer: timer,
            },
        );
    }

    /// Cancels every pending timer and detaches every tracked node.
    pub fn clear(&self) {
        self.inner.nodes.borrow_mut().clear();
    }

    #[cfg(test)]
    pub fn live_count(&self) -> usize {
        self.inner.nodes.borrow().len()
    }
}
