//! Typed publish/subscribe channels
//!
//! A [`Channel`] carries one kind of event. Subscribing returns a
//! [`Subscription`] guard; the handler stays connected until the guard is
//! disposed or dropped, or until the channel is cleared.
//!
//! ## Rules
//! - **Synchronous**: `emit()` calls every handler before returning.
//! - **Reentrant**: handlers may subscribe, unsubscribe or emit again while an
//!   emission is in progress. Handlers connected during an emission only see
//!   later events; handlers disconnected during an emission are not called.
//! - **Single-threaded**: channels are `!Send`, like the delegates using them.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Handler<T> = Rc<dyn Fn(&T)>;

struct Slots<T> {
    next_id: u64,
    handlers: Vec<(u64, Handler<T>)>,
}

impl<T> Slots<T> {
    fn contains(&self, id: u64) -> bool {
        self.handlers.iter().any(|(i, _)| *i == id)
    }
}

/// One event channel
pub struct Channel<T> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T: 'static> Channel<T> {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    /// Connect a handler
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next_id;
            slots.next_id += 1;
            slots.handlers.push((id, Rc::new(handler)));
            id
        };

        let slots: Weak<RefCell<Slots<T>>> = Rc::downgrade(&self.slots);
        Subscription::new(move || {
            if let Some(slots) = slots.upgrade() {
                slots.borrow_mut().handlers.retain(|(i, _)| *i != id);
            }
        })
    }

    /// Call every connected handler with `event`
    pub fn emit(&self, event: &T) {
        let snapshot: Vec<(u64, Handler<T>)> = self
            .slots
            .borrow()
            .handlers
            .iter()
            .map(|(id, handler)| (*id, Rc::clone(handler)))
            .collect();

        for (id, handler) in snapshot {
            if self.slots.borrow().contains(id) {
                handler(event);
            }
        }
    }

    /// Disconnect every handler
    pub fn clear(&self) {
        // Dropping handlers can run arbitrary destructors; keep them out of the borrow.
        let handlers = std::mem::take(&mut self.slots.borrow_mut().handlers);
        drop(handlers);
    }

    /// Number of connected handlers
    pub fn len(&self) -> usize {
        self.slots.borrow().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("handlers", &self.slots.borrow().handlers.len())
            .finish()
    }
}

/// Handle to a connected handler; disconnects on [`dispose`](Self::dispose) or drop
#[must_use = "dropping a Subscription disconnects its handler"]
pub struct Subscription {
    disconnect: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(disconnect: impl FnOnce() + 'static) -> Self {
        Self {
            disconnect: Some(Box::new(disconnect)),
        }
    }

    /// Disconnect the handler now
    pub fn dispose(mut self) {
        self.disconnect();
    }

    fn disconnect(&mut self) {
        if let Some(disconnect) = self.disconnect.take() {
            disconnect();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("connected", &self.disconnect.is_some())
            .finish()
    }
}
