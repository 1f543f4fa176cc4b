//! Per-resource icon resolution
//!
//! Every tracked resource gets one [`IconDelegate`]. Strategies register
//! candidate icons on it at different priorities; the delegate keeps the
//! highest one as its current icon, writes it to the resolved-icon cache and
//! tells subscribers whenever it changes.
//!
//! ## Resolution
//! - `add(icon, p)` promotes `icon` when `p` is at least the current priority.
//! - With no current icon, the highest occupied slot is promoted on demand.
//! - With no candidates at all, the strategy is queried.
//! - Files always try to end up with an icon; directories may have none.
//!
//! ## Delegation
//! A delegate can follow a master (a symlink follows its target). While a
//! master is attached the delegate reports the master's icon and relays its
//! events. See [`IconDelegate::set_master`].
//!
//! ## Lifecycle
//! ```text
//! new ──► deserialize ──► (deferred query) ──► add/remove/set_master ... ──► destroy
//! ```
//! After `destroy` every mutation is a no-op and every query returns nothing.

mod bridge;
mod link;
mod store;

use crate::events::{Channel, Subscription};
use crate::icons::{ColourMode, Icon};
use crate::resource::Resource;
use crate::services::IconServices;
use link::Link;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use store::PriorityStore;
use tracing::{debug, trace};

/// First class of a symlink pointing at a directory
pub const SYMLINK_DIRECTORY_CLASS: &str = "icon-file-symlink-directory";

/// First class of a symlink pointing at a file
pub const SYMLINK_FILE_CLASS: &str = "icon-file-symlink-file";

/// Payload of the icon-change event
#[derive(Debug, Clone)]
pub struct IconChange {
    pub from: Option<Rc<Icon>>,
    pub to: Option<Rc<Icon>>,
}

/// Payload of the master-change event
#[derive(Debug, Clone)]
pub struct MasterChange {
    pub from: Option<IconDelegate>,
    pub to: Option<IconDelegate>,
    /// Set when the change happened further up the master chain and is
    /// only being relayed
    pub transitive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Alive,
    /// Destroy event is being emitted; reads still work, writes do not
    Destroying,
    Destroyed,
}

/// Where the current icon comes from
#[derive(Default)]
enum Mode {
    /// Resolved from this delegate's own slots
    #[default]
    Owned,
    /// Has been given a master at least once; never goes back to `Owned`
    Delegated(Link),
}

#[derive(Default)]
struct State {
    store: PriorityStore,
    current: Option<Rc<Icon>>,
    current_priority: Option<u32>,
    mode: Mode,
    applied_classes: Option<Vec<String>>,
}

#[derive(Default)]
struct Events {
    destroyed: Channel<()>,
    icon_changed: Channel<IconChange>,
    master_changed: Channel<MasterChange>,
}

impl Events {
    fn clear(&self) {
        self.destroyed.clear();
        self.icon_changed.clear();
        self.master_changed.clear();
    }
}

struct Inner {
    services: IconServices,
    resource: RefCell<Option<Rc<Resource>>>,
    state: RefCell<State>,
    events: Events,
    lifecycle: Cell<Lifecycle>,
    querying: Cell<bool>,
}

/// How a transition treats the current priority
#[derive(Debug, Clone, Copy)]
enum PriorityUpdate {
    Keep,
    Set(u32),
    Reset,
}

/// Icon resolver for one resource.
///
/// Cloning gives another handle to the same delegate; equality is identity.
#[derive(Clone)]
pub struct IconDelegate {
    inner: Rc<Inner>,
}

/// Non-owning handle used by deferred tasks and relay subscriptions
#[derive(Clone)]
pub(crate) struct WeakDelegate(Weak<Inner>);

impl WeakDelegate {
    pub fn upgrade(&self) -> Option<IconDelegate> {
        self.0.upgrade().map(|inner| IconDelegate { inner })
    }
}

fn same_icon(a: &Option<Rc<Icon>>, b: &Option<Rc<Icon>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

impl IconDelegate {
    /// Create the delegate for `resource` and seed it from the cache
    pub fn new(resource: impl Into<Rc<Resource>>, services: IconServices) -> Self {
        let delegate = Self {
            inner: Rc::new(Inner {
                services,
                resource: RefCell::new(Some(resource.into())),
                state: RefCell::new(State::default()),
                events: Events::default(),
                lifecycle: Cell::new(Lifecycle::Alive),
                querying: Cell::new(false),
            }),
        };
        delegate.deserialize();
        delegate
    }

    pub(crate) fn downgrade(&self) -> WeakDelegate {
        WeakDelegate(Rc::downgrade(&self.inner))
    }

    /// Whether both handles refer to the same delegate
    pub fn ptr_eq(&self, other: &IconDelegate) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// The resource, until the delegate is destroyed
    pub fn resource(&self) -> Option<Rc<Resource>> {
        self.inner.resource.borrow().clone()
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.lifecycle.get() == Lifecycle::Destroyed
    }

    fn is_alive(&self) -> bool {
        self.inner.lifecycle.get() == Lifecycle::Alive
    }

    fn is_directory(&self) -> bool {
        self.resource().is_some_and(|r| r.is_directory())
    }

    fn path(&self) -> String {
        self.resource()
            .map(|r| r.path().to_string())
            .unwrap_or_default()
    }

    /// Number of occupied priority slots
    pub fn num_icons(&self) -> usize {
        self.inner.state.borrow().store.len()
    }

    /// Priority of this delegate's own current icon
    pub fn current_priority(&self) -> Option<u32> {
        self.inner.state.borrow().current_priority
    }

    /// Classes computed by the last [`get_classes`](Self::get_classes) call
    pub fn applied_classes(&self) -> Option<Vec<String>> {
        self.inner.state.borrow().applied_classes.clone()
    }

    /// Register `icon` as a candidate at `priority`
    pub fn add(&self, icon: Rc<Icon>, priority: u32) {
        if !self.is_alive() {
            debug!("Ignoring add on destroyed delegate");
            return;
        }

        let promote = {
            let mut state = self.inner.state.borrow_mut();
            state.store.insert(priority, Rc::clone(&icon));
            state.current_priority.map_or(true, |current| priority >= current)
        };

        if promote {
            self.transition(Some(icon), PriorityUpdate::Set(priority));
        }
    }

    /// Withdraw `icon` from `priority`. Does nothing unless that slot holds
    /// this very icon.
    pub fn remove(&self, icon: &Rc<Icon>, priority: u32) {
        if !self.is_alive() {
            debug!("Ignoring remove on destroyed delegate");
            return;
        }

        let was_current = {
            let mut state = self.inner.state.borrow_mut();
            if !state.store.remove_if_same(icon, priority) {
                return;
            }
            state.current.as_ref().is_some_and(|c| Rc::ptr_eq(c, icon))
                && state.current_priority.map_or(true, |p| p == priority)
        };

        if was_current {
            self.transition(None, PriorityUpdate::Reset);
        }
    }

    /// The effective current icon, resolving it if necessary
    pub fn get_current_icon(&self) -> Option<Rc<Icon>> {
        if self.is_destroyed() {
            return None;
        }
        if let Some(master) = self.master() {
            return master.get_current_icon();
        }

        let (current, highest) = {
            let state = self.inner.state.borrow();
            (state.current.clone(), state.store.highest())
        };
        if current.is_some() {
            return current;
        }

        match highest {
            Some((priority, icon)) => self.transition(Some(icon), PriorityUpdate::Set(priority)),
            None => self.query_strategy(),
        }
        self.inner.state.borrow().current.clone()
    }

    /// Replace the current icon. `priority` updates the current priority
    /// when given.
    pub fn set_current_icon(&self, to: Option<Rc<Icon>>, priority: Option<u32>) {
        let update = priority.map_or(PriorityUpdate::Keep, PriorityUpdate::Set);
        self.transition(to, update);
    }

    fn transition(&self, to: Option<Rc<Icon>>, update: PriorityUpdate) {
        if !self.is_alive() {
            debug!("Ignoring icon change on destroyed delegate");
            return;
        }

        let from = {
            let mut state = self.inner.state.borrow_mut();
            if same_icon(&state.current, &to) {
                return;
            }
            let from = std::mem::replace(&mut state.current, to.clone());
            match update {
                PriorityUpdate::Keep => {}
                PriorityUpdate::Set(priority) => state.current_priority = Some(priority),
                PriorityUpdate::Reset => state.current_priority = None,
            }
            from
        };

        // Files must end up with an icon if one can be found
        if to.is_none() && !self.is_directory() {
            self.get_current_icon();
        }

        if self.master().is_some() {
            trace!("{}: own icon changed behind a master, not broadcasting", self.path());
            return;
        }

        let to = self.inner.state.borrow().current.clone();
        self.emit_icon_change(IconChange { from, to });
    }

    fn query_strategy(&self) {
        if !self.is_alive() {
            return;
        }
        if self.inner.querying.replace(true) {
            trace!("{}: query already running, not recursing", self.path());
            return;
        }
        if let Some(resource) = self.resource() {
            self.inner.services.query(&resource, self);
        }
        self.inner.querying.set(false);
    }

    /// Current icon without triggering resolution anywhere up the chain
    fn peek_current_icon(&self) -> Option<Rc<Icon>> {
        match self.master() {
            Some(master) => master.peek_current_icon(),
            None => self.inner.state.borrow().current.clone(),
        }
    }

    fn emit_icon_change(&self, change: IconChange) {
        if !self.is_alive() {
            return;
        }
        self.serialize();
        self.inner.events.icon_changed.emit(&change);
    }

    /// Display classes for the current icon.
    ///
    /// Returns `None` for a directory without an icon.
    pub fn get_classes(&self) -> Option<Vec<String>> {
        let resource = self.resource()?;
        let display = self.inner.services.display();

        let colour_mode = if display.colour_changed_only && resource.vcs_status().is_none() {
            ColourMode::None
        } else {
            display.colour_mode
        };

        let mut classes = match self.get_current_icon() {
            Some(icon) => Some(icon.classes(colour_mode)),
            None if resource.is_directory() => None,
            None => {
                let defaults: Vec<String> = display
                    .default_icon_class
                    .split_whitespace()
                    .map(String::from)
                    .collect();
                (!defaults.is_empty()).then_some(defaults)
            }
        };

        if resource.is_symlink() {
            let symlink_class = if resource.is_directory() {
                SYMLINK_DIRECTORY_CLASS
            } else {
                SYMLINK_FILE_CLASS
            };
            match classes.as_mut().and_then(|c| c.first_mut()) {
                Some(first) => *first = symlink_class.to_string(),
                None => classes = Some(vec![symlink_class.to_string()]),
            }
        }

        self.inner.state.borrow_mut().applied_classes = classes.clone();
        classes
    }

    pub fn on_did_destroy<F>(&self, handler: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        self.inner.events.destroyed.subscribe(move |_| handler())
    }

    pub fn on_did_change_icon<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&IconChange) + 'static,
    {
        self.inner.events.icon_changed.subscribe(handler)
    }

    pub fn on_did_change_master<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&MasterChange) + 'static,
    {
        self.inner.events.master_changed.subscribe(handler)
    }

    /// Tear the delegate down. Only the first call has any effect.
    pub fn destroy(&self) {
        if !self.is_alive() {
            return;
        }
        debug!("Destroying icon delegate for {}", self.path());

        self.inner.lifecycle.set(Lifecycle::Destroying);
        self.inner.events.destroyed.emit(&());

        // Relay subscriptions and icons are dropped outside the borrow
        let state = std::mem::take(&mut *self.inner.state.borrow_mut());
        drop(state);
        self.inner.events.clear();
        self.inner.resource.borrow_mut().take();

        self.inner.lifecycle.set(Lifecycle::Destroyed);
    }
}

impl PartialEq for IconDelegate {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for IconDelegate {}

impl fmt::Debug for IconDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconDelegate")
            .field("path", &self.path())
            .field("lifecycle", &self.inner.lifecycle.get())
            .finish()
    }
}
