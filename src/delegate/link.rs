//! Delegation to a master delegate (symlinks following their targets)

use super::{IconChange, IconDelegate, MasterChange, Mode};
use crate::events::Subscription;
use tracing::{debug, warn};

/// State of a delegate that has been given a master at least once
pub(super) struct Link {
    pub master: Option<IconDelegate>,
    /// Subscriptions on the master's channels
    pub relay: Vec<Subscription>,
}

impl IconDelegate {
    /// The delegate this one currently follows
    pub fn master(&self) -> Option<IconDelegate> {
        match &self.inner.state.borrow().mode {
            Mode::Delegated(link) => link.master.clone(),
            Mode::Owned => None,
        }
    }

    /// Whether a master has ever been assigned
    pub fn is_delegated(&self) -> bool {
        matches!(self.inner.state.borrow().mode, Mode::Delegated(_))
    }

    /// Follow `to`, or stop following anything with `None`.
    ///
    /// The first assignment switches the delegate into delegated mode for
    /// good. Each assignment relays the new master's destroy, master-change
    /// and icon-change events, then emits a master-change followed by an
    /// icon-change event on this delegate.
    ///
    /// Assignments that would form a cycle, or that name a destroyed
    /// delegate, are refused.
    pub fn set_master(&self, to: Option<&IconDelegate>) {
        if !self.is_alive() {
            debug!("Ignoring master change on destroyed delegate");
            return;
        }

        let previous = self.master();
        if previous.as_ref() == to {
            return;
        }
        if let Some(target) = to {
            if !target.is_alive() {
                warn!("{}: refusing destroyed master {}", self.path(), target.path());
                return;
            }
            if target.chain_contains(self) {
                warn!(
                    "{}: refusing master {}, it already follows this delegate",
                    self.path(),
                    target.path()
                );
                return;
            }
        }

        let from_icon = self.peek_current_icon();

        // Old relay goes before the new one is connected
        let old_relay = match &mut self.inner.state.borrow_mut().mode {
            Mode::Delegated(link) => std::mem::take(&mut link.relay),
            Mode::Owned => Vec::new(),
        };
        drop(old_relay);

        let relay = to.map(|master| self.relay_from(master)).unwrap_or_default();
        let old_mode = std::mem::replace(
            &mut self.inner.state.borrow_mut().mode,
            Mode::Delegated(Link {
                master: to.cloned(),
                relay,
            }),
        );
        drop(old_mode);

        debug!(
            "{}: master {} -> {}",
            self.path(),
            previous.as_ref().map(|m| m.path()).unwrap_or_default(),
            to.map(|m| m.path()).unwrap_or_default()
        );

        self.inner.events.master_changed.emit(&MasterChange {
            from: previous,
            to: to.cloned(),
            transitive: false,
        });

        let to_icon = self.get_current_icon();
        self.emit_icon_change(IconChange {
            from: from_icon,
            to: to_icon,
        });
    }

    /// Whether `needle` is this delegate or anything up its master chain
    fn chain_contains(&self, needle: &IconDelegate) -> bool {
        let mut cursor = Some(self.clone());
        while let Some(delegate) = cursor {
            if delegate.ptr_eq(needle) {
                return true;
            }
            cursor = delegate.master();
        }
        false
    }

    fn relay_from(&self, master: &IconDelegate) -> Vec<Subscription> {
        let on_destroy = {
            let weak = self.downgrade();
            master.on_did_destroy(move || {
                if let Some(delegate) = weak.upgrade() {
                    delegate.set_master(None);
                }
            })
        };

        let on_master = {
            let weak = self.downgrade();
            master.on_did_change_master(move |change| {
                if let Some(delegate) = weak.upgrade() {
                    delegate.relay_master_change(change);
                }
            })
        };

        let on_icon = {
            let weak = self.downgrade();
            master.on_did_change_icon(move |change| {
                if let Some(delegate) = weak.upgrade() {
                    delegate.emit_icon_change(change.clone());
                }
            })
        };

        vec![on_destroy, on_master, on_icon]
    }

    fn relay_master_change(&self, change: &MasterChange) {
        if !self.is_alive() {
            return;
        }
        self.inner.events.master_changed.emit(&MasterChange {
            transitive: true,
            ..change.clone()
        });
    }
}
