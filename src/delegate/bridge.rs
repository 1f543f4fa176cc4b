//! Reading and writing the resolved-icon cache

use super::IconDelegate;
use crate::cache::CacheEntry;
use crate::icons::TableKind;
use std::rc::Rc;
use tracing::{debug, trace};

impl IconDelegate {
    /// Seed the delegate from its cache entry, if there is one.
    ///
    /// Retries on the next scheduler turn while the icon tables are not
    /// installed. Once an entry has been checked, a strategy query is
    /// deferred so changed rules can replace the cached icon.
    pub(super) fn deserialize(&self) {
        if !self.is_alive() {
            return;
        }
        let Some(resource) = self.resource() else {
            return;
        };

        let entry = self.inner.services.cache().get(resource.path()).cloned();
        let Some(entry) = entry else {
            trace!("{}: not cached", resource.path());
            return;
        };

        let Some(tables) = self.inner.services.tables() else {
            trace!("{}: icon tables not loaded, retrying later", resource.path());
            let weak = self.downgrade();
            self.inner.services.scheduler().defer(move || {
                if let Some(delegate) = weak.upgrade() {
                    delegate.deserialize();
                }
            });
            return;
        };

        let table = tables.table(TableKind::for_directory(resource.is_directory()));
        match table.get(entry.icon_index) {
            Some(icon) if icon.class_name() == entry.class_name => {
                trace!("{}: restored {} from cache", resource.path(), entry.class_name);
                self.add(Rc::clone(icon), entry.priority);
            }
            _ => {
                debug!(
                    "{}: discarding stale cache entry #{} ({})",
                    resource.path(),
                    entry.icon_index,
                    entry.class_name
                );
                self.inner.services.cache_mut().delete(resource.path());
            }
        }

        let weak = self.downgrade();
        self.inner.services.scheduler().defer(move || {
            if let Some(delegate) = weak.upgrade() {
                if delegate.is_alive() {
                    delegate.query_strategy();
                }
            }
        });
    }

    /// Record the current icon under this delegate's path, or forget the
    /// path when there is no icon. Frozen caches are left alone.
    pub(super) fn serialize(&self) {
        if !self.is_alive() {
            return;
        }
        let Some(resource) = self.resource() else {
            return;
        };
        if self.inner.services.cache().is_frozen() {
            trace!("{}: cache frozen, not serializing", resource.path());
            return;
        }

        let Some(icon) = self.peek_current_icon() else {
            self.inner.services.cache_mut().delete(resource.path());
            return;
        };

        // An entry that cannot describe the current icon is dropped
        let Some(tables) = self.inner.services.tables() else {
            trace!("{}: icon tables not loaded, forgetting cached icon", resource.path());
            self.inner.services.cache_mut().delete(resource.path());
            return;
        };
        let table = tables.table(TableKind::for_directory(resource.is_directory()));
        let Some(icon_index) = table.index_of(&icon) else {
            debug!(
                "{}: {} is not in the installed table, forgetting cached icon",
                resource.path(),
                icon.class_name()
            );
            self.inner.services.cache_mut().delete(resource.path());
            return;
        };

        let entry = CacheEntry {
            priority: self.current_priority().unwrap_or(0),
            icon_index,
            class_name: icon.class_name().to_string(),
            colours: icon.colours().to_vec(),
        };
        self.inner.services.cache_mut().set(resource.path(), entry);
    }
}
