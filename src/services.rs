//! Shared collaborators handed to every delegate
//!
//! Display options, the icon tables, the resolved-icon cache, the deferred
//! task queue and the strategy all live here rather than in globals, so each
//! registry (and each test) gets its own set.

use crate::cache::IconCache;
use crate::config::DisplayConfig;
use crate::delegate::IconDelegate;
use crate::icons::IconTables;
use crate::resource::Resource;
use crate::scheduler::Scheduler;
use crate::strategy::Strategy;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

struct Shared {
    display: RefCell<DisplayConfig>,
    tables: RefCell<Option<Rc<IconTables>>>,
    cache: RefCell<IconCache>,
    scheduler: Scheduler,
    strategy: RefCell<Option<Rc<dyn Strategy>>>,
}

/// Cheap-to-clone handle; clones share everything
#[derive(Clone)]
pub struct IconServices {
    shared: Rc<Shared>,
}

impl IconServices {
    /// Services with no tables and no strategy installed yet
    pub fn new(display: DisplayConfig, cache: IconCache) -> Self {
        Self {
            shared: Rc::new(Shared {
                display: RefCell::new(display),
                tables: RefCell::new(None),
                cache: RefCell::new(cache),
                scheduler: Scheduler::new(),
                strategy: RefCell::new(None),
            }),
        }
    }

    pub fn display(&self) -> DisplayConfig {
        self.shared.display.borrow().clone()
    }

    pub fn set_display(&self, display: DisplayConfig) {
        *self.shared.display.borrow_mut() = display;
    }

    /// Icon tables, if installed
    pub fn tables(&self) -> Option<Rc<IconTables>> {
        self.shared.tables.borrow().clone()
    }

    pub fn install_tables(&self, tables: Rc<IconTables>) {
        debug!(
            "Installing icon tables ({} file, {} directory icons)",
            tables.files().len(),
            tables.directories().len()
        );
        *self.shared.tables.borrow_mut() = Some(tables);
    }

    pub fn cache(&self) -> Ref<'_, IconCache> {
        self.shared.cache.borrow()
    }

    pub fn cache_mut(&self) -> RefMut<'_, IconCache> {
        self.shared.cache.borrow_mut()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.shared.scheduler
    }

    pub fn set_strategy(&self, strategy: Rc<dyn Strategy>) {
        *self.shared.strategy.borrow_mut() = Some(strategy);
    }

    /// Ask the installed strategy to register icons for `resource`
    pub fn query(&self, resource: &Resource, delegate: &IconDelegate) {
        let strategy = self.shared.strategy.borrow().clone();
        match strategy {
            Some(strategy) => strategy.query(resource, delegate),
            None => trace!("No strategy installed, skipping query for {}", resource.path()),
        }
    }
}

impl fmt::Debug for IconServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconServices")
            .field("tables_loaded", &self.shared.tables.borrow().is_some())
            .field("cached", &self.shared.cache.borrow().len())
            .field("scheduler", &self.shared.scheduler)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn clones_share_state() {
        let services = IconServices::new(DisplayConfig::default(), IconCache::new());
        let other = services.clone();

        assert!(other.tables().is_none());
        services.install_tables(Rc::new(IconTables::builtin().unwrap()));
        assert!(other.tables().is_some());

        other.cache_mut().set_frozen(true);
        assert!(services.cache().is_frozen());
    }

    #[test]
    fn query_without_strategy_is_harmless() {
        let services = IconServices::new(DisplayConfig::default(), IconCache::new());
        let delegate = IconDelegate::new(Resource::file("/a/b.txt"), services.clone());
        services.query(&Resource::file("/a/b.txt"), &delegate);
        assert_eq!(delegate.num_icons(), 0);
    }

    #[test]
    fn query_reaches_strategy() {
        let services = IconServices::new(DisplayConfig::default(), IconCache::new());
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        services.set_strategy(Rc::new(move |_: &Resource, _: &IconDelegate| {
            counter.set(counter.get() + 1);
        }));

        let delegate = IconDelegate::new(Resource::directory("/a"), services.clone());
        services.query(&Resource::directory("/a"), &delegate);
        assert_eq!(calls.get(), 1);
    }
}
