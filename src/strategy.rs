//! Strategies decide which icons apply to a resource
//!
//! A strategy never returns anything; it registers candidates on the
//! resource's delegate with [`IconDelegate::add`], at whatever priority it
//! considers appropriate. Any closure `Fn(&Resource, &IconDelegate)` is a
//! strategy.

use crate::delegate::IconDelegate;
use crate::icons::{IconTables, TableKind};
use crate::resource::Resource;
use std::rc::Rc;
use tracing::trace;

pub trait Strategy {
    /// Register zero or more icons for `resource` on `delegate`
    fn query(&self, resource: &Resource, delegate: &IconDelegate);
}

impl<F> Strategy for F
where
    F: Fn(&Resource, &IconDelegate),
{
    fn query(&self, resource: &Resource, delegate: &IconDelegate) {
        self(resource, delegate)
    }
}

/// Matches each icon's name and path rules against the resource
#[derive(Debug, Clone)]
pub struct PathStrategy {
    tables: Rc<IconTables>,
}

impl PathStrategy {
    pub fn new(tables: Rc<IconTables>) -> Self {
        Self { tables }
    }
}

impl Strategy for PathStrategy {
    fn query(&self, resource: &Resource, delegate: &IconDelegate) {
        let table = self
            .tables
            .table(TableKind::for_directory(resource.is_directory()));
        let name = resource.name();

        for icon in table.iter().filter(|icon| icon.matches(name, resource.path())) {
            trace!(
                "{} matched {} at priority {}",
                resource.path(),
                icon.class_name(),
                icon.priority()
            );
            delegate.add(Rc::clone(icon), icon.priority());
        }
    }
}
