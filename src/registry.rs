//! One delegate per tracked path

use crate::delegate::IconDelegate;
use crate::error::{FileIconsError, FileIconsResult};
use crate::resource::Resource;
use crate::services::IconServices;
use std::collections::BTreeMap;
use tracing::debug;

/// Owns the delegates of a set of resources sharing one [`IconServices`]
#[derive(Debug)]
pub struct IconRegistry {
    services: IconServices,
    delegates: BTreeMap<String, IconDelegate>,
}

impl IconRegistry {
    pub fn new(services: IconServices) -> Self {
        Self {
            services,
            delegates: BTreeMap::new(),
        }
    }

    pub fn services(&self) -> &IconServices {
        &self.services
    }

    /// Delegate for `resource`, created on first use
    pub fn track(&mut self, resource: Resource) -> IconDelegate {
        if let Some(existing) = self.delegates.get(resource.path()) {
            return existing.clone();
        }
        let path = resource.path().to_string();
        debug!("Tracking {}", path);
        let delegate = IconDelegate::new(resource, self.services.clone());
        self.delegates.insert(path, delegate.clone());
        delegate
    }

    pub fn get(&self, path: &str) -> Option<IconDelegate> {
        self.delegates.get(path).cloned()
    }

    /// Make the delegate of `path` follow the delegate of `target`
    pub fn link(&self, path: &str, target: &str) -> FileIconsResult<IconDelegate> {
        let delegate = self
            .get(path)
            .ok_or_else(|| FileIconsError::NotTracked(path.to_string()))?;
        let master = self
            .get(target)
            .ok_or_else(|| FileIconsError::NotTracked(target.to_string()))?;
        delegate.set_master(Some(&master));
        Ok(delegate)
    }

    /// Stop tracking `path`, destroying its delegate
    pub fn untrack(&mut self, path: &str) -> bool {
        match self.delegates.remove(path) {
            Some(delegate) => {
                delegate.destroy();
                true
            }
            None => false,
        }
    }

    /// Destroy every delegate
    pub fn clear(&mut self) {
        for (_, delegate) in std::mem::take(&mut self.delegates) {
            delegate.destroy();
        }
    }

    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }

    /// Tracked paths in sorted order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.delegates.keys().map(String::as_str)
    }
}

impl Drop for IconRegistry {
    fn drop(&mut self) {
        self.clear();
    }
}
