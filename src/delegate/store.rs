//! Priority-indexed icon candidates for one resource

use crate::icons::Icon;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Sparse slots keyed by priority. Every key holds exactly one icon, so the
/// number of occupied slots is always `len()`.
#[derive(Debug, Default)]
pub(crate) struct PriorityStore {
    slots: BTreeMap<u32, Rc<Icon>>,
}

impl PriorityStore {
    /// Put `icon` in the slot at `priority`, replacing whatever was there
    pub fn insert(&mut self, priority: u32, icon: Rc<Icon>) -> Option<Rc<Icon>> {
        self.slots.insert(priority, icon)
    }

    /// Empty the slot at `priority` if it holds this very icon
    pub fn remove_if_same(&mut self, icon: &Rc<Icon>, priority: u32) -> bool {
        match self.slots.get(&priority) {
            Some(stored) if Rc::ptr_eq(stored, icon) => {
                self.slots.remove(&priority);
                true
            }
            _ => false,
        }
    }

    /// The occupied slot with the highest priority
    pub fn highest(&self) -> Option<(u32, Rc<Icon>)> {
        self.slots
            .iter()
            .next_back()
            .map(|(priority, icon)| (*priority, Rc::clone(icon)))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::IconTables;

    fn icons() -> (Rc<Icon>, Rc<Icon>) {
        let tables = IconTables::builtin().unwrap();
        let files = tables.files();
        (Rc::clone(files.get(0).unwrap()), Rc::clone(files.get(1).unwrap()))
    }

    #[test]
    fn insert_counts_occupied_slots() {
        let (a, b) = icons();
        let mut store = PriorityStore::default();

        assert!(store.insert(3, Rc::clone(&a)).is_none());
        assert!(store.insert(7, Rc::clone(&b)).is_none());
        assert_eq!(store.len(), 2);

        // Replacing a slot does not add one
        let previous = store.insert(3, Rc::clone(&b)).unwrap();
        assert!(Rc::ptr_eq(&previous, &a));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn highest_ignores_gaps() {
        let (a, b) = icons();
        let mut store = PriorityStore::default();
        store.insert(1, Rc::clone(&a));
        store.insert(40, Rc::clone(&b));

        let (priority, icon) = store.highest().unwrap();
        assert_eq!(priority, 40);
        assert!(Rc::ptr_eq(&icon, &b));
    }

    #[test]
    fn remove_requires_same_instance() {
        let (a, b) = icons();
        let mut store = PriorityStore::default();
        store.insert(2, Rc::clone(&a));

        assert!(!store.remove_if_same(&b, 2));
        assert!(!store.remove_if_same(&a, 3));
        assert_eq!(store.len(), 1);

        assert!(store.remove_if_same(&a, 2));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn priority_zero_is_a_real_slot() {
        let (a, _) = icons();
        let mut store = PriorityStore::default();
        store.insert(0, Rc::clone(&a));

        assert_eq!(store.highest().map(|(p, _)| p), Some(0));
        assert!(store.remove_if_same(&a, 0));
        assert!(store.highest().is_none());
    }
}
