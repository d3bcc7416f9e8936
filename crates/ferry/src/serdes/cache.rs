use crate::{stmt::Value, Instance};

use indexmap::IndexMap;

/// Loaded instances keyed by primary key, evicting the least recently used
/// once full.
pub(super) struct Cache<T> {
    capacity: usize,

    /// Ordered from least to most recently used.
    entries: IndexMap<Value, Instance<T>>,
}

impl<T> Cache<T> {
    pub(super) fn new(capacity: usize) -> Cache<T> {
        Cache {
            capacity: capacity.max(1),
            entries: IndexMap::new(),
        }
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(super) fn get(&mut self, key: &Value) -> Option<Instance<T>> {
        let index = self.entries.get_index_of(key)?;
        let last = self.entries.len() - 1;
        self.entries.move_index(index, last);
        self.entries.get_index(last).map(|(_, instance)| instance.clone())
    }

    /// Finds an instance without changing its recency. Instances that are
    /// mutably borrowed are skipped.
    pub(super) fn find(&self, mut f: impl FnMut(&T) -> bool) -> Option<Instance<T>> {
        self.entries
            .values()
            .find(|instance| instance.try_borrow().map(|entity| f(&entity)).unwrap_or(false))
            .cloned()
    }

    /// Inserts an instance as the most recently used. The cache may grow past
    /// its capacity until [`Cache::trim`] is called.
    pub(super) fn insert(&mut self, key: Value, instance: Instance<T>) {
        self.entries.shift_remove(&key);
        self.entries.insert(key, instance);
    }

    pub(super) fn is_over_capacity(&self) -> bool {
        self.entries.len() > self.capacity
    }

    /// Evicts least recently used instances until the cache is back within
    /// capacity, returning them.
    pub(super) fn trim(&mut self) -> Vec<Instance<T>> {
        let excess = self.entries.len().saturating_sub(self.capacity);
        self.entries
            .drain(..excess)
            .map(|(_, evicted)| evicted)
            .collect()
    }

    pub(super) fn remove(&mut self, key: &Value) -> Option<Instance<T>> {
        self.entries.shift_remove(key)
    }

    pub(super) fn clear(&mut self) {
        self.entries.clear();
    }
}
