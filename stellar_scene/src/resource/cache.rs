/// ResourceCache - ordered, name-searchable collection of shared resources
///
/// The cache holds one `Arc` per resource. Share counts come straight from
/// `Arc::strong_count`; a count of 1 means only the cache still uses it.

use std::sync::Arc;
use super::Resource;

#[derive(Debug)]
pub struct ResourceCache<T> {
    items: Vec<Arc<T>>,
}

impl<T: Resource> ResourceCache<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a resource; returns false if this exact instance is already cached
    pub fn insert(&mut self, item: Arc<T>) -> bool {
        if self.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// First resource with the given name
    pub fn get(&self, name: &str) -> Option<Arc<T>> {
        self.items.iter().find(|r| r.name() == name).cloned()
    }

    pub fn get_by_index(&self, index: usize) -> Option<Arc<T>> {
        self.items.get(index).cloned()
    }

    pub fn contains(&self, item: &Arc<T>) -> bool {
        self.items.iter().any(|r| Arc::ptr_eq(r, item))
    }

    /// Remove the first resource with the given name
    pub fn remove(&mut self, name: &str) -> Option<Arc<T>> {
        let index = self.items.iter().position(|r| r.name() == name)?;
        Some(self.items.remove(index))
    }

    /// Holders of the named resource, the cache included
    pub fn share_count(&self, name: &str) -> usize {
        self.items
            .iter()
            .find(|r| r.name() == name)
            .map_or(0, Arc::strong_count)
    }

    /// Drop every resource no longer referenced outside the cache.
    ///
    /// Returns the number of resources released.
    pub fn purge_unused(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|r| Arc::strong_count(r) > 1);
        before - self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Resource> Default for ResourceCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
