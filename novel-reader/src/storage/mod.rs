//! Key/value storage backends used by the history store.
//!
//! Two kinds exist: a persistent store (browser localStorage, or
//! [`MemoryStorage`] off the browser) and a cookie-encoded store. Callers
//! pick one once and treat it as an opaque get/set/remove service.

pub mod cookie;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

pub use cookie::{CookieBackend, CookieSource, MemoryCookieJar};

/// Which kind of store a backend writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Persistent,
    Cookie,
}

/// Uniform string key/value storage.
///
/// Reads of absent keys return an empty string. Writes never fail from the
/// caller's point of view; a backend that cannot store a value logs and
/// moves on.
pub trait StorageBackend {
    fn kind(&self) -> BackendKind;
    fn get(&self, key: &str) -> String;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    /// Remove everything this backend can see, not only keys we wrote.
    fn clear(&self);
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn kind(&self) -> BackendKind {
        (**self).kind()
    }
    fn get(&self, key: &str) -> String {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }
    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
    fn clear(&self) {
        (**self).clear()
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn kind(&self) -> BackendKind {
        (**self).kind()
    }
    fn get(&self, key: &str) -> String {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }
    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
    fn clear(&self) {
        (**self).clear()
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for Rc<B> {
    fn kind(&self) -> BackendKind {
        (**self).kind()
    }
    fn get(&self, key: &str) -> String {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }
    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
    fn clear(&self) {
        (**self).clear()
    }
}

/// In-memory persistent store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.items.borrow().keys().cloned().collect()
    }
}

impl StorageBackend for MemoryStorage {
    fn kind(&self) -> BackendKind {
        BackendKind::Persistent
    }

    fn get(&self, key: &str) -> String {
        self.items.borrow().get(key).cloned().unwrap_or_default()
    }

    fn set(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }

    fn clear(&self) {
        self.items.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_absent_is_empty() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("missing"), "");
        assert_eq!(storage.kind(), BackendKind::Persistent);
    }

    #[test]
    fn test_memory_storage_read_after_write() {
        let storage = MemoryStorage::new();
        storage.set("k", "v");
        assert_eq!(storage.get("k"), "v");
        storage.set("k", "w");
        assert_eq!(storage.get("k"), "w");
        storage.remove("k");
        assert!(storage.is_empty());
    }

    #[test]
    fn test_shared_backend_through_rc() {
        let storage = Rc::new(MemoryStorage::new());
        let shared: Rc<dyn StorageBackend> = storage.clone();
        shared.set("a", "1");
        shared.set("b", "2");
        assert_eq!(storage.keys(), vec!["a".to_string(), "b".to_string()]);
        shared.clear();
        assert!(storage.is_empty());
    }
}
