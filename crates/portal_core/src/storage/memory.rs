//! In-memory storage for tests and throwaway sessions.

use super::{LocalStorage, StorageResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Volatile storage; contents are lost on drop.
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
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.items.borrow().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStorage;
    use crate::storage::LocalStorage;

    #[test]
    fn set_replaces_and_remove_deletes() {
        let storage = MemoryStorage::new();
        storage.set_item("darkTheme", "false").unwrap();
        storage.set_item("darkTheme", "true").unwrap();
        assert_eq!(storage.get_item("darkTheme").unwrap().as_deref(), Some("true"));
        assert_eq!(storage.len(), 1);

        storage.remove_item("darkTheme").unwrap();
        storage.remove_item("darkTheme").unwrap();
        assert!(storage.is_empty());
    }
}
