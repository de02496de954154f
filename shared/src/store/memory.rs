use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::{RecordStore, StoreError};
use crate::item::Item;

/// In-process `RecordStore` for tests. Records are keyed by the string value of
/// a single key attribute, per table.
#[derive(Debug)]
pub struct MemoryRecordStore {
    key_attribute: String,
    tables: Mutex<HashMap<String, BTreeMap<String, Item>>>,
    unavailable: AtomicBool,
    puts: AtomicUsize,
}

impl MemoryRecordStore {
    pub fn new(key_attribute: &str) -> Self {
        Self {
            key_attribute: key_attribute.to_string(),
            tables: Mutex::new(HashMap::new()),
            unavailable: AtomicBool::new(false),
            puts: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of successful `put` calls so far
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Store `item` as-is, bypassing the put counter
    pub fn insert_raw(&self, table_name: &str, item: Item) {
        let key = self.key_of(&item).unwrap_or_default();
        self.tables()
            .entry(table_name.to_string())
            .or_default()
            .insert(key, item);
    }

    /// Current contents of a record, if present
    pub fn record(&self, table_name: &str, key: &str) -> Option<Item> {
        self.tables()
            .get(table_name)
            .and_then(|table| table.get(key))
            .cloned()
    }

    pub fn len(&self, table_name: &str) -> usize {
        self.tables()
            .get(table_name)
            .map_or(0, |table| table.len())
    }

    /// Poisoned locks are recovered rather than propagated
    fn tables(&self) -> MutexGuard<'_, HashMap<String, BTreeMap<String, Item>>> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn key_of(&self, item: &Item) -> Option<String> {
        item.get(&self.key_attribute)
            .and_then(|v| v.as_s().ok())
            .cloned()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store switched off".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get(&self, table_name: &str, key: Item) -> Result<Option<Item>, StoreError> {
        self.check_available()?;
        let Some(key) = self.key_of(&key) else {
            return Ok(None);
        };
        Ok(self.record(table_name, &key))
    }

    async fn scan(&self, table_name: &str) -> Result<Vec<Item>, StoreError> {
        self.check_available()?;
        Ok(self.tables()
            .get(table_name)
            .map(|table| table.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn put(&self, table_name: &str, item: Item) -> Result<(), StoreError> {
        self.check_available()?;
        self.insert_raw(table_name, item);
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete(&self, table_name: &str, key: Item) -> Result<(), StoreError> {
        self.check_available()?;
        if let Some(key) = self.key_of(&key) {
            if let Some(table) = self.tables().get_mut(table_name) {
                table.remove(&key);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::string_key;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryRecordStore::new("email");
        store.put("Users", string_key("email", "a@b.com")).await.unwrap();

        let found = store.get("Users", string_key("email", "a@b.com")).await.unwrap();
        assert!(found.is_some());
        assert_eq!(store.put_count(), 1);

        store.delete("Users", string_key("email", "a@b.com")).await.unwrap();
        store.delete("Users", string_key("email", "a@b.com")).await.unwrap();
        assert_eq!(store.len("Users"), 0);
        assert!(store.get("Users", string_key("email", "a@b.com")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unavailable_fails_every_primitive() {
        let store = MemoryRecordStore::new("email");
        store.set_unavailable(true);

        assert!(store.get("Users", string_key("email", "a@b.com")).await.is_err());
        assert!(store.scan("Users").await.is_err());
        assert!(store.put("Users", string_key("email", "a@b.com")).await.is_err());
        assert!(store.delete("Users", string_key("email", "a@b.com")).await.is_err());
        assert_eq!(store.put_count(), 0);
    }

    #[test]
    fn test_poisoned_lock_still_serves_records() {
        let store = MemoryRecordStore::new("email");
        store.insert_raw("Users", string_key("email", "a@b.com"));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.tables();
            panic!("poison the lock");
        }));
        assert!(result.is_err());

        assert_eq!(store.len("Users"), 1);
        assert!(store.record("Users", "a@b.com").is_some());
    }
}
