//! In-memory record store.
//!
//! Lock poisoning is reported as a store error rather than a panic.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use super::{PutOutcome, RecordStore, StoreError, StoreResult};
use crate::codec::StoredRecord;
use crate::PayId;

/// In-memory storage for PayID records.
///
/// This is useful for testing and short-lived processes.
/// Data is not persisted across restarts.
pub struct InMemoryStore {
    records: RwLock<HashMap<String, StoredRecord>>,
}

fn lock_error(context: &str) -> StoreError {
    StoreError::Other(format!("InMemoryStore: lock poisoned during {}", context))
}

impl InMemoryStore {
    /// Create a new in-memory store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored records.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    ///
    /// Returns true if the lock is poisoned.
    pub fn is_empty(&self) -> bool {
        self.records.read().map(|r| r.is_empty()).unwrap_or(true)
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> StoreResult<Vec<PayId>> {
        let records = self.records.read().map_err(|_| lock_error("keys"))?;
        let mut keys: Vec<PayId> = records.keys().map(|k| PayId::new(k.as_str())).collect();
        keys.sort();
        Ok(keys)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn get(&self, key: &PayId) -> StoreResult<Option<StoredRecord>> {
        let records = self.records.read().map_err(|_| lock_error("get"))?;
        Ok(records.get(key.as_str()).cloned())
    }

    async fn put_if_absent(&self, record: StoredRecord) -> StoreResult<PutOutcome> {
        let mut records = self
            .records
            .write()
            .map_err(|_| lock_error("put_if_absent"))?;
        if records.contains_key(record.id.as_str()) {
            return Ok(PutOutcome::AlreadyExists);
        }
        records.insert(record.id.0.clone(), record);
        Ok(PutOutcome::Inserted)
    }

    async fn delete(&self, key: &PayId) -> StoreResult<()> {
        let mut records = self.records.write().map_err(|_| lock_error("delete"))?;
        records.remove(key.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_record;

    #[tokio::test]
    async fn test_in_memory_store_basic_operations() {
        let store = InMemoryStore::new();
        let record = sample_record("alice$example.com");

        assert!(store.get(&record.id).await.unwrap().is_none());
        assert_eq!(
            store.put_if_absent(record.clone()).await.unwrap(),
            PutOutcome::Inserted
        );
        assert_eq!(store.get(&record.id).await.unwrap(), Some(record.clone()));
        assert_eq!(store.len(), 1);

        store.delete(&record.id).await.unwrap();
        assert!(store.get(&record.id).await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_conditional_put_never_overwrites() {
        let store = InMemoryStore::new();
        let original = sample_record("alice$example.com");
        let mut replacement = original.clone();
        replacement.identity_key = Some("b3RoZXI=".into());
        replacement.addresses.clear();

        store.put_if_absent(original.clone()).await.unwrap();
        let outcome = store.put_if_absent(replacement).await.unwrap();

        assert_eq!(outcome, PutOutcome::AlreadyExists);
        assert_eq!(store.get(&original.id).await.unwrap(), Some(original));
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let store = InMemoryStore::new();
        store.delete(&PayId::new("nobody$example.com")).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creators_one_winner() {
        let store = std::sync::Arc::new(InMemoryStore::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .put_if_absent(sample_record("race$example.com"))
                    .await
                    .unwrap()
            }));
        }

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap() == PutOutcome::Inserted {
                inserted += 1;
            }
        }
        assert_eq!(inserted, 1);
        assert_eq!(store.keys().unwrap(), vec![PayId::new("race$example.com")]);
    }
}
