//! Key-value store adapters.
//!
//! The repository only needs three single-key operations from a backend:
//! a point read, an insert that fails when the key is taken, and a delete
//! that tolerates missing keys. No multi-key atomicity is assumed.
//!
//! Implementations provided:
//! - [`InMemoryStore`] for tests and short-lived processes
//! - [`FileStore`] (feature `file-storage`) keeping one JSON document per record
//!
//! ## Usage
//!
//! ```
//! # async fn demo() -> payid_lib::store::StoreResult<()> {
//! use payid_lib::store::{InMemoryStore, PutOutcome, RecordStore};
//! use payid_lib::{PayId, StoredRecord};
//!
//! let store = InMemoryStore::new();
//! let record = StoredRecord::new(PayId::new("alice$example.com"), Vec::new(), None);
//!
//! assert_eq!(store.put_if_absent(record.clone()).await?, PutOutcome::Inserted);
//! assert_eq!(store.put_if_absent(record).await?, PutOutcome::AlreadyExists);
//! # Ok(())
//! # }
//! ```

mod memory;

#[cfg(feature = "file-storage")]
mod file;

pub use memory::InMemoryStore;

#[cfg(feature = "file-storage")]
pub use file::FileStore;

use async_trait::async_trait;

use crate::codec::StoredRecord;
use crate::PayId;

/// Error type for store operations.
///
/// These are transport-class failures; the repository propagates them
/// without reinterpretation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("malformed record under {key}: {reason}")]
    Malformed { key: String, reason: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store error: {0}")]
    Other(String),
}

impl StoreError {
    /// Create a malformed-record error.
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Whether the failure may clear up on its own.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Unavailable(_))
    }

    /// Whether the backend reported itself unavailable (throttling, outage).
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Outcome of a conditional insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The record was written.
    Inserted,
    /// A record already existed under the key; nothing was written.
    AlreadyExists,
}

/// Single-key record storage.
///
/// Implementations must be linearizable per key: a `get` issued after a
/// completed `put_if_absent` or `delete` on the same key observes its effect.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Point lookup.
    async fn get(&self, key: &PayId) -> StoreResult<Option<StoredRecord>>;

    /// Insert `record` under `record.id` unless a record is already stored
    /// there. Must be atomic with respect to concurrent inserts of the same
    /// key and must never overwrite.
    async fn put_if_absent(&self, record: StoredRecord) -> StoreResult<PutOutcome>;

    /// Unconditional delete. Deleting a missing key succeeds.
    async fn delete(&self, key: &PayId) -> StoreResult<()>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for std::sync::Arc<S> {
    async fn get(&self, key: &PayId) -> StoreResult<Option<StoredRecord>> {
        (**self).get(key).await
    }

    async fn put_if_absent(&self, record: StoredRecord) -> StoreResult<PutOutcome> {
        (**self).put_if_absent(record).await
    }

    async fn delete(&self, key: &PayId) -> StoreResult<()> {
        (**self).delete(key).await
    }
}
