//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use payid_lib::prelude::*;
//! ```
//!
//! ## What's Included
//!
//! - Core types: `PayId`, `Account`, `Address`, `StoredRecord`
//! - Error types: `PayIdError`, `PayIdErrorCode`, `Result`
//! - Repository: `AccountRepository`, `AddressQuery`
//! - Store trait and backends: `RecordStore`, `PutOutcome`, `InMemoryStore`

// Core types
pub use crate::codec::{Account, Address, StoredRecord};
pub use crate::PayId;

// Error handling
pub use crate::errors::{PayIdError, PayIdErrorCode};
pub use crate::Result;

// Repository
pub use crate::addresses::AddressQuery;
pub use crate::repository::AccountRepository;

// Stores
pub use crate::config::{StoreBackend, StoreConfig};
pub use crate::store::{InMemoryStore, PutOutcome, RecordStore, StoreError};

#[cfg(feature = "file-storage")]
pub use crate::store::FileStore;
