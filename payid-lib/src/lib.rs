//! PayID directory library.
//!
//! Maps a human-readable payment identifier (`alice$example.com`) to the
//! payment addresses and optional identity key published for it. Records are
//! kept in a key-value store that only offers single-key atomic operations;
//! the [`AccountRepository`] builds create/lookup/delete/rename on top of
//! those primitives and delegates all exclusivity to the store's conditional
//! put.
//!
//! # Features
//!
//! - **Account Repository**: existence checks, lookup, create, delete, rename
//! - **Address Query**: read-only address projection for resolution callers
//! - **Store Abstraction**: trait-based adapters (in-memory, file-backed)
//!
//! # Example
//!
//! ```
//! # async fn demo() -> payid_lib::Result<()> {
//! use std::sync::Arc;
//! use payid_lib::{AccountRepository, Address, PayId};
//! use payid_lib::store::InMemoryStore;
//!
//! let repo = AccountRepository::new(Arc::new(InMemoryStore::new()));
//! let alice = PayId::new("alice$example.com");
//!
//! let address = Address::new("XRPL", Some("MAINNET"), serde_json::json!({ "address": "rAlice" }));
//! repo.create(&alice, vec![address], None).await?;
//! assert!(repo.exists(&alice).await?);
//! # Ok(())
//! # }
//! ```

pub mod addresses;
pub mod codec;
pub mod config;
pub mod errors;
pub mod prelude;
pub mod repository;
pub mod store;

/// Test utilities for repository testing.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use addresses::AddressQuery;
pub use codec::{Account, Address, StoredRecord};
pub use errors::{PayIdError, PayIdErrorCode};
pub use repository::AccountRepository;
pub use store::{PutOutcome, RecordStore, StoreError};

/// Common result alias for PayID operations.
pub type Result<T> = std::result::Result<T, PayIdError>;

/// Directory key of a PayID record.
///
/// `PayId::new` keeps the string verbatim; the repository never rewrites
/// keys. Callers accepting user input can use [`PayId::parse`] to normalize
/// and check the `user$host` shape first.
///
/// # Example
///
/// ```
/// use payid_lib::PayId;
///
/// let pay_id = PayId::parse(" Alice$Example.com ").unwrap();
/// assert_eq!(pay_id.as_str(), "alice$example.com");
/// assert_eq!(pay_id.user(), Some("alice"));
/// assert_eq!(pay_id.host(), Some("example.com"));
///
/// assert!(PayId::parse("no-dollar-sign").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PayId(pub String);

impl PayId {
    /// Wrap a key without normalization.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Normalize user input into a PayID.
    ///
    /// Trims surrounding whitespace, lowercases, and requires a non-empty user
    /// part and a non-empty host separated by the last `$`.
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();
        let Some((user, host)) = normalized.rsplit_once('$') else {
            return Err(PayIdError::invalid_pay_id(input, "missing '$' separator"));
        };
        if user.is_empty() {
            return Err(PayIdError::invalid_pay_id(input, "empty user part"));
        }
        if host.is_empty() {
            return Err(PayIdError::invalid_pay_id(input, "empty host part"));
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(PayIdError::invalid_pay_id(input, "contains whitespace"));
        }
        Ok(Self(normalized))
    }

    /// Get the PayID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// User part (before the last `$`), if the key has one.
    pub fn user(&self) -> Option<&str> {
        self.0.rsplit_once('$').map(|(user, _)| user)
    }

    /// Host part (after the last `$`), if the key has one.
    pub fn host(&self) -> Option<&str> {
        self.0.rsplit_once('$').map(|(_, host)| host)
    }
}

impl From<&str> for PayId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PayId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for PayId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
