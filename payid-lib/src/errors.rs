//! Error types for PayID operations.
//!
//! Two failures are part of the repository contract and are meant to be
//! matched on: [`PayIdError::MissingPayId`] and [`PayIdError::AlreadyExists`].
//! Store failures (I/O, unavailability, malformed documents) pass through
//! unchanged inside [`PayIdError::Store`].

use std::fmt;

use crate::codec::StoredRecord;
use crate::store::StoreError;
use crate::PayId;

/// Error codes for API and FFI mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PayIdErrorCode {
    /// Source record required by the operation does not exist
    MissingPayId = 4000,
    /// PayID input could not be parsed
    InvalidPayId = 4001,
    /// Conditional insert found an existing record
    AlreadyExists = 4090,
    /// Store/transport layer error
    Store = 5000,
    /// Rename removed the source but could not write the target
    RenameInterrupted = 5090,
}

/// Error type for repository operations.
#[derive(Debug)]
pub enum PayIdError {
    /// An operation required an existing record and none was found.
    MissingPayId {
        /// The PayID that was expected to exist
        pay_id: PayId,
    },

    /// `create` found a record already stored under the key.
    AlreadyExists {
        /// The PayID that is already taken
        pay_id: PayId,
    },

    /// Caller input is not a well-formed PayID.
    InvalidPayId {
        /// Raw input
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// The delete half of a rename succeeded but the create half failed.
    ///
    /// The record is no longer stored under either key. `record` is the copy
    /// that was read before the delete; hand it to
    /// [`AccountRepository::restore`](crate::AccountRepository::restore) to put
    /// it back.
    RenameInterrupted {
        /// Source PayID (already deleted)
        from: PayId,
        /// Target PayID (not written)
        to: PayId,
        /// The record removed from `from`
        record: Box<StoredRecord>,
        /// Failure of the create step
        source: Box<PayIdError>,
    },

    /// Store failure, propagated verbatim.
    Store(StoreError),
}

impl PayIdError {
    /// Get the error code.
    pub fn code(&self) -> PayIdErrorCode {
        match self {
            Self::MissingPayId { .. } => PayIdErrorCode::MissingPayId,
            Self::AlreadyExists { .. } => PayIdErrorCode::AlreadyExists,
            Self::InvalidPayId { .. } => PayIdErrorCode::InvalidPayId,
            Self::RenameInterrupted { .. } => PayIdErrorCode::RenameInterrupted,
            Self::Store(_) => PayIdErrorCode::Store,
        }
    }

    /// Suggested HTTP status for the request-handling layer.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MissingPayId { .. } => 404,
            Self::AlreadyExists { .. } => 409,
            Self::InvalidPayId { .. } => 400,
            Self::RenameInterrupted { .. } => 500,
            Self::Store(err) if err.is_unavailable() => 503,
            Self::Store(_) => 500,
        }
    }

    /// Returns true if retrying the same call may succeed.
    ///
    /// Only transient store failures qualify. Nothing in this crate retries
    /// on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Store(err) => err.is_transient(),
            _ => false,
        }
    }

    /// Create a missing-PayID error.
    pub fn missing(pay_id: &PayId) -> Self {
        Self::MissingPayId {
            pay_id: pay_id.clone(),
        }
    }

    /// Create an already-exists error.
    pub fn already_exists(pay_id: &PayId) -> Self {
        Self::AlreadyExists {
            pay_id: pay_id.clone(),
        }
    }

    /// Create an invalid-PayID error.
    pub fn invalid_pay_id(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPayId {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// The record carried by an interrupted rename, if any.
    pub fn orphaned_record(&self) -> Option<&StoredRecord> {
        match self {
            Self::RenameInterrupted { record, .. } => Some(record),
            _ => None,
        }
    }
}

impl fmt::Display for PayIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPayId { pay_id } => write!(f, "the PayID {} doesn't exist", pay_id),
            Self::AlreadyExists { pay_id } => write!(f, "the PayID {} already exists", pay_id),
            Self::InvalidPayId { input, reason } => {
                write!(f, "invalid PayID {:?}: {}", input, reason)
            }
            Self::RenameInterrupted { from, to, source, .. } => {
                write!(
                    f,
                    "rename {} -> {} interrupted after delete: {}",
                    from, to, source
                )
            }
            Self::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for PayIdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RenameInterrupted { source, .. } => Some(source.as_ref()),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for PayIdError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<serde_json::Error> for PayIdError {
    fn from(err: serde_json::Error) -> Self {
        Self::Store(StoreError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_status() {
        let err = PayIdError::missing(&PayId::new("alice$example.com"));
        assert_eq!(err.code(), PayIdErrorCode::MissingPayId);
        assert_eq!(err.http_status(), 404);
        assert!(!err.is_retryable());

        let err = PayIdError::already_exists(&PayId::new("alice$example.com"));
        assert_eq!(err.code(), PayIdErrorCode::AlreadyExists);
        assert_eq!(err.http_status(), 409);
    }

    #[test]
    fn test_store_errors_pass_through() {
        let err: PayIdError = StoreError::Unavailable("throttled".into()).into();
        assert_eq!(err.code(), PayIdErrorCode::Store);
        assert_eq!(err.http_status(), 503);
        assert!(err.is_retryable());
        assert!(err.to_string().contains("throttled"));

        let err: PayIdError = StoreError::malformed("bob$x.io", "missing addresses").into();
        assert_eq!(err.http_status(), 500);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_rename_interrupted_exposes_record() {
        let record = StoredRecord::new(PayId::new("old$x.io"), Vec::new(), None);
        let err = PayIdError::RenameInterrupted {
            from: PayId::new("old$x.io"),
            to: PayId::new("new$x.io"),
            record: Box::new(record.clone()),
            source: Box::new(PayIdError::already_exists(&PayId::new("new$x.io"))),
        };

        assert_eq!(err.code(), PayIdErrorCode::RenameInterrupted);
        assert_eq!(err.orphaned_record(), Some(&record));
        assert!(err.to_string().contains("already exists"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
