//! Account repository.
//!
//! Every operation maps onto the three single-key primitives of
//! [`RecordStore`]. Uniqueness is enforced solely by the store's conditional
//! insert; the repository keeps no locks and no cached state between calls.
//!
//! # Rename is not atomic
//!
//! A rename is a delete of the old key followed by a conditional insert of
//! the new one. Between the two calls neither key resolves. If the insert
//! fails (target taken, store error) the record is stored nowhere; the
//! failure is reported as [`PayIdError::RenameInterrupted`] carrying the
//! removed record so the caller can [`restore`](AccountRepository::restore)
//! it. A process crash in that window loses the record. Nothing is retried
//! or rolled back automatically.

use std::sync::Arc;

use crate::addresses::AddressQuery;
use crate::codec::{Account, Address, StoredRecord};
use crate::store::{PutOutcome, RecordStore};
use crate::{PayId, PayIdError, Result};

/// PayID record repository over a single-key store.
pub struct AccountRepository<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for AccountRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecordStore + ?Sized> AccountRepository<S> {
    /// Create a repository over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Read-only address projection sharing this repository's store.
    pub fn address_query(&self) -> AddressQuery<S> {
        AddressQuery::new(Arc::clone(&self.store))
    }

    /// Whether a record exists for `pay_id`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(pay_id = %pay_id)))]
    pub async fn exists(&self, pay_id: &PayId) -> Result<bool> {
        Ok(self.store.get(pay_id).await?.is_some())
    }

    /// The stored record for `pay_id`, if any.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(pay_id = %pay_id)))]
    pub async fn lookup(&self, pay_id: &PayId) -> Result<Option<StoredRecord>> {
        Ok(self.store.get(pay_id).await?)
    }

    /// Insert a new PayID with its addresses.
    ///
    /// Returns the addresses as given.
    ///
    /// # Errors
    /// - [`PayIdError::AlreadyExists`] when a record is already stored under
    ///   `pay_id`, whatever its content.
    /// - [`PayIdError::Store`] on store failure.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, addresses, identity_key), fields(pay_id = %pay_id, addresses = addresses.len()))
    )]
    pub async fn create(
        &self,
        pay_id: &PayId,
        addresses: Vec<Address>,
        identity_key: Option<String>,
    ) -> Result<Vec<Address>> {
        let record = StoredRecord::new(pay_id.clone(), addresses.clone(), identity_key);
        match self.store.put_if_absent(record).await? {
            PutOutcome::Inserted => Ok(addresses),
            PutOutcome::AlreadyExists => {
                #[cfg(feature = "tracing")]
                tracing::debug!(pay_id = %pay_id, "create rejected, PayID taken");
                Err(PayIdError::already_exists(pay_id))
            }
        }
    }

    /// Delete the record for `pay_id` and, with it, all of its addresses.
    ///
    /// Deleting an unknown PayID succeeds.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(pay_id = %pay_id)))]
    pub async fn delete(&self, pay_id: &PayId) -> Result<()> {
        Ok(self.store.delete(pay_id).await?)
    }

    /// Move `old` to `new`, storing `addresses` and `identity_key` under `new`.
    ///
    /// The source is re-read right before mutating. This narrows but does not
    /// close the window for a concurrent delete.
    ///
    /// # Errors
    /// - [`PayIdError::MissingPayId`] when `old` has no record; storage is
    ///   left untouched.
    /// - [`PayIdError::RenameInterrupted`] when `old` was deleted but writing
    ///   `new` failed.
    /// - [`PayIdError::Store`] when the read or the delete fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, addresses, identity_key), fields(old = %old, new = %new))
    )]
    pub async fn replace(
        &self,
        old: &PayId,
        new: &PayId,
        addresses: Vec<Address>,
        identity_key: Option<String>,
    ) -> Result<Vec<Address>> {
        let Some(previous) = self.lookup(old).await? else {
            return Err(PayIdError::missing(old));
        };

        self.delete(old).await?;

        match self.create(new, addresses, identity_key).await {
            Ok(addresses) => Ok(addresses),
            Err(source) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    old = %old,
                    new = %new,
                    error = %source,
                    "rename interrupted after delete; record is stored under neither key"
                );
                Err(PayIdError::RenameInterrupted {
                    from: old.clone(),
                    to: new.clone(),
                    record: Box::new(previous),
                    source: Box::new(source),
                })
            }
        }
    }

    /// Rename `old` to `new`, keeping its addresses and identity key.
    ///
    /// Returns `Ok(None)` when `old` has no record (nothing to rename) and
    /// the account view of the moved record otherwise.
    ///
    /// # Errors
    /// As [`replace`](Self::replace). `MissingPayId` here means the record
    /// disappeared between the initial lookup and the re-check.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(old = %old, new = %new)))]
    pub async fn rename(&self, old: &PayId, new: &PayId) -> Result<Option<Account>> {
        let Some(record) = self.lookup(old).await? else {
            return Ok(None);
        };

        let moved = record.rekeyed(new.clone());
        self.replace(old, new, record.addresses, record.identity_key)
            .await?;
        Ok(Some(moved.to_account()))
    }

    /// Put a record back under its own key, e.g. the one carried by
    /// [`PayIdError::RenameInterrupted`].
    ///
    /// # Errors
    /// [`PayIdError::AlreadyExists`] if the key was taken in the meantime.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, record), fields(pay_id = %record.id)))]
    pub async fn restore(&self, record: StoredRecord) -> Result<()> {
        let pay_id = record.id.clone();
        match self.store.put_if_absent(record).await? {
            PutOutcome::Inserted => Ok(()),
            PutOutcome::AlreadyExists => Err(PayIdError::already_exists(&pay_id)),
        }
    }
}
