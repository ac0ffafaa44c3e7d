//! Address resolution queries.
//!
//! Read-only projection of a record's address list. An unknown PayID and a
//! PayID with no addresses both resolve to an empty list; callers that need
//! to tell them apart pair this with [`AccountRepository::exists`].
//!
//! [`AccountRepository::exists`]: crate::AccountRepository::exists

use std::sync::Arc;

use crate::codec::Address;
use crate::store::RecordStore;
use crate::{PayId, Result};

/// Address lookups for resolution callers.
pub struct AddressQuery<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for AddressQuery<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecordStore + ?Sized> AddressQuery<S> {
    /// Create a query facade over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All addresses for `pay_id` in stored order; empty when unknown.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(pay_id = %pay_id)))]
    pub async fn addresses_for(&self, pay_id: &PayId) -> Result<Vec<Address>> {
        Ok(self
            .store
            .get(pay_id)
            .await?
            .map(|record| record.addresses)
            .unwrap_or_default())
    }

    /// Addresses on `network`, optionally narrowed to one `environment`.
    ///
    /// Matching ignores ASCII case. Order follows the stored list.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(pay_id = %pay_id)))]
    pub async fn addresses_for_network(
        &self,
        pay_id: &PayId,
        network: &str,
        environment: Option<&str>,
    ) -> Result<Vec<Address>> {
        let mut addresses = self.addresses_for(pay_id).await?;
        addresses.retain(|a| a.matches(network, environment));
        Ok(addresses)
    }
}
