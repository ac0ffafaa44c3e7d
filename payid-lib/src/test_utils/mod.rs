//! Test utilities for the PayID repository.
//!
//! This module provides:
//! - Fixtures for addresses and records
//! - [`FaultyStore`], a store wrapper that injects failures on chosen calls
//!
//! ## Usage
//!
//! ```rust,ignore
//! use payid_lib::test_utils::{FaultyStore, Fault, StoreOp, sample_addresses};
//!
//! // Fail the first put (the create half of a rename)
//! let store = FaultyStore::new(InMemoryStore::new());
//! store.inject(StoreOp::Put, 1, Fault::Unavailable);
//! ```

mod faulty_store;
mod fixtures;

pub use faulty_store::{Fault, FaultyStore, StoreOp};
pub use fixtures::{
    ach_address, btc_address, sample_addresses, sample_record, xrpl_address, SAMPLE_IDENTITY_KEY,
};
