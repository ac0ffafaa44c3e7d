//! Repository behaviour over the in-memory store.
//!
//! Each test pins one observable property of the account repository:
//! uniqueness, existence coherence, cascading delete, address round-trip,
//! rename outcomes, and the idempotent no-ops.

use std::sync::Arc;

use payid_lib::store::InMemoryStore;
use payid_lib::test_utils::{ach_address, btc_address, sample_addresses, xrpl_address};
use payid_lib::{AccountRepository, PayId, PayIdErrorCode};

fn repo() -> AccountRepository<InMemoryStore> {
    AccountRepository::new(Arc::new(InMemoryStore::new()))
}

fn pay_id(s: &str) -> PayId {
    PayId::new(s)
}

// ============================================================================
// Create / exists / lookup
// ============================================================================

#[tokio::test]
async fn second_create_fails_regardless_of_payload() {
    let repo = repo();
    let alice = pay_id("alice$example.com");
    repo.create(&alice, sample_addresses(), None).await.unwrap();

    for payload in [vec![], vec![btc_address()], sample_addresses()] {
        let err = repo.create(&alice, payload, None).await.unwrap_err();
        assert_eq!(err.code(), PayIdErrorCode::AlreadyExists);
        assert_eq!(err.http_status(), 409);
    }
}

#[tokio::test]
async fn exists_tracks_create_and_delete() {
    let repo = repo();
    let alice = pay_id("alice$example.com");

    assert!(!repo.exists(&alice).await.unwrap());
    repo.create(&alice, sample_addresses(), None).await.unwrap();
    assert!(repo.exists(&alice).await.unwrap());
    repo.delete(&alice).await.unwrap();
    assert!(!repo.exists(&alice).await.unwrap());
}

#[tokio::test]
async fn lookup_round_trips_addresses_in_order() {
    let repo = repo();
    let alice = pay_id("alice$example.com");
    let addresses = vec![ach_address(), xrpl_address(), btc_address(), xrpl_address()];

    repo.create(&alice, addresses.clone(), Some("aWRlbnRpdHk=".into()))
        .await
        .unwrap();

    let record = repo.lookup(&alice).await.unwrap().unwrap();
    assert_eq!(record.id, alice);
    assert_eq!(record.addresses, addresses);
    assert_eq!(record.identity_key.as_deref(), Some("aWRlbnRpdHk="));
}

#[tokio::test]
async fn keys_are_exact_match() {
    let repo = repo();
    repo.create(&pay_id("alice$example.com"), sample_addresses(), None)
        .await
        .unwrap();

    assert!(!repo.exists(&pay_id("Alice$example.com")).await.unwrap());
    assert!(!repo.exists(&pay_id("alice$example.co")).await.unwrap());
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn delete_cascades_to_addresses() {
    let repo = repo();
    let alice = pay_id("alice$example.com");
    repo.create(&alice, sample_addresses(), None).await.unwrap();

    repo.delete(&alice).await.unwrap();

    let query = repo.address_query();
    assert!(query.addresses_for(&alice).await.unwrap().is_empty());
    assert!(repo.lookup(&alice).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_of_unknown_pay_id_succeeds() {
    let repo = repo();
    repo.delete(&pay_id("nobody$example.com")).await.unwrap();
    repo.delete(&pay_id("nobody$example.com")).await.unwrap();
}

#[tokio::test]
async fn pay_id_can_be_recreated_after_delete() {
    let repo = repo();
    let alice = pay_id("alice$example.com");
    repo.create(&alice, sample_addresses(), None).await.unwrap();
    repo.delete(&alice).await.unwrap();

    repo.create(&alice, vec![btc_address()], None).await.unwrap();
    assert_eq!(
        repo.lookup(&alice).await.unwrap().unwrap().addresses,
        vec![btc_address()]
    );
}

// ============================================================================
// Rename
// ============================================================================

#[tokio::test]
async fn rename_moves_record() {
    let repo = repo();
    let alice = pay_id("alice");
    let bob = pay_id("bob");
    repo.create(&alice, sample_addresses(), None).await.unwrap();

    let account = repo.rename(&alice, &bob).await.unwrap();

    assert!(account.is_some());
    assert!(!repo.exists(&alice).await.unwrap());
    assert!(repo.exists(&bob).await.unwrap());
    assert_eq!(
        repo.address_query().addresses_for(&bob).await.unwrap(),
        sample_addresses()
    );
}

#[tokio::test]
async fn rename_of_missing_source_changes_nothing() {
    let repo = repo();
    let x = pay_id("x");
    repo.create(&x, sample_addresses(), None).await.unwrap();

    let result = repo.rename(&pay_id("nobody"), &x).await.unwrap();

    assert!(result.is_none());
    assert_eq!(
        repo.lookup(&x).await.unwrap().unwrap().addresses,
        sample_addresses()
    );
    assert_eq!(repo.store().len(), 1);
}

#[tokio::test]
async fn rename_returns_fresh_account_view() {
    let repo = repo();
    let alice = pay_id("alice$example.com");
    let bob = pay_id("bob$example.com");
    repo.create(&alice, sample_addresses(), Some("a2V5".into()))
        .await
        .unwrap();

    let before = chrono::Utc::now();
    let account = repo.rename(&alice, &bob).await.unwrap().unwrap();

    assert_eq!(account.id, bob);
    assert_eq!(account.pay_id, bob);
    assert_eq!(account.identity_key.as_deref(), Some("a2V5"));
    assert!(account.created_at >= before);
}

// ============================================================================
// Address query
// ============================================================================

#[tokio::test]
async fn address_query_on_unknown_key_is_empty() {
    let repo = repo();
    let addresses = repo
        .address_query()
        .addresses_for(&pay_id("unknown"))
        .await
        .unwrap();
    assert!(addresses.is_empty());
}

#[tokio::test]
async fn address_query_sees_writes_without_caching() {
    let repo = repo();
    let query = repo.address_query();
    let alice = pay_id("alice$example.com");

    assert!(query.addresses_for(&alice).await.unwrap().is_empty());
    repo.create(&alice, vec![btc_address()], None).await.unwrap();
    assert_eq!(query.addresses_for(&alice).await.unwrap(), vec![btc_address()]);
}
