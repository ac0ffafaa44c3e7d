//! Test fixtures.

use serde_json::json;

use crate::codec::{Address, StoredRecord};
use crate::PayId;

/// Identity key used by fixture records.
pub const SAMPLE_IDENTITY_KEY: &str = "MCowBQYDK2VwAyEAGb9ECWmEzf6FQbrBZ9w7lshQhqowtrbLDFw4rXAxZuE=";

/// A signed XRPL testnet address.
pub fn xrpl_address() -> Address {
    Address::new(
        "XRPL",
        Some("TESTNET"),
        json!({ "address": "rDk7FQvkQxQQNGTtfM2Fr66s7Nm3k87vdS", "tag": "123" }),
    )
    .with_signature("eyJhbGciOiJFZERTQSJ9.c2lnbmVk")
}

/// A BTC mainnet address.
pub fn btc_address() -> Address {
    Address::new(
        "BTC",
        Some("MAINNET"),
        json!({ "address": "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq" }),
    )
}

/// An ACH address (no environment).
pub fn ach_address() -> Address {
    Address::new(
        "ACH",
        None,
        json!({ "accountNumber": "000123456789", "routingNumber": "123456780" }),
    )
}

/// Three addresses across networks, in a fixed order.
pub fn sample_addresses() -> Vec<Address> {
    vec![xrpl_address(), btc_address(), ach_address()]
}

/// A record under `pay_id` carrying [`sample_addresses`] and an identity key.
pub fn sample_record(pay_id: &str) -> StoredRecord {
    StoredRecord::new(
        PayId::new(pay_id),
        sample_addresses(),
        Some(SAMPLE_IDENTITY_KEY.to_string()),
    )
}
