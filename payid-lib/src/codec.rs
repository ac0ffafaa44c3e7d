//! Record codec.
//!
//! Converts between the persisted record layout and the domain types:
//!
//! ```json
//! {
//!   "id": "alice$example.com",
//!   "identityKey": "base64...",
//!   "addresses": [
//!     { "paymentNetwork": "XRPL", "environment": "MAINNET",
//!       "details": { "address": "r..." }, "identityKeySignature": "..." }
//!   ]
//! }
//! ```
//!
//! Stored documents are schema-flexible on most backends, so decoding is
//! strict: unknown fields, a missing `addresses` list, an empty payment
//! network or an `id` that disagrees with the lookup key are rejected as
//! malformed instead of being passed upward.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{StoreError, StoreResult};
use crate::PayId;

/// One payment destination bound to a PayID.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Address {
    /// Network or chain identifier (e.g. `XRPL`, `BTC`, `ACH`).
    pub payment_network: String,
    /// Network stage (e.g. `MAINNET`, `TESTNET`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Network-specific address payload, kept opaque.
    pub details: serde_json::Value,
    /// Signature over `details`, verifiable against the account identity key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_key_signature: Option<String>,
}

impl Address {
    /// Create an unsigned address.
    pub fn new(
        payment_network: impl Into<String>,
        environment: Option<&str>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            payment_network: payment_network.into(),
            environment: environment.map(str::to_string),
            details,
            identity_key_signature: None,
        }
    }

    /// Attach an identity key signature.
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.identity_key_signature = Some(signature.into());
        self
    }

    /// Whether this address belongs to `network` (and `environment`, when given).
    ///
    /// Both comparisons ignore ASCII case.
    pub fn matches(&self, network: &str, environment: Option<&str>) -> bool {
        if !self.payment_network.eq_ignore_ascii_case(network) {
            return false;
        }
        match environment {
            None => true,
            Some(env) => self
                .environment
                .as_deref()
                .is_some_and(|own| own.eq_ignore_ascii_case(env)),
        }
    }
}

/// The unit persisted per PayID.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StoredRecord {
    /// Store key.
    pub id: PayId,
    /// Base64-encoded public key used to verify address signatures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_key: Option<String>,
    /// Addresses in insertion order.
    pub addresses: Vec<Address>,
}

impl StoredRecord {
    /// Build a record for the insert path.
    pub fn new(id: PayId, addresses: Vec<Address>, identity_key: Option<String>) -> Self {
        Self {
            id,
            identity_key,
            addresses,
        }
    }

    /// Build a record from an account and its addresses.
    pub fn from_account(account: &Account, addresses: Vec<Address>) -> Self {
        Self::new(
            account.pay_id.clone(),
            addresses,
            account.identity_key.clone(),
        )
    }

    /// Project the record into an [`Account`].
    ///
    /// Timestamps are not persisted; both are stamped with the current time,
    /// so two projections of the same record differ in their timestamps.
    pub fn to_account(&self) -> Account {
        let now = Utc::now();
        Account {
            id: self.id.clone(),
            pay_id: self.id.clone(),
            identity_key: self.identity_key.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy of this record stored under another key.
    pub fn rekeyed(&self, id: PayId) -> Self {
        Self {
            id,
            identity_key: self.identity_key.clone(),
            addresses: self.addresses.clone(),
        }
    }

    fn validate(&self, key: &PayId) -> StoreResult<()> {
        if self.id.as_str().is_empty() {
            return Err(StoreError::malformed(key.as_str(), "empty id"));
        }
        if &self.id != key {
            return Err(StoreError::malformed(
                key.as_str(),
                format!("record id {} does not match key", self.id),
            ));
        }
        if let Some(pos) = self
            .addresses
            .iter()
            .position(|a| a.payment_network.trim().is_empty())
        {
            return Err(StoreError::malformed(
                key.as_str(),
                format!("address {pos} has an empty payment network"),
            ));
        }
        Ok(())
    }
}

/// Identity of a PayID holder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Same value as `pay_id`.
    pub id: PayId,
    /// The PayID.
    pub pay_id: PayId,
    /// Base64-encoded public key.
    pub identity_key: Option<String>,
    /// Informational only.
    pub created_at: DateTime<Utc>,
    /// Informational only.
    pub updated_at: DateTime<Utc>,
}

/// Serialize a record to its persisted JSON layout.
pub fn encode_record(record: &StoredRecord) -> StoreResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(record)?)
}

/// Decode and validate a persisted document read under `key`.
pub fn decode_record(key: &PayId, bytes: &[u8]) -> StoreResult<StoredRecord> {
    let record: StoredRecord = serde_json::from_slice(bytes)
        .map_err(|e| StoreError::malformed(key.as_str(), e.to_string()))?;
    record.validate(key)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn xrpl() -> Address {
        Address::new("XRPL", Some("TESTNET"), json!({ "address": "rDk7FQvkQxQQNGTtfM2Fr66s7Nm3k87vdS" }))
    }

    #[test]
    fn test_account_projection() {
        let record = StoredRecord::new(
            PayId::new("alice$example.com"),
            vec![xrpl()],
            Some("a2V5".into()),
        );
        let account = record.to_account();
        assert_eq!(account.id, record.id);
        assert_eq!(account.pay_id, record.id);
        assert_eq!(account.identity_key.as_deref(), Some("a2V5"));
        assert_eq!(account.created_at, account.updated_at);

        let back = StoredRecord::from_account(&account, record.addresses.clone());
        assert_eq!(back, record);
    }

    #[test]
    fn test_persisted_layout() {
        let record = StoredRecord::new(
            PayId::new("alice$example.com"),
            vec![xrpl().with_signature("sig")],
            None,
        );
        let value: serde_json::Value = serde_json::from_slice(&encode_record(&record).unwrap()).unwrap();

        assert_eq!(value["id"], "alice$example.com");
        assert!(value.get("identityKey").is_none());
        assert_eq!(value["addresses"][0]["paymentNetwork"], "XRPL");
        assert_eq!(value["addresses"][0]["environment"], "TESTNET");
        assert_eq!(value["addresses"][0]["identityKeySignature"], "sig");
    }

    #[test]
    fn test_decode_rejects_key_mismatch() {
        let record = StoredRecord::new(PayId::new("bob$example.com"), vec![], None);
        let bytes = encode_record(&record).unwrap();

        let err = decode_record(&PayId::new("alice$example.com"), &bytes).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn test_decode_rejects_loose_shapes() {
        let key = PayId::new("alice$example.com");
        let cases = [
            json!({ "id": "alice$example.com" }),
            json!({ "id": "alice$example.com", "addresses": [], "extra": 1 }),
            json!({ "id": "alice$example.com", "addresses": [{ "paymentNetwork": "", "details": {} }] }),
            json!({ "id": "alice$example.com", "addresses": "XRPL" }),
        ];
        for case in cases {
            let bytes = serde_json::to_vec(&case).unwrap();
            assert!(decode_record(&key, &bytes).is_err(), "accepted: {case}");
        }
    }

    #[test]
    fn test_decode_accepts_minimal_address() {
        let key = PayId::new("alice$example.com");
        let doc = json!({
            "id": "alice$example.com",
            "addresses": [{ "paymentNetwork": "ACH", "details": { "accountNumber": "000123" } }]
        });
        let record = decode_record(&key, &serde_json::to_vec(&doc).unwrap()).unwrap();
        assert_eq!(record.addresses[0].environment, None);
        assert_eq!(record.identity_key, None);
    }

    #[test]
    fn test_address_matching() {
        let address = xrpl();
        assert!(address.matches("xrpl", None));
        assert!(address.matches("XRPL", Some("testnet")));
        assert!(!address.matches("XRPL", Some("MAINNET")));
        assert!(!address.matches("BTC", None));

        let ach = Address::new("ACH", None, json!({}));
        assert!(!ach.matches("ACH", Some("MAINNET")));
    }
}
