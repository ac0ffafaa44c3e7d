//! CLI command implementations

pub mod addresses;
pub mod config;
pub mod create;
pub mod delete;
pub mod rename;
pub mod show;

use anyhow::{anyhow, bail, Context, Result};
use payid_lib::config::StoreConfig;
use payid_lib::store::RecordStore;
use payid_lib::{AccountRepository, Address, PayId};

/// Repository over whichever backend the configuration selects
pub type Repo = AccountRepository<dyn RecordStore>;

/// Open the repository described by `config`
pub fn open_repository(config: &StoreConfig) -> Result<Repo> {
    let store = config
        .open()
        .with_context(|| format!("Failed to open {} store", config.backend.as_str()))?;
    tracing::debug!(
        backend = config.backend.as_str(),
        dir = %config.table_dir().display(),
        "store opened"
    );
    Ok(AccountRepository::new(store))
}

/// Parse a PayID argument
pub fn parse_pay_id(input: &str) -> Result<PayId> {
    Ok(PayId::parse(input)?)
}

/// Parse an address argument: `NETWORK:ENVIRONMENT:DETAILS`.
///
/// The environment may be left empty (`ACH::...`). Details starting with `{`
/// are taken as a JSON object; anything else becomes `{"address": DETAILS}`.
pub fn parse_address(input: &str) -> Result<Address> {
    let mut parts = input.splitn(3, ':');
    let (Some(network), Some(environment), Some(details)) = (parts.next(), parts.next(), parts.next())
    else {
        bail!("Address must look like NETWORK:ENVIRONMENT:DETAILS, got '{}'", input);
    };

    let network = network.trim();
    if network.is_empty() {
        bail!("Address '{}' has an empty payment network", input);
    }
    let environment = Some(environment.trim()).filter(|e| !e.is_empty());

    let details = details.trim();
    let details = if details.starts_with('{') {
        let value: serde_json::Value = serde_json::from_str(details)
            .with_context(|| format!("Invalid JSON details in '{}'", input))?;
        if !value.is_object() {
            return Err(anyhow!("Address details must be a JSON object"));
        }
        value
    } else if details.is_empty() {
        bail!("Address '{}' has empty details", input);
    } else {
        serde_json::json!({ "address": details })
    };

    Ok(Address::new(
        network.to_uppercase(),
        environment.map(str::to_uppercase).as_deref(),
        details,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_address() {
        let address = parse_address("xrpl:testnet:rDk7FQvkQxQQNGTtfM2Fr66s7Nm3k87vdS").unwrap();
        assert_eq!(address.payment_network, "XRPL");
        assert_eq!(address.environment.as_deref(), Some("TESTNET"));
        assert_eq!(
            address.details["address"],
            "rDk7FQvkQxQQNGTtfM2Fr66s7Nm3k87vdS"
        );
    }

    #[test]
    fn test_parse_json_details_without_environment() {
        let address =
            parse_address(r#"ACH::{"accountNumber":"000123","routingNumber":"123:456"}"#).unwrap();
        assert_eq!(address.environment, None);
        assert_eq!(address.details["routingNumber"], "123:456");
    }

    #[test]
    fn test_parse_rejects_bad_addresses() {
        for input in ["XRPL", "XRPL:MAINNET", ":MAINNET:r1", "BTC:MAINNET:", "ACH::{bad", "ACH::[1]"] {
            assert!(parse_address(input).is_err(), "accepted: {input}");
        }
    }
}
