//! Addresses command - resolve payment addresses for a PayID

use anyhow::Result;

use super::{parse_pay_id, Repo};
use crate::ui;

pub async fn run(
    repo: &Repo,
    pay_id: &str,
    network: Option<&str>,
    environment: Option<&str>,
    json: bool,
) -> Result<()> {
    let pay_id = parse_pay_id(pay_id)?;
    let query = repo.address_query();

    let addresses = match network {
        Some(network) => {
            query
                .addresses_for_network(&pay_id, network, environment)
                .await?
        }
        None => query.addresses_for(&pay_id).await?,
    };

    if json {
        ui::json(&addresses);
        return Ok(());
    }

    if addresses.is_empty() {
        ui::info(&format!("No addresses for {}", pay_id));
        return Ok(());
    }

    ui::header(&format!("Addresses for {}", pay_id));
    for (i, address) in addresses.iter().enumerate() {
        ui::address(i, address);
    }
    Ok(())
}
