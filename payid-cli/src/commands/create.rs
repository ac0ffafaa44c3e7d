//! Create command - register a new PayID

use anyhow::Result;
use payid_lib::{PayIdError, PayIdErrorCode};

use super::{parse_address, parse_pay_id, Repo};
use crate::ui;

pub async fn run(
    repo: &Repo,
    pay_id: &str,
    addresses: &[String],
    identity_key: Option<String>,
    json: bool,
) -> Result<()> {
    let pay_id = parse_pay_id(pay_id)?;
    let addresses = addresses
        .iter()
        .map(|a| parse_address(a))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(pay_id = %pay_id, count = addresses.len(), "creating PayID");

    match repo.create(&pay_id, addresses, identity_key).await {
        Ok(stored) => {
            if json {
                ui::json(&stored);
            } else {
                ui::success(&format!(
                    "Created {} with {} address(es)",
                    pay_id,
                    stored.len()
                ));
            }
            Ok(())
        }
        Err(e @ PayIdError::AlreadyExists { .. }) => {
            ui::error(&e.to_string());
            ui::info("Use 'payid rename' or 'payid delete' to change an existing PayID");
            Err(e.into())
        }
        Err(e) => {
            if e.code() == PayIdErrorCode::Store && e.is_retryable() {
                ui::warning("The store reported a transient failure; the command can be retried");
            }
            Err(e.into())
        }
    }
}
