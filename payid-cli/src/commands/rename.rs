//! Rename command - move a PayID record to a new key

use anyhow::{bail, Result};
use payid_lib::PayIdError;

use super::{parse_pay_id, Repo};
use crate::ui;

pub async fn run(repo: &Repo, old: &str, new: &str, json: bool) -> Result<()> {
    let old = parse_pay_id(old)?;
    let new = parse_pay_id(new)?;

    match repo.rename(&old, &new).await {
        Ok(Some(account)) => {
            if json {
                ui::json(&account);
            } else {
                ui::success(&format!("Renamed {} to {}", old, new));
            }
            Ok(())
        }
        Ok(None) => bail!("{} doesn't exist; nothing to rename", old),
        Err(err @ PayIdError::RenameInterrupted { .. }) => {
            recover(repo, &err).await;
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

/// Put the removed record back under its old key.
async fn recover(repo: &Repo, err: &PayIdError) {
    let Some(record) = err.orphaned_record() else {
        return;
    };

    tracing::warn!(pay_id = %record.id, "restoring record after interrupted rename");
    match repo.restore(record.clone()).await {
        Ok(()) => ui::warning(&format!("Restored {} to its previous state", record.id)),
        Err(restore_err) => {
            ui::error(&format!("Could not restore {}: {}", record.id, restore_err));
            ui::info("Record contents follow; re-create it manually:");
            ui::json(record);
        }
    }
}
