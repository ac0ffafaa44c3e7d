//! Show and exists commands - inspect a PayID record

use anyhow::Result;

use super::{parse_pay_id, Repo};
use crate::ui;

pub async fn run(repo: &Repo, pay_id: &str, json: bool) -> Result<()> {
    let pay_id = parse_pay_id(pay_id)?;

    let Some(record) = repo.lookup(&pay_id).await? else {
        if json {
            ui::json(&serde_json::Value::Null);
        } else {
            ui::info(&format!("{} is not registered", pay_id));
        }
        return Ok(());
    };

    if json {
        ui::json(&record);
        return Ok(());
    }

    ui::header(&format!("PayID {}", record.id));
    ui::key_value(
        "Identity key",
        record.identity_key.as_deref().unwrap_or("(none)"),
    );
    ui::key_value("Addresses", &record.addresses.len().to_string());
    ui::separator();
    for (i, address) in record.addresses.iter().enumerate() {
        ui::address(i, address);
    }

    Ok(())
}

/// Print whether the PayID exists; exits non-zero when it does not.
pub async fn exists(repo: &Repo, pay_id: &str, json: bool) -> Result<bool> {
    let pay_id = parse_pay_id(pay_id)?;
    let found = repo.exists(&pay_id).await?;

    if json {
        ui::json(&serde_json::json!({ "payId": pay_id, "exists": found }));
    } else if found {
        ui::success(&format!("{} exists", pay_id));
    } else {
        ui::info(&format!("{} does not exist", pay_id));
    }

    Ok(found)
}
