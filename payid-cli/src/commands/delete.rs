//! Delete command - remove a PayID and all of its addresses

use anyhow::Result;

use super::{parse_pay_id, Repo};
use crate::ui;

pub async fn run(repo: &Repo, pay_id: &str, json: bool) -> Result<()> {
    let pay_id = parse_pay_id(pay_id)?;
    repo.delete(&pay_id).await?;
    tracing::info!(pay_id = %pay_id, "deleted");

    if json {
        ui::json(&serde_json::json!({ "payId": pay_id, "deleted": true }));
    } else {
        ui::success(&format!("Deleted {}", pay_id));
    }
    Ok(())
}
