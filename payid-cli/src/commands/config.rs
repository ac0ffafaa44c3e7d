//! Config command - show the effective store configuration

use anyhow::Result;
use payid_lib::config::StoreConfig;

use crate::ui;

pub fn run(config: &StoreConfig, json: bool) -> Result<()> {
    if json {
        ui::json(config);
        return Ok(());
    }

    ui::header("Store Configuration");
    ui::key_value("Backend", config.backend.as_str());
    ui::key_value("Table", &config.table_name);
    ui::key_value("Stage", &config.stage);
    ui::key_value("Directory", &config.table_dir().display().to_string());
    Ok(())
}
