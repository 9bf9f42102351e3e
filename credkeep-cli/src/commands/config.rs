//! Config command - show the resolved store configuration

use anyhow::Result;

use super::Context;
use crate::ui;

pub fn run(ctx: &Context, json: bool) -> Result<()> {
    let config = &ctx.config;

    if json {
        ui::json(&serde_json::to_value(config)?);
        return Ok(());
    }

    ui::header("Store Configuration");
    ui::key_value("Service", &config.service);
    ui::key_value(
        "Access group",
        config.access_group.as_deref().unwrap_or("(platform default)"),
    );
    ui::key_value("Backend", config.backend.as_str());
    if let Some(dir) = &config.file_dir {
        ui::key_value("Directory", &dir.display().to_string());
    }
    ui::key_value("Scope", &config.scope().to_string());
    Ok(())
}
