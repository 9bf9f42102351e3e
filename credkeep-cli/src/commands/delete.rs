//! Delete command

use anyhow::Result;
use credkeep_lib::KeyValueStore;

use super::Context;
use crate::ui;

pub fn run(ctx: &Context, key: &str) -> Result<()> {
    ctx.open_store()?.delete(key)?;

    if ctx.verbose {
        ui::success(&format!("Deleted '{}'", key));
    }
    Ok(())
}
