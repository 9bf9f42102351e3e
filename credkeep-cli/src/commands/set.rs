//! Set command - store a value

use anyhow::Result;
use credkeep_lib::KeyValueStore;

use super::{parse_value, Context};
use crate::ui;

pub fn run(ctx: &Context, key: &str, value: &str, text: bool) -> Result<()> {
    let bytes = parse_value(value, text)?;
    let store = ctx.open_store()?;

    store.set(key, Some(&bytes))?;

    if ctx.verbose {
        ui::success(&format!("Stored {} bytes under '{}'", bytes.len(), key));
    }
    Ok(())
}
