//! Get command - print a stored value

use anyhow::{Context as _, Result};
use credkeep_lib::KeyValueStore;

use super::Context;
use crate::ui;

pub fn run(ctx: &Context, key: &str, text: bool) -> Result<()> {
    let store = ctx.open_store()?;

    match store.get(key)? {
        Some(value) if text => {
            let text = String::from_utf8(value).context("value is not valid UTF-8")?;
            println!("{}", text);
        }
        Some(value) => println!("{}", hex::encode(value)),
        None => ui::absent(),
    }
    Ok(())
}
