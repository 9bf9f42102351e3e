//! Push token commands
//!
//! These go through the lenient accessor: store failures are logged and
//! the command still succeeds.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use credkeep_lib::{KeyValueStore, PushTokenAccessor};

use super::Context;
use crate::ui;

fn accessor(ctx: &Context) -> Result<PushTokenAccessor<Arc<dyn KeyValueStore>>> {
    Ok(PushTokenAccessor::new(ctx.open_store()?))
}

pub fn show(ctx: &Context) -> Result<()> {
    match accessor(ctx)?.push_token() {
        Some(token) => println!("{}", hex::encode(token)),
        None => ui::absent(),
    }
    Ok(())
}

pub fn set(ctx: &Context, token: &str) -> Result<()> {
    let token = hex::decode(token.trim()).context("push token must be hex")?;
    accessor(ctx)?.set_push_token(Some(&token));

    if ctx.verbose {
        ui::success("Push token updated");
    }
    Ok(())
}

pub fn clear(ctx: &Context) -> Result<()> {
    accessor(ctx)?.clear_push_token();

    if ctx.verbose {
        ui::success("Push token cleared");
    }
    Ok(())
}
