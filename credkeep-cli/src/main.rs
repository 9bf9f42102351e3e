//! Credkeep CLI
//!
//! Command-line access to credential stores: read, write and delete entries,
//! and manage the push token slot.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod ui;

use commands::{Context, Overrides};

#[derive(Parser)]
#[command(name = "credkeep")]
#[command(about = "Credkeep - inspect and edit secure credential stores", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON config file (service, access_group, backend, file_dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Service identifier of the store scope
    #[arg(long, global = true)]
    service: Option<String>,

    /// Access group shared between applications
    #[arg(long, global = true)]
    access_group: Option<String>,

    /// Store backend: keychain, memory or file
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Directory of the file backend
    #[arg(long, global = true)]
    dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value of a key (hex unless --text)
    Get {
        key: String,

        /// Print the value as UTF-8 text
        #[arg(long)]
        text: bool,
    },

    /// Store a value under a key
    Set {
        key: String,

        /// Value as hex, or UTF-8 text with --text
        value: String,

        /// Treat the value as UTF-8 text
        #[arg(long)]
        text: bool,
    },

    /// Delete a key (succeeds if absent)
    Delete { key: String },

    /// Manage the push notification token
    PushToken {
        #[command(subcommand)]
        action: PushTokenAction,
    },

    /// Show the resolved store configuration
    Config {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum PushTokenAction {
    /// Print the stored token as hex
    Show,
    /// Replace the stored token
    Set {
        /// Token bytes as hex
        token: String,
    },
    /// Remove the stored token
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays scriptable
    let default_filter = if cli.verbose {
        "credkeep=debug,credkeep_lib=debug"
    } else {
        "credkeep=info,credkeep_lib=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let overrides = Overrides {
        config: cli.config,
        service: cli.service,
        access_group: cli.access_group,
        backend: cli.backend,
        dir: cli.dir,
    };
    let ctx = Context::resolve(overrides, cli.verbose)?;

    // Dispatch commands
    let result = match cli.command {
        Commands::Get { key, text } => commands::get::run(&ctx, &key, text),
        Commands::Set { key, value, text } => commands::set::run(&ctx, &key, &value, text),
        Commands::Delete { key } => commands::delete::run(&ctx, &key),
        Commands::PushToken { action } => match action {
            PushTokenAction::Show => commands::push_token::show(&ctx),
            PushTokenAction::Set { token } => commands::push_token::set(&ctx, &token),
            PushTokenAction::Clear => commands::push_token::clear(&ctx),
        },
        Commands::Config { json } => commands::config::run(&ctx, json),
    };

    if let Err(err) = &result {
        ui::error(&format!("{:#}", err));
        std::process::exit(1);
    }
    Ok(())
}
