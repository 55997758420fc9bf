//! # sync-cli
//!
//! CLI tool for triggering and watching AppFactory sync.
//!
//! ## Commands
//!
//! - `trigger`: Run a sync attempt for a scope
//! - `state`: Show the current state of a scope
//! - `watch`: Follow state changes of a scope
//!
//! Omitting the entity type targets every scope.
//!
//! ## Example
//!
//! ```bash
//! # Sync feature flags through the backend at the default address
//! sync-cli trigger feature_flag
//!
//! # Watch everything on another backend, stopping after 5 changes
//! sync-cli --base-url http://10.0.0.2:8081/api watch --count 5
//!
//! # Run the in-process engine instead
//! sync-cli --embedded trigger app_settings
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use sync_client::create_engine;
use sync_types::SyncScope;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{state, trigger, watch};
use config::Overrides;

/// CLI tool for triggering and watching AppFactory sync.
#[derive(Parser, Debug)]
#[command(name = "sync-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Client configuration file (default: ./sync.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the coordination endpoint (implies remote mode)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Use the in-process engine instead of a remote endpoint
    #[arg(long, global = true)]
    embedded: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a sync attempt
    Trigger {
        /// Entity type to sync (omit for everything)
        entity: Option<String>,
    },

    /// Show the current sync state
    State {
        /// Entity type to inspect (omit for everything)
        entity: Option<String>,
    },

    /// Follow sync state changes
    Watch {
        /// Entity type to follow (omit for everything)
        entity: Option<String>,

        /// Stop after this many states
        #[arg(long, short)]
        count: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let overrides = Overrides {
        config: cli.config,
        base_url: cli.base_url,
        embedded: cli.embedded,
    };
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let config = config::resolve(&overrides, &cwd)?;
    debug!("Resolved {:?} mode, base URL {}", config.mode, config.base_url);

    let engine = create_engine(config.engine_mode(), &config).context("Failed to create engine")?;
    let mut out = io::stdout();

    match cli.command {
        Commands::Trigger { entity } => {
            trigger::run(engine.as_ref(), &scope_for(entity), &mut out).await?;
        }
        Commands::State { entity } => {
            state::run(engine.as_ref(), &scope_for(entity), &mut out).await?;
        }
        Commands::Watch { entity, count } => {
            watch::run(engine.as_ref(), &scope_for(entity), count, &mut out).await?;
        }
    }

    Ok(())
}

fn scope_for(entity: Option<String>) -> SyncScope {
    SyncScope::from_label(entity.as_deref())
}

/// Log to stderr so command output on stdout stays clean.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
