//! sync-backend binary entry point.
//!
//! Usage:
//! ```bash
//! sync-backend --config backend.toml
//! sync-backend --help
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use sync_backend::config::Config;
use sync_backend::server::Backend;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Remote coordination endpoint for AppFactory sync.
#[derive(Parser)]
#[command(name = "sync-backend")]
#[command(version, about)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "backend.toml")]
    config: PathBuf,

    /// Override the configured bind address
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sync_backend=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = if args.config.exists() {
        Config::from_file(&args.config)
            .with_context(|| format!("loading {}", args.config.display()))?
    } else {
        tracing::warn!(
            "Config file {} not found, using defaults",
            args.config.display()
        );
        Config::default()
    };
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }

    tracing::info!("Starting sync-backend v{}", env!("CARGO_PKG_VERSION"));

    Backend::new(config)
        .serve(shutdown_signal())
        .await
        .context("server failed")?;

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
