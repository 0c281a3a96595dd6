//! Notefold daemon entry point.
//!
//! Loads configuration, initializes logging, starts the reconciliation
//! scheduler, and handles graceful shutdown.

mod scheduler;
mod signals;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use notefold_core::{AppConfig, LocalStore, Reconciler};

use crate::scheduler::Scheduler;

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// Notefold reconciliation daemon.
#[derive(Parser, Debug)]
#[command(
    name = "notefold-daemon",
    version,
    about = "Fold sync-conflict note copies back into their canonical files"
)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: PathBuf,

    /// Override the log level from the config file (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = AppConfig::load_from_file(&args.config)
        .context("failed to load configuration file")?;
    config.validate().context("configuration validation failed")?;

    // Initialize tracing. The non-blocking writer guard must outlive main.
    let log_level = args
        .log_level
        .as_deref()
        .unwrap_or(&config.daemon.log_level);
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _file_guard = match &config.daemon.log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir).context("failed to create log directory")?;
            let appender = tracing_appender::rolling::daily(log_dir, "notefold.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .init();
            None
        }
    };

    // Startup banner
    info!("========================================");
    info!("  Notefold Daemon v{}", env!("CARGO_PKG_VERSION"));
    info!("========================================");
    info!("Config file   : {}", args.config.display());
    info!("Notes dir     : {}", config.notes.dir.display());
    info!("Poll interval : {}s", config.daemon.poll_interval_secs);
    info!("Data dir      : {}", config.daemon.data_dir.display());
    info!("Log level     : {}", log_level);
    info!("========================================");

    std::fs::create_dir_all(&config.daemon.data_dir)
        .context("failed to create data directory")?;

    let reconciler = Arc::new(Reconciler::new(
        LocalStore::new(),
        config.notes.ignore_patterns.clone(),
    ));

    // SIGUSR1 requests an immediate pass; at most one request queues up.
    let (trigger_tx, trigger_rx) = mpsc::channel(1);
    signals::spawn_usr1_forwarder(trigger_tx);

    let mut sched = Scheduler::new(
        reconciler,
        config.notes.dir.clone(),
        config.daemon.data_dir.clone(),
        Duration::from_secs(config.daemon.poll_interval_secs),
        trigger_rx,
    );
    let scheduler_task = tokio::spawn(async move { sched.run().await });

    signals::wait_for_shutdown().await;

    info!("shutting down");
    scheduler_task.abort();
    let _ = scheduler_task.await;
    info!("shutdown complete");

    Ok(())
}
