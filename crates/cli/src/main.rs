//! Notefold command-line management tool.
//!
//! Provides subcommands for scanning a notes directory for sync-conflict
//! artifacts, reconciling them (one-shot or dry-run), merging two files
//! directly, classifying a filename, inspecting the daemon's last run, and
//! generating / validating configuration files.

mod commands;
mod style;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use notefold_core::AppConfig;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// Notefold command-line management tool.
#[derive(Parser, Debug)]
#[command(
    name = "notefold",
    version,
    about = "Manage and inspect note reconciliation"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(
        short,
        long,
        global = true,
        default_value = "~/.config/notefold/config.toml"
    )]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List conflict artifacts in the notes directory without changing anything.
    Scan {
        /// Directory to scan (defaults to notes.dir from the config).
        dir: Option<PathBuf>,

        /// Emit the plan as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Run one reconciliation pass now.
    Reconcile {
        /// Directory to reconcile (defaults to notes.dir from the config).
        dir: Option<PathBuf>,

        /// Show what would be folded without merging or deleting anything.
        #[arg(long)]
        dry_run: bool,

        /// Emit stats as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Merge two text files and print (or write) the result.
    Merge {
        /// Primary version; its lines come first at divergence points.
        file_a: PathBuf,

        /// Secondary version.
        file_b: PathBuf,

        /// Write the merged text here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check whether a filename is a sync-conflict artifact.
    Classify {
        /// The bare filename to test.
        filename: String,

        /// Emit the descriptor as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the daemon's most recent reconciliation pass.
    Status {
        /// Emit the raw run record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate a default configuration file.
    Init {
        /// Output path for the generated config file.
        #[arg(short, long, default_value = "./notefold.toml")]
        output: PathBuf,
    },

    /// Validate a configuration file.
    Validate,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // The CLI is quiet by default; RUST_LOG opts into core tracing output.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Scan { dir, json } => {
            commands::scan::run(&cli.config, dir, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Reconcile { dir, dry_run, json } => {
            commands::reconcile::run(&cli.config, dir, dry_run, json)
        }
        Commands::Merge {
            file_a,
            file_b,
            output,
        } => {
            commands::merge::run(&file_a, &file_b, output)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Classify { filename, json } => commands::classify::run(&filename, json),
        Commands::Status { json } => {
            commands::status::run(&cli.config, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { output } => {
            run_init(&output)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate => {
            let config = commands::load_config(&cli.config)?;
            println!(
                "{}",
                style::success(&format!(
                    "Configuration is valid (notes dir: {})",
                    config.notes.dir.display()
                ))
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_init(output: &PathBuf) -> Result<()> {
    if output.exists() {
        anyhow::bail!("{} already exists; refusing to overwrite", output.display());
    }
    std::fs::write(output, AppConfig::default_toml())
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!(
        "{}",
        style::success(&format!("Wrote default config to {}", output.display()))
    );
    println!(
        "{}",
        style::dim("Edit notes.dir before starting the daemon.")
    );
    Ok(())
}
