//! `notefold status`: show the daemon's most recent run.

use anyhow::{Context, Result};

use notefold_core::models::{RunRecord, RUN_RECORD_FILE};

use crate::style;

pub fn run(config_path: &str, json: bool) -> Result<()> {
    let config = super::load_config(config_path)?;
    let record_path = config.daemon.data_dir.join(RUN_RECORD_FILE);

    let raw = match std::fs::read_to_string(&record_path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            println!("{}", style::dim("The daemon has not recorded a run yet."));
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", record_path.display()))
        }
    };

    if json {
        println!("{raw}");
        return Ok(());
    }

    let record: RunRecord = serde_json::from_str(&raw)
        .with_context(|| format!("malformed run record at {}", record_path.display()))?;

    println!();
    println!("{}", style::header("Last reconciliation pass"));
    println!("  cycle       : {}", record.cycle);
    println!("  trigger     : {}", record.trigger);
    println!("  notes dir   : {}", record.notes_dir);
    println!(
        "  recorded at : {}",
        record.recorded_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    match (&record.stats, &record.error) {
        (Some(stats), _) => {
            println!("  groups      : {}", stats.groups_scanned);
            println!("  folded      : {}", stats.conflicts_folded);
            println!("  removed     : {}", stats.files_removed);
            if stats.had_failures() {
                println!(
                    "  {}",
                    style::warn(&format!("{} groups failed", stats.groups_failed))
                );
            } else {
                println!("  {}", style::success("all groups reconciled"));
            }
        }
        (None, Some(error)) => {
            println!("  {}", style::error(&format!("pass failed: {error}")));
        }
        (None, None) => {
            println!("  {}", style::dim("no stats recorded"));
        }
    }
    println!();
    Ok(())
}
