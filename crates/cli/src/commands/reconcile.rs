//! `notefold reconcile`: run one reconciliation pass now.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};

use notefold_core::{LocalStore, Reconciler};

use crate::style;

pub fn run(
    config_path: &str,
    dir: Option<PathBuf>,
    dry_run: bool,
    json: bool,
) -> Result<ExitCode> {
    let (notes_dir, ignores) = super::resolve_target(config_path, dir)?;
    let reconciler = Reconciler::new(LocalStore::new(), ignores);

    if dry_run {
        let plan = reconciler
            .plan_dir(&notes_dir)
            .with_context(|| format!("failed to scan {}", notes_dir.display()))?;
        if json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            super::scan::print_plan(&plan, &notes_dir);
            if !plan.is_empty() {
                println!(
                    "{}",
                    style::dim("Dry run: nothing was merged or deleted.")
                );
                println!();
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let stats = reconciler
        .reconcile_dir(&notes_dir)
        .with_context(|| format!("failed to reconcile {}", notes_dir.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else if stats.groups_scanned == 0 {
        println!("{}", style::success("Nothing to reconcile"));
    } else {
        println!(
            "{}",
            style::success(&format!(
                "Reconciled {} notes: folded {} copies, removed {} files",
                stats.groups_scanned - stats.groups_failed,
                stats.conflicts_folded,
                stats.files_removed
            ))
        );
        if stats.had_failures() {
            println!(
                "{}",
                style::warn(&format!(
                    "{} notes could not be reconciled this pass; they are left intact for retry",
                    stats.groups_failed
                ))
            );
        }
    }

    Ok(if stats.had_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
