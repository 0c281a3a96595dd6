//! `notefold scan`: list conflict artifacts without touching anything.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

use notefold_core::conflict::NoteGroup;
use notefold_core::{LocalStore, Reconciler};

use crate::style;

pub fn run(config_path: &str, dir: Option<PathBuf>, json: bool) -> Result<()> {
    let (notes_dir, ignores) = super::resolve_target(config_path, dir)?;
    let reconciler = Reconciler::new(LocalStore::new(), ignores);

    let plan = reconciler
        .plan_dir(&notes_dir)
        .with_context(|| format!("failed to scan {}", notes_dir.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    print_plan(&plan, &notes_dir);
    Ok(())
}

/// Render the grouped plan as a table. Shared with `reconcile --dry-run`.
pub fn print_plan(plan: &[NoteGroup], notes_dir: &std::path::Path) {
    if plan.is_empty() {
        println!();
        println!(
            "{}",
            style::success(&format!("No conflict artifacts in {}", notes_dir.display()))
        );
        println!();
        return;
    }

    let copies: usize = plan.iter().map(|g| g.conflicts.len()).sum();
    println!();
    println!(
        "{}",
        style::header(&format!(
            "Conflict artifacts in {} ({} copies across {} notes)",
            notes_dir.display(),
            copies,
            plan.len()
        ))
    );
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Note", "Conflict copy", "Timestamp", "Device"]);

    for group in plan {
        for conflict in &group.conflicts {
            let timestamp = conflict
                .descriptor
                .timestamp()
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| {
                    format!(
                        "{}-{}",
                        conflict.descriptor.date_token, conflict.descriptor.time_token
                    )
                });
            table.add_row(vec![
                Cell::new(&group.canonical_name),
                Cell::new(&conflict.file_name),
                Cell::new(&timestamp),
                Cell::new(&conflict.descriptor.device_token),
            ]);
        }
    }

    println!("{table}");
    println!();
}
