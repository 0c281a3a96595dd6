//! `notefold merge`: merge two text files with the two-snapshot engine.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use notefold_core::store::FileStore;
use notefold_core::{LocalStore, Merger};

use crate::style;

pub fn run(file_a: &Path, file_b: &Path, output: Option<PathBuf>) -> Result<()> {
    let store = LocalStore::new();
    let a = read_required(&store, file_a)?;
    let b = read_required(&store, file_b)?;

    let merged = Merger::merge_two(&a, &b);

    match output {
        Some(path) => {
            store
                .write(&path, &merged)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "{}",
                style::success(&format!("Merged into {}", path.display()))
            );
        }
        None => print!("{merged}"),
    }
    Ok(())
}

fn read_required(store: &LocalStore, path: &Path) -> Result<String> {
    store
        .read(path)
        .with_context(|| format!("failed to read {}", path.display()))?
        .with_context(|| format!("{} does not exist", path.display()))
}
