//! Subcommand implementations.

pub mod classify;
pub mod merge;
pub mod reconcile;
pub mod scan;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};

use notefold_core::AppConfig;

/// Expand a leading `~/` against the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Load and validate the configuration file.
pub fn load_config(config_path: &str) -> Result<AppConfig> {
    let path = expand_tilde(config_path);
    let config = AppConfig::load_from_file(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    config.validate().context("configuration validation failed")?;
    Ok(config)
}

/// Resolve the target notes directory and ignore patterns.
///
/// An explicit directory argument wins and uses the default ignores; without
/// one the configuration file supplies both.
pub fn resolve_target(config_path: &str, dir: Option<PathBuf>) -> Result<(PathBuf, Vec<String>)> {
    match dir {
        Some(dir) => Ok((dir, vec![".*".to_string()])),
        None => {
            let config = load_config(config_path)?;
            Ok((config.notes.dir, config.notes.ignore_patterns))
        }
    }
}
