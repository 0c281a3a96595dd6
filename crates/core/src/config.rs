//! TOML-based configuration for the daemon and CLI.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ConfigError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Application configuration loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Notes directory settings.
    pub notes: NotesConfig,

    /// Daemon / polling settings.
    #[serde(default)]
    pub daemon: DaemonConfig,
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

/// Which files are reconciled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Directory containing the synchronized notes.
    pub dir: PathBuf,

    /// Glob patterns (matched against bare filenames) to skip entirely.
    /// The default hides dotfiles, which also covers sync-tool metadata
    /// like `.stversions`.
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
}

fn default_ignore_patterns() -> Vec<String> {
    vec![".*".to_string()]
}

// ---------------------------------------------------------------------------
// Daemon
// ---------------------------------------------------------------------------

/// Daemon / polling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Seconds between reconciliation passes (default 60).
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Minimum tracing level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory for the daemon's run record.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Optional directory for rolling daily log files. Logs go only to
    /// stderr when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_poll_interval() -> u64 {
    60
}
fn default_log_level() -> String {
    "info".into()
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("/var/lib/notefold")
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            log_level: default_log_level(),
            data_dir: default_data_dir(),
            log_dir: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading & validation
// ---------------------------------------------------------------------------

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = toml::from_str(&raw)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Check semantic constraints the TOML schema cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notes.dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("notes.dir must not be empty".into()));
        }
        if self.daemon.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "daemon.poll_interval_secs must be at least 1".into(),
            ));
        }
        if self
            .notes
            .ignore_patterns
            .iter()
            .any(|p| p.trim().is_empty())
        {
            return Err(ConfigError::Invalid(
                "notes.ignore_patterns must not contain empty patterns".into(),
            ));
        }
        Ok(())
    }

    /// A commented sample configuration, for `notefold init`.
    pub fn default_toml() -> &'static str {
        r#"# Notefold configuration.

[notes]
# Directory containing the synchronized notes.
dir = "/home/user/notes"

# Glob patterns (matched against bare filenames) to skip entirely.
# The default hides dotfiles, which also covers sync-tool metadata.
ignore_patterns = [".*"]

[daemon]
# Seconds between reconciliation passes.
poll_interval_secs = 60

# Minimum log level: trace, debug, info, warn, error.
log_level = "info"

# Directory for the daemon's run record.
data_dir = "/var/lib/notefold"

# Uncomment to also write rolling daily log files.
# log_dir = "/var/log/notefold"
"#
    }
}
