//! Error types for the Notefold core library.
//!
//! Each subsystem has its own error type derived with `thiserror`, and a
//! top-level [`CoreError`] enum unifies them for callers that want a single
//! error type. The merge engine and the conflict-artifact detector have no
//! error cases at all: merging is total over any two texts, and a filename
//! that does not match the conflict grammar is a `None`, not an error.

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// File store errors
// ---------------------------------------------------------------------------

/// Errors from the file store boundary.
///
/// All fallible I/O lives behind [`crate::store::FileStore`]; these are the
/// failures it can report.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An underlying filesystem operation failed.
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file's bytes were not valid UTF-8 text.
    #[error("file '{path}' is not valid UTF-8 text")]
    NotUtf8 { path: PathBuf },

    /// A listing target was not a directory.
    #[error("'{0}' is not a directory")]
    NotADirectory(PathBuf),
}

// ---------------------------------------------------------------------------
// Reconciliation errors
// ---------------------------------------------------------------------------

/// Errors from a reconciliation pass.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Another reconciliation run already holds this canonical name.
    #[error("reconciliation already in progress for '{canonical}'")]
    AlreadyInProgress { canonical: String },

    /// A file store operation failed. The canonical file and any conflict
    /// copies not yet confirmed subsumed are left on disk for a later retry.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Could not read the config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was not valid TOML for the expected schema.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A semantic validation check failed.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
