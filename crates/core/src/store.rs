//! File store boundary.
//!
//! All reads, writes, deletes, and listings go through the [`FileStore`]
//! trait; the reconciler implements none of them itself. [`LocalStore`] is
//! the production implementation over the local filesystem, with atomic
//! writes (write to a temp file in the same directory, then rename) so a
//! canonical note is never observable half-written. That is the same
//! guarantee the editing side relies on for its own saves.

use std::io::Write;
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::StoreError;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Storage collaborator for the reconciler.
pub trait FileStore: Send + Sync {
    /// Read a file as UTF-8 text. `Ok(None)` when the file does not exist.
    fn read(&self, path: &Path) -> Result<Option<String>, StoreError>;

    /// Atomically replace (or create) a file with the given text.
    fn write(&self, path: &Path, contents: &str) -> Result<(), StoreError>;

    /// Delete a file.
    fn delete(&self, path: &Path) -> Result<(), StoreError>;

    /// List the filenames (not paths) of the regular files in a directory.
    fn list(&self, dir: &Path) -> Result<Vec<String>, StoreError>;
}

// ---------------------------------------------------------------------------
// Local filesystem implementation
// ---------------------------------------------------------------------------

/// [`FileStore`] over the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }
}

impl FileStore for LocalStore {
    fn read(&self, path: &Path) -> Result<Option<String>, StoreError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| StoreError::NotUtf8 {
                path: path.to_path_buf(),
            })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), StoreError> {
        let io_err = |e: std::io::Error| StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(contents.as_bytes()).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(path).map_err(|e| io_err(e.error))?;

        debug!(path = %path.display(), bytes = contents.len(), "wrote file atomically");
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<(), StoreError> {
        std::fs::remove_file(path).map_err(|e| StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(path = %path.display(), "deleted file");
        Ok(())
    }

    fn list(&self, dir: &Path) -> Result<Vec<String>, StoreError> {
        if !dir.is_dir() {
            return Err(StoreError::NotADirectory(dir.to_path_buf()));
        }
        let io_err = |e: std::io::Error| StoreError::Io {
            path: dir.to_path_buf(),
            source: e,
        };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if !entry.file_type().map_err(io_err)?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(os_name) => {
                    // Non-UTF-8 filenames cannot be note files; skip them.
                    warn!(name = ?os_name, "skipping non-UTF-8 filename in listing");
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
