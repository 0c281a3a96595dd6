//! Reconciliation coordinator.
//!
//! Given a notes directory, the [`Reconciler`] folds every sync-conflict
//! artifact back into its canonical note and removes the subsumed copies:
//!
//! 1. List the directory and group artifacts by canonical name.
//! 2. Per group, treat the canonical content as the accumulator and fold
//!    each conflict copy into it in ascending (date, time, device, name)
//!    order with the two-snapshot merge.
//! 3. Write the accumulator back to the canonical path.
//! 4. Only then delete the folded conflict files.
//!
//! Write-then-delete is never interleaved: a crash or store failure between
//! steps leaves the canonical file either untouched or fully merged, with
//! every unconfirmed conflict copy still on disk for a later pass. Folding a
//! copy whose lines are already present is a no-op, so retries are safe.
//!
//! Runs targeting the same canonical name are serialized via an in-flight
//! set; distinct notes may be reconciled in parallel with no coordination.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::conflict::scanner::{self, NoteGroup};
use crate::errors::ReconcileError;
use crate::merge::Merger;
use crate::models::ReconcileStats;
use crate::store::FileStore;

// ---------------------------------------------------------------------------
// Outcome of one group
// ---------------------------------------------------------------------------

/// What happened to a single note group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupOutcome {
    /// Conflict copies folded into the accumulator.
    pub folded: usize,
    /// Subsumed conflict files deleted.
    pub removed: usize,
    /// Whether the canonical file was rewritten.
    pub wrote_canonical: bool,
}

// ---------------------------------------------------------------------------
// Reconciler
// ---------------------------------------------------------------------------

/// Coordinates merge and cleanup for note groups through a [`FileStore`].
///
/// Holds no durable state; the filesystem content behind the store is the
/// only persistent state in the system.
pub struct Reconciler<S: FileStore> {
    store: S,
    ignore_patterns: Vec<String>,
    /// Canonical names currently being reconciled.
    in_flight: Mutex<HashSet<String>>,
}

impl<S: FileStore> Reconciler<S> {
    pub fn new(store: S, ignore_patterns: Vec<String>) -> Self {
        Self {
            store,
            ignore_patterns,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// The underlying file store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Classify a directory without touching anything.
    ///
    /// Backs `notefold scan` and `reconcile --dry-run`.
    pub fn plan_dir(&self, dir: &Path) -> Result<Vec<NoteGroup>, ReconcileError> {
        let listing = self.store.list(dir)?;
        Ok(scanner::scan(&listing, &self.ignore_patterns))
    }

    /// Run one full reconciliation pass over a directory.
    ///
    /// A group that fails is logged, counted, and left intact for the next
    /// pass; it does not abort the rest of the pass.
    pub fn reconcile_dir(&self, dir: &Path) -> Result<ReconcileStats, ReconcileError> {
        let mut stats = ReconcileStats {
            started_at: Utc::now().to_rfc3339(),
            ..Default::default()
        };

        let groups = self.plan_dir(dir)?;
        stats.groups_scanned = groups.len();

        for group in &groups {
            stats.conflicts_found += group.conflicts.len();
            match self.reconcile_group(dir, group) {
                Ok(outcome) => {
                    stats.conflicts_folded += outcome.folded;
                    stats.files_removed += outcome.removed;
                    if outcome.wrote_canonical {
                        stats.canonical_writes += 1;
                    }
                }
                Err(e) => {
                    stats.groups_failed += 1;
                    error!(
                        canonical = group.canonical_name.as_str(),
                        error = %e,
                        "note group could not be reconciled this pass"
                    );
                }
            }
        }

        stats.completed_at = Some(Utc::now().to_rfc3339());
        info!(
            dir = %dir.display(),
            groups = stats.groups_scanned,
            folded = stats.conflicts_folded,
            removed = stats.files_removed,
            failed = stats.groups_failed,
            "reconciliation pass completed"
        );
        Ok(stats)
    }

    /// Fold one note group and clean up its subsumed copies.
    ///
    /// Refuses to run while another reconciliation of the same canonical
    /// name is in flight.
    pub fn reconcile_group(
        &self,
        dir: &Path,
        group: &NoteGroup,
    ) -> Result<GroupOutcome, ReconcileError> {
        let _slot = self.claim(&group.canonical_name)?;

        if group.conflicts.is_empty() {
            return Ok(GroupOutcome::default());
        }

        let canonical_path = dir.join(&group.canonical_name);
        let original = self.store.read(&canonical_path)?;
        // Absent canonical: start from empty, the oldest copy re-seeds it.
        let mut accumulator = original.clone().unwrap_or_default();

        let mut folded_files = Vec::with_capacity(group.conflicts.len());
        for conflict in &group.conflicts {
            let conflict_path = dir.join(&conflict.file_name);
            match self.store.read(&conflict_path)? {
                Some(contents) => {
                    accumulator = Merger::merge_two(&accumulator, &contents);
                    folded_files.push(conflict.file_name.as_str());
                    debug!(
                        canonical = group.canonical_name.as_str(),
                        conflict = conflict.file_name.as_str(),
                        "folded conflict copy"
                    );
                }
                None => {
                    // Another device's pass may have cleaned it up already.
                    warn!(
                        conflict = conflict.file_name.as_str(),
                        "conflict file vanished before fold; skipping"
                    );
                }
            }
        }

        if folded_files.is_empty() {
            return Ok(GroupOutcome::default());
        }

        // Commit the merged canonical content before any delete. A failure
        // here aborts the group with every source file still on disk.
        let wrote_canonical = if original.as_deref() != Some(accumulator.as_str()) {
            self.store.write(&canonical_path, &accumulator)?;
            true
        } else {
            debug!(
                canonical = group.canonical_name.as_str(),
                "folding changed nothing; skipping canonical write"
            );
            false
        };

        // Canonical content is durable; the folded copies are now subsumed.
        let mut removed = 0;
        for file_name in &folded_files {
            let conflict_path = dir.join(file_name);
            match self.store.delete(&conflict_path) {
                Ok(()) => removed += 1,
                Err(e) => {
                    // The merged content is committed, so the leftover copy
                    // is only clutter; the next pass folds it as a no-op and
                    // retries the delete.
                    warn!(
                        conflict = *file_name,
                        error = %e,
                        "failed to delete subsumed conflict file"
                    );
                    return Err(e.into());
                }
            }
        }

        info!(
            canonical = group.canonical_name.as_str(),
            folded = folded_files.len(),
            removed,
            wrote_canonical,
            "reconciled note group"
        );

        Ok(GroupOutcome {
            folded: folded_files.len(),
            removed,
            wrote_canonical,
        })
    }

    fn claim(&self, canonical: &str) -> Result<InFlightSlot<'_>, ReconcileError> {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !in_flight.insert(canonical.to_string()) {
            return Err(ReconcileError::AlreadyInProgress {
                canonical: canonical.to_string(),
            });
        }
        Ok(InFlightSlot {
            set: &self.in_flight,
            canonical: canonical.to_string(),
        })
    }
}

/// RAII slot in the in-flight set; released on every exit path.
struct InFlightSlot<'a> {
    set: &'a Mutex<HashSet<String>>,
    canonical: String,
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        let mut in_flight = self
            .set
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        in_flight.remove(&self.canonical);
    }
}
