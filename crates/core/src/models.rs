//! Domain model types shared by the reconciler, daemon, and CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filename of the daemon's persisted last-run record, inside the data dir.
pub const RUN_RECORD_FILE: &str = "last_run.json";

// ---------------------------------------------------------------------------
// Reconciliation stats
// ---------------------------------------------------------------------------

/// Statistics from a single reconciliation pass over one notes directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileStats {
    /// Note groups that had at least one conflict artifact.
    pub groups_scanned: usize,
    /// Conflict artifacts discovered across all groups.
    pub conflicts_found: usize,
    /// Conflict copies successfully folded into an accumulator.
    pub conflicts_folded: usize,
    /// Subsumed conflict files removed from disk.
    pub files_removed: usize,
    /// Groups whose reconciliation failed and was left for a later pass.
    pub groups_failed: usize,
    /// Canonical files rewritten (skipped when folding changed nothing).
    pub canonical_writes: usize,
    /// RFC 3339 start timestamp.
    pub started_at: String,
    /// RFC 3339 completion timestamp.
    pub completed_at: Option<String>,
}

impl ReconcileStats {
    /// `true` when at least one group could not be reconciled this pass.
    pub fn had_failures(&self) -> bool {
        self.groups_failed > 0
    }
}

// ---------------------------------------------------------------------------
// Daemon run record
// ---------------------------------------------------------------------------

/// Persisted summary of the daemon's most recent pass.
///
/// Written to [`RUN_RECORD_FILE`] in the data directory after every cycle and
/// read back by `notefold status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Monotonic cycle number since daemon start.
    pub cycle: u64,
    /// What started the pass: `scheduled` or `signal`.
    pub trigger: String,
    /// The notes directory the pass covered.
    pub notes_dir: String,
    /// Stats from the pass, when it ran to completion.
    pub stats: Option<ReconcileStats>,
    /// Error message, when the pass failed outright.
    pub error: Option<String>,
    /// When the record was written.
    pub recorded_at: DateTime<Utc>,
}
