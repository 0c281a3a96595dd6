//! Reconciliation scheduler.
//!
//! Runs a reconciliation pass on a configurable interval and on
//! SIGUSR1-triggered immediate requests. After every pass it persists a
//! [`RunRecord`] to the data directory for `notefold status`.
//!
//! The daemon is the background scheduling collaborator of the core: it must
//! only be pointed at directories whose editors flush pending writes before
//! going idle, so a pass never reconciles against a stale snapshot.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time;
use tracing::{error, info, warn};

use notefold_core::models::{RunRecord, ReconcileStats, RUN_RECORD_FILE};
use notefold_core::store::FileStore;
use notefold_core::{LocalStore, Reconciler};

/// Aggregate statistics across passes.
pub struct SchedulerStats {
    pub total_cycles: AtomicU64,
    pub total_folded: AtomicU64,
    pub total_errors: AtomicU64,
    pub consecutive_errors: AtomicU64,
}

impl SchedulerStats {
    fn new() -> Self {
        Self {
            total_cycles: AtomicU64::new(0),
            total_folded: AtomicU64::new(0),
            total_errors: AtomicU64::new(0),
            consecutive_errors: AtomicU64::new(0),
        }
    }
}

/// The reconciliation scheduler.
///
/// Runs passes on a timer and listens for immediate-pass requests. Passes
/// never overlap: the loop awaits each one to completion, and the reconciler
/// itself refuses to race on a canonical name.
pub struct Scheduler {
    reconciler: Arc<Reconciler<LocalStore>>,
    notes_dir: PathBuf,
    data_dir: PathBuf,
    poll_interval: Duration,
    trigger_rx: mpsc::Receiver<()>,
    stats: Arc<SchedulerStats>,
}

impl Scheduler {
    pub fn new(
        reconciler: Arc<Reconciler<LocalStore>>,
        notes_dir: PathBuf,
        data_dir: PathBuf,
        poll_interval: Duration,
        trigger_rx: mpsc::Receiver<()>,
    ) -> Self {
        Self {
            reconciler,
            notes_dir,
            data_dir,
            poll_interval,
            trigger_rx,
            stats: Arc::new(SchedulerStats::new()),
        }
    }

    /// Main scheduler loop. Runs until the task is aborted at shutdown.
    pub async fn run(&mut self) {
        info!(
            poll_interval_secs = self.poll_interval.as_secs(),
            notes_dir = %self.notes_dir.display(),
            "scheduler started"
        );

        let mut interval = time::interval(self.poll_interval);
        // The first tick fires immediately; that gives one pass at startup
        // to clear any backlog that accumulated while the daemon was down.
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.run_cycle("scheduled").await;
                }
                Some(()) = self.trigger_rx.recv() => {
                    self.run_cycle("signal").await;
                    // Don't run again right away on the next tick.
                    interval.reset();
                }
            }
        }
    }

    async fn run_cycle(&self, trigger: &str) {
        let cycle = self.stats.total_cycles.fetch_add(1, Ordering::SeqCst) + 1;
        info!(cycle, trigger, "starting reconciliation pass");

        let reconciler = Arc::clone(&self.reconciler);
        let notes_dir = self.notes_dir.clone();
        let result = tokio::task::spawn_blocking(move || reconciler.reconcile_dir(&notes_dir))
            .await
            .map_err(|e| format!("reconciliation task panicked: {e}"))
            .and_then(|r| r.map_err(|e| e.to_string()));

        let record = match result {
            Ok(stats) => {
                self.stats.consecutive_errors.store(0, Ordering::SeqCst);
                self.stats
                    .total_folded
                    .fetch_add(stats.conflicts_folded as u64, Ordering::SeqCst);

                if stats.had_failures() {
                    warn!(
                        cycle,
                        failed = stats.groups_failed,
                        "some note groups could not be reconciled; will retry next pass"
                    );
                }
                if stats.conflicts_folded > 0 {
                    info!(
                        cycle,
                        folded = stats.conflicts_folded,
                        removed = stats.files_removed,
                        "reconciliation pass folded conflicts"
                    );
                }

                self.make_record(cycle, trigger, Some(stats), None)
            }
            Err(message) => {
                let errors = self.stats.total_errors.fetch_add(1, Ordering::SeqCst) + 1;
                let consecutive = self
                    .stats
                    .consecutive_errors
                    .fetch_add(1, Ordering::SeqCst)
                    + 1;
                error!(
                    cycle,
                    error = message.as_str(),
                    total_errors = errors,
                    consecutive_errors = consecutive,
                    "reconciliation pass failed"
                );
                self.make_record(cycle, trigger, None, Some(message))
            }
        };

        self.persist_record(&record);
    }

    fn make_record(
        &self,
        cycle: u64,
        trigger: &str,
        stats: Option<ReconcileStats>,
        error: Option<String>,
    ) -> RunRecord {
        RunRecord {
            cycle,
            trigger: trigger.to_string(),
            notes_dir: self.notes_dir.display().to_string(),
            stats,
            error,
            recorded_at: Utc::now(),
        }
    }

    /// Best-effort: a failed record write never fails the pass itself.
    fn persist_record(&self, record: &RunRecord) {
        let path = self.data_dir.join(RUN_RECORD_FILE);
        let json = match serde_json::to_string_pretty(record) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize run record");
                return;
            }
        };
        if let Err(e) = self.reconciler.store().write(&path, &json) {
            warn!(path = %path.display(), error = %e, "failed to persist run record");
        }
    }
}
