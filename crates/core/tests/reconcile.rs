//! End-to-end reconciliation tests over a real temporary directory.
//!
//! These exercise the full pipeline (directory listing, artifact
//! classification, fold order, atomic canonical write, cleanup) through
//! [`LocalStore`], the production file store.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use notefold_core::{LocalStore, Reconciler};

// ===========================================================================
// Helper functions
// ===========================================================================

fn write_note(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("failed to seed note file");
}

fn read_note(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).expect("failed to read note file")
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

fn reconciler() -> Reconciler<LocalStore> {
    Reconciler::new(LocalStore::new(), vec![".*".to_string()])
}

// ===========================================================================
// Tests
// ===========================================================================

#[test]
fn folds_two_device_copies_into_canonical() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    write_note(dir, "2026-02-11.org", "* Morning\ncoffee\njournal\n");
    write_note(
        dir,
        "2026-02-11.sync-conflict-20260211-103045-PHONE01.org",
        "* Morning\ncoffee\nwalk\n",
    );
    write_note(
        dir,
        "2026-02-11.sync-conflict-20260211-114500-LAPTOP9.org",
        "* Morning\ncoffee\n* Evening\nread\n",
    );

    let stats = reconciler().reconcile_dir(dir).unwrap();
    assert_eq!(stats.groups_scanned, 1);
    assert_eq!(stats.conflicts_found, 2);
    assert_eq!(stats.conflicts_folded, 2);
    assert_eq!(stats.files_removed, 2);
    assert!(!stats.had_failures());

    // Only the canonical note remains.
    assert_eq!(listing(dir), vec!["2026-02-11.org"]);

    // Every distinct line survives exactly once.
    let merged = read_note(dir, "2026-02-11.org");
    for line in ["* Morning", "coffee", "journal", "walk", "* Evening", "read"] {
        assert_eq!(
            merged.split('\n').filter(|l| *l == line).count(),
            1,
            "{line:?} not exactly once in {merged:?}"
        );
    }
    assert!(merged.ends_with('\n'));
}

#[test]
fn reconciles_multiple_notes_independently() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    write_note(dir, "alpha.org", "alpha\n");
    write_note(
        dir,
        "alpha.sync-conflict-20260101-000000-AAAAAAA.org",
        "alpha\nmore\n",
    );
    write_note(dir, "beta.org", "beta\n");
    write_note(
        dir,
        "beta.sync-conflict-20260101-000000-AAAAAAA.org",
        "beta\nextra\n",
    );
    write_note(dir, "untouched.org", "plain\n");

    let stats = reconciler().reconcile_dir(dir).unwrap();
    assert_eq!(stats.groups_scanned, 2);
    assert_eq!(stats.files_removed, 2);

    assert_eq!(read_note(dir, "alpha.org"), "alpha\nmore\n");
    assert_eq!(read_note(dir, "beta.org"), "beta\nextra\n");
    assert_eq!(read_note(dir, "untouched.org"), "plain\n");
    assert_eq!(listing(dir), vec!["alpha.org", "beta.org", "untouched.org"]);
}

#[test]
fn canonical_deleted_on_one_device_is_recovered() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    write_note(
        dir,
        "gone.sync-conflict-20260101-090000-PHONE01.org",
        "survivor\ncontent\n",
    );

    let stats = reconciler().reconcile_dir(dir).unwrap();
    assert_eq!(stats.canonical_writes, 1);
    assert_eq!(listing(dir), vec!["gone.org"]);
    assert_eq!(read_note(dir, "gone.org"), "survivor\ncontent\n");
}

#[test]
fn pass_is_a_no_op_without_artifacts() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    write_note(dir, "notes.org", "nothing to do\n");
    write_note(dir, "sync-conflict-file.org", "marker without structure\n");

    let stats = reconciler().reconcile_dir(dir).unwrap();
    assert_eq!(stats.groups_scanned, 0);
    assert_eq!(stats.files_removed, 0);
    assert_eq!(listing(dir), vec!["notes.org", "sync-conflict-file.org"]);
}

#[test]
fn dotfile_artifacts_are_ignored() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    write_note(
        dir,
        ".trash.sync-conflict-20260101-000000-AAAAAAA.org",
        "ignored\n",
    );

    let stats = reconciler().reconcile_dir(dir).unwrap();
    assert_eq!(stats.groups_scanned, 0);
    assert_eq!(
        listing(dir),
        vec![".trash.sync-conflict-20260101-000000-AAAAAAA.org"]
    );
}

#[test]
fn plan_dir_reports_without_mutating() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    write_note(dir, "daily.org", "a\n");
    write_note(
        dir,
        "daily.sync-conflict-20260101-000000-AAAAAAA.org",
        "b\n",
    );

    let plan = reconciler().plan_dir(dir).unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].canonical_name, "daily.org");
    assert_eq!(plan[0].conflicts.len(), 1);

    // Nothing moved.
    assert_eq!(
        listing(dir),
        vec![
            "daily.org",
            "daily.sync-conflict-20260101-000000-AAAAAAA.org"
        ]
    );
    assert_eq!(read_note(dir, "daily.org"), "a\n");
}

#[test]
fn second_pass_after_partial_cleanup_converges() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    write_note(dir, "daily.org", "one\nA\n");
    write_note(
        dir,
        "daily.sync-conflict-20260101-000000-AAAAAAA.org",
        "one\nB\n",
    );

    let first = reconciler().reconcile_dir(dir).unwrap();
    assert_eq!(first.files_removed, 1);
    let after_first = read_note(dir, "daily.org");

    // Simulate the sync layer re-delivering an already-subsumed copy.
    write_note(
        dir,
        "daily.sync-conflict-20260101-000000-AAAAAAA.org",
        "one\nB\n",
    );

    let second = reconciler().reconcile_dir(dir).unwrap();
    assert_eq!(second.files_removed, 1);
    assert_eq!(second.canonical_writes, 0, "re-fold must be a no-op write");
    assert_eq!(read_note(dir, "daily.org"), after_first);
}
