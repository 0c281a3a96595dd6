//! Directory-listing scanner.
//!
//! Groups the conflict artifacts in a directory listing under the canonical
//! note each one duplicates. Pure over a list of filenames; the reconciler
//! supplies the listing from the file store and acts on the groups.

use glob_match::glob_match;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::detector::{self, ConflictDescriptor};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single conflict artifact within a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictFile {
    /// The artifact's filename as it appears on disk.
    pub file_name: String,
    /// Tokens extracted from the filename.
    pub descriptor: ConflictDescriptor,
}

/// A canonical note together with its conflict artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteGroup {
    /// Filename of the canonical note (may not exist on disk).
    pub canonical_name: String,
    /// Conflict artifacts, ascending by (date, time, device, filename).
    pub conflicts: Vec<ConflictFile>,
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

/// Group the conflict artifacts in a directory listing by canonical note.
///
/// Filenames matching any of `ignore_patterns` (glob syntax, matched against
/// the bare filename) are skipped before classification; the default config
/// ignores dotfiles, which also covers sync-tool droppings like
/// `.stversions`. Groups come back sorted by canonical name; within a group
/// the fold order is fixed: ascending date token, then time token, then
/// device token, then filename.
pub fn scan(filenames: &[String], ignore_patterns: &[String]) -> Vec<NoteGroup> {
    let mut groups: std::collections::BTreeMap<String, Vec<ConflictFile>> =
        std::collections::BTreeMap::new();

    for name in filenames {
        if let Some(pattern) = ignore_patterns.iter().find(|p| glob_match(p, name)) {
            debug!(file = name.as_str(), pattern = pattern.as_str(), "ignoring file");
            continue;
        }
        if let Some(descriptor) = detector::classify(name) {
            groups
                .entry(descriptor.canonical_file_name())
                .or_default()
                .push(ConflictFile {
                    file_name: name.clone(),
                    descriptor,
                });
        }
    }

    let mut result: Vec<NoteGroup> = groups
        .into_iter()
        .map(|(canonical_name, mut conflicts)| {
            conflicts.sort_by(|a, b| {
                a.descriptor
                    .sort_key()
                    .cmp(&b.descriptor.sort_key())
                    .then_with(|| a.file_name.cmp(&b.file_name))
            });
            NoteGroup {
                canonical_name,
                conflicts,
            }
        })
        .collect();

    // BTreeMap already yields canonical names in order; keep the invariant
    // explicit for readers of the returned Vec.
    result.sort_by(|a, b| a.canonical_name.cmp(&b.canonical_name));
    result
}
