//! Conflict-artifact detection.
//!
//! Sync tools that cannot merge concurrent writes leave side-by-side copies
//! of a file named like `notes.sync-conflict-20260211-103045-ABCDEFG.org`.
//! The detector classifies a filename as such an artifact and extracts its
//! tokens; it performs no I/O and has no error cases, since a non-conforming
//! name is simply not a match.

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// The conflict-marker grammar: a literal `.sync-conflict-`, 8 digits, `-`,
/// 6 digits, `-`, 7 uppercase-alphanumeric characters, followed by a further
/// `.`-led extension component. The marker must not terminate the filename.
///
/// `regex-lite` has no lookahead, so instead of `(?=\.)` the extension is
/// captured as `\..+` over the anchored whole name, which is equivalent for
/// whole-filename classification. The greedy base capture means a name
/// carrying two markers resolves to the outermost (last) one.
const MARKER_PATTERN: &str =
    r"^(.*)\.sync-conflict-(\d{8})-(\d{6})-([A-Z0-9]{7})(\..+)$";

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MARKER_PATTERN).expect("marker pattern is valid"))
}

// ---------------------------------------------------------------------------
// Descriptor
// ---------------------------------------------------------------------------

/// Tokens extracted from a conflict-artifact filename.
///
/// Ephemeral: recomputed on every scan, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictDescriptor {
    /// Base name of the canonical file (everything before the marker).
    pub base_name: String,
    /// Extension of the canonical file, including the leading dot.
    pub extension: String,
    /// 8-digit date token (`YYYYMMDD`).
    pub date_token: String,
    /// 6-digit time token (`HHMMSS`).
    pub time_token: String,
    /// 7-character uppercase-alphanumeric device token.
    pub device_token: String,
}

impl ConflictDescriptor {
    /// Filename of the canonical note this artifact duplicates.
    pub fn canonical_file_name(&self) -> String {
        format!("{}{}", self.base_name, self.extension)
    }

    /// Deterministic fold-order key: ascending (date, time, device).
    ///
    /// Fixed-width digit tokens make lexicographic order chronological, with
    /// no dependence on the tokens actually parsing as a calendar date.
    pub fn sort_key(&self) -> (&str, &str, &str) {
        (&self.date_token, &self.time_token, &self.device_token)
    }

    /// Best-effort timestamp parsed from the date and time tokens.
    ///
    /// Display only; ordering uses [`sort_key`](Self::sort_key) so that a
    /// nonsense-but-well-formed token (e.g. month 13) still sorts stably.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(
            &format!("{}{}", self.date_token, self.time_token),
            "%Y%m%d%H%M%S",
        )
        .ok()
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a filename as a sync-conflict artifact.
///
/// Returns `None` for any name lacking the exact marker shape, including
/// names that merely contain the substring `sync-conflict` and names where
/// the marker is the terminal suffix.
pub fn classify(filename: &str) -> Option<ConflictDescriptor> {
    let caps = marker_regex().captures(filename)?;
    let descriptor = ConflictDescriptor {
        base_name: caps[1].to_string(),
        extension: caps[5].to_string(),
        date_token: caps[2].to_string(),
        time_token: caps[3].to_string(),
        device_token: caps[4].to_string(),
    };
    trace!(
        filename,
        canonical = %descriptor.canonical_file_name(),
        "classified conflict artifact"
    );
    Some(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_conflict_names() {
        for name in [
            "2026-02-11.sync-conflict-20260211-103045-ABCDEFG.org",
            "notes.sync-conflict-20260101-000000-AAAAAAA.org",
            "todo.sync-conflict-20251231-235959-0000000.txt",
        ] {
            assert!(classify(name).is_some(), "should match: {name}");
        }
    }

    #[test]
    fn test_rejects_non_conflict_names() {
        for name in [
            "2026-02-11.org",
            "notes.txt",
            "sync-conflict-file.org",
            // Marker present but unstructured.
            "notes.sync-conflict.org",
            // Wrong digit counts.
            "notes.sync-conflict-2026011-000000-AAAAAAA.org",
            "notes.sync-conflict-20260101-00000-AAAAAAA.org",
            // Wrong device token class / length.
            "notes.sync-conflict-20260101-000000-aaaaaaa.org",
            "notes.sync-conflict-20260101-000000-AAAAAA.org",
            "notes.sync-conflict-20260101-000000-AAAAAAAA.org",
        ] {
            assert!(classify(name).is_none(), "should not match: {name}");
        }
    }

    #[test]
    fn test_marker_must_precede_extension() {
        // A terminal marker is not an artifact.
        assert!(classify("notes.sync-conflict-20260101-000000-AAAAAAA").is_none());
        // Trailing dot with nothing after it is not an extension component.
        assert!(classify("notes.sync-conflict-20260101-000000-AAAAAAA.").is_none());
    }

    #[test]
    fn test_descriptor_tokens() {
        let d = classify("2026-02-11.sync-conflict-20260211-103045-ABCDEFG.org").unwrap();
        assert_eq!(d.base_name, "2026-02-11");
        assert_eq!(d.extension, ".org");
        assert_eq!(d.date_token, "20260211");
        assert_eq!(d.time_token, "103045");
        assert_eq!(d.device_token, "ABCDEFG");
        assert_eq!(d.canonical_file_name(), "2026-02-11.org");
    }

    #[test]
    fn test_multi_dot_extension() {
        let d = classify("export.sync-conflict-20260101-120000-DEVICE1.tar.gz").unwrap();
        assert_eq!(d.base_name, "export");
        assert_eq!(d.extension, ".tar.gz");
        assert_eq!(d.canonical_file_name(), "export.tar.gz");
    }

    #[test]
    fn test_doubly_conflicted_name_uses_outermost_marker() {
        let d = classify(
            "notes.sync-conflict-20260101-000000-AAAAAAA.sync-conflict-20260202-111111-BBBBBBB.org",
        )
        .unwrap();
        assert_eq!(d.date_token, "20260202");
        assert_eq!(d.device_token, "BBBBBBB");
        assert_eq!(
            d.canonical_file_name(),
            "notes.sync-conflict-20260101-000000-AAAAAAA.org"
        );
    }

    #[test]
    fn test_timestamp_parse() {
        let d = classify("n.sync-conflict-20260211-103045-ABCDEFG.org").unwrap();
        let ts = d.timestamp().unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M:%S").to_string(), "2026-02-11 10:30:45");

        // Well-formed tokens that are not a real date still classify.
        let bad = classify("n.sync-conflict-20261345-996161-ABCDEFG.org").unwrap();
        assert!(bad.timestamp().is_none());
    }
}
