//! Two-snapshot merge engine.
//!
//! Combines two versions of a text file into one without losing or
//! duplicating content. There is no base revision: matching is by exact line
//! equality only, via the [matcher](super::matcher) alignment.

use tracing::debug;

use super::matcher;

/// Stateless two-snapshot merge engine.
pub struct Merger;

impl Merger {
    /// Merge two texts into one.
    ///
    /// Total over any inputs, including empty strings on either side. Splits
    /// on `\n` only; a trailing empty element (i.e. a trailing terminator)
    /// is significant and round-trips. Callers normalize other line-ending
    /// conventions before invoking this.
    ///
    /// Guarantees:
    /// - every line present in either input appears in the output at least
    ///   once;
    /// - a line forming an anchor (identical content on both sides) appears
    ///   exactly once;
    /// - the relative order of each side's own lines is preserved;
    /// - at every gap, A's unmatched lines precede B's. Argument order picks
    ///   the "primary" version, so `merge_two(a, b)` and `merge_two(b, a)`
    ///   may differ where both sides insert at the same anchor boundary.
    ///
    /// Two differing edits at the same logical position are both kept
    /// verbatim; the contract is no-loss, not conflict-free output.
    pub fn merge_two(a: &str, b: &str) -> String {
        let a_lines: Vec<&str> = a.split('\n').collect();
        let b_lines: Vec<&str> = b.split('\n').collect();
        let anchors = matcher::align(&a_lines, &b_lines);

        debug!(
            a_lines = a_lines.len(),
            b_lines = b_lines.len(),
            anchors = anchors.len(),
            "merging two snapshots"
        );

        let mut out: Vec<&str> = Vec::with_capacity(a_lines.len() + b_lines.len());
        let (mut ai, mut bi) = (0, 0);
        for (i, j) in anchors {
            out.extend_from_slice(&a_lines[ai..i]);
            out.extend_from_slice(&b_lines[bi..j]);
            out.push(a_lines[i]);
            ai = i + 1;
            bi = j + 1;
        }
        out.extend_from_slice(&a_lines[ai..]);
        out.extend_from_slice(&b_lines[bi..]);
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_append() {
        let a = "line1\nline2\nA\n";
        let b = "line1\nline2\nB\n";
        assert_eq!(Merger::merge_two(a, b), "line1\nline2\nA\nB\n");
    }

    #[test]
    fn test_both_append_multiple() {
        let a = "x\nA1\nA2\n";
        let b = "x\nB1\nB2\n";
        assert_eq!(Merger::merge_two(a, b), "x\nA1\nA2\nB1\nB2\n");
    }

    #[test]
    fn test_identical_inputs_unchanged() {
        let a = "same\ncontent\n";
        assert_eq!(Merger::merge_two(a, a), a);
    }

    #[test]
    fn test_one_side_unchanged() {
        let base = "line1\nline2\n";
        let edited = "line1\nline2\nnew\n";
        assert_eq!(Merger::merge_two(edited, base), edited);
        assert_eq!(Merger::merge_two(base, edited), edited);
    }

    #[test]
    fn test_edits_in_different_sections() {
        let a = "HEADER\nbody\nfooter\n";
        let b = "header\nbody\nFOOTER\n";
        let result = Merger::merge_two(a, b);
        assert!(result.contains("HEADER"));
        assert!(result.contains("FOOTER"));
        let body_count = result.split('\n').filter(|l| *l == "body").count();
        assert_eq!(body_count, 1, "shared line duplicated: {result:?}");
    }

    #[test]
    fn test_insert_at_different_positions() {
        let a = "top\nmiddle\n";
        let b = "middle\nbottom\n";
        assert_eq!(Merger::merge_two(a, b), "top\nmiddle\nbottom\n");
    }

    #[test]
    fn test_one_side_empty() {
        let a = "content\n";
        assert!(Merger::merge_two(a, "").contains("content"));
        assert!(Merger::merge_two("", a).contains("content"));
    }

    #[test]
    fn test_both_empty() {
        assert_eq!(Merger::merge_two("", ""), "");
    }

    #[test]
    fn test_trailing_terminator_preserved() {
        let a = "line1\nA\n";
        let b = "line1\nB\n";
        assert!(Merger::merge_two(a, b).ends_with('\n'));
    }

    #[test]
    fn test_no_trailing_terminator_round_trips() {
        let a = "alpha\nbeta";
        assert_eq!(Merger::merge_two(a, a), a);
    }

    #[test]
    fn test_divergent_edits_both_kept() {
        let winner = "line1\nline2\nremote-added\n";
        let loser = "line1\nline2\nlocal-added\n";
        let merged = Merger::merge_two(winner, loser);
        assert!(merged.contains("remote-added"));
        assert!(merged.contains("local-added"));

        let lines: Vec<&str> = merged.split('\n').filter(|l| !l.is_empty()).collect();
        let mut deduped = lines.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(lines.len(), deduped.len(), "duplication in merge: {merged:?}");
    }

    #[test]
    fn test_asymmetry_at_shared_boundary() {
        let a = "x\nA\n";
        let b = "x\nB\n";
        assert_eq!(Merger::merge_two(a, b), "x\nA\nB\n");
        assert_eq!(Merger::merge_two(b, a), "x\nB\nA\n");
    }

    #[test]
    fn test_no_duplication_no_loss() {
        let a = [
            "* Morning", "coffee", "journal", "* Workout", "squat 135 145", "bench 95",
            "* Evening", "read", "",
        ]
        .join("\n");
        let b = [
            "* Morning", "coffee", "* Workout", "squat 135", "bench 95", "deadlift 225",
            "* Evening", "read", "walk", "",
        ]
        .join("\n");

        let result = Merger::merge_two(&a, &b);
        let result_lines: Vec<&str> = result.split('\n').collect();

        for line in [
            "* Morning", "coffee", "journal", "squat 135 145", "bench 95", "deadlift 225",
            "* Workout", "* Evening", "read", "walk",
        ] {
            assert!(result_lines.contains(&line), "lost line {line:?} in {result:?}");
        }

        let mut seen = std::collections::HashMap::new();
        for line in result_lines.iter().filter(|l| !l.is_empty()) {
            *seen.entry(*line).or_insert(0u32) += 1;
        }
        for (line, count) in seen {
            assert_eq!(count, 1, "line {line:?} appears {count} times in {result:?}");
        }
    }
}
