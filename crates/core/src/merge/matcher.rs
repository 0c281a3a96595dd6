//! Line-sequence matcher.
//!
//! Computes a maximal ordered alignment (classic longest-common-subsequence)
//! between two line sequences under exact string equality. The merge engine
//! walks this alignment to interleave unmatched lines from both sides.

/// An anchor `(i, j)`: line `i` of sequence A equals line `j` of sequence B.
pub type Anchor = (usize, usize);

/// Compute the maximal alignment between `a` and `b`.
///
/// Returns anchors with both components strictly increasing. The alignment is
/// maximal under LCS semantics: no longer alignment exists for these inputs.
///
/// The backtrack order is part of the contract, not an implementation detail:
/// on equal lines an anchor is always recorded and both indices step back;
/// otherwise `i` steps back whenever `dp[i-1][j] >= dp[i][j-1]`. This fixes
/// which side's unmatched lines end up adjacent to which anchor boundary, and
/// downstream merge output depends on it.
///
/// O(m*n) time and space. Acceptable for short human-authored notes; this is
/// not a general diff engine.
pub fn align(a: &[&str], b: &[&str]) -> Vec<Anchor> {
    let (m, n) = (a.len(), b.len());
    if m == 0 || n == 0 {
        return Vec::new();
    }

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }

    let mut anchors = Vec::with_capacity(dp[m][n]);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            anchors.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] >= dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    anchors.reverse();
    anchors
}
