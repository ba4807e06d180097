//! Line-level diff computation.
//!
//! [`diff`] aligns a comparison text against a base text using the classic
//! dynamic-programming longest-common-subsequence table over lines, then walks
//! the table backwards to produce an [`EditScript`].
//!
//! # Tie-break
//!
//! When the backward walk can step either left (Added) or up (Removed) without
//! losing common lines, it steps left. Entries are prepended during the walk, so
//! a replaced line reads as `Removed(old)` followed by `Added(new)`:
//!
//! ```
//! use codediff_core::{diff, LineKind};
//!
//! let script = diff("a", "b");
//! let kinds: Vec<_> = script.iter().map(|line| line.kind).collect();
//! assert_eq!(kinds, [LineKind::Removed, LineKind::Added]);
//! ```
//!
//! The tie-break is part of the output contract. Renderers and tests depend on
//! the exact script, so changing it is a behavior change.
//!
//! # Cost
//!
//! O(n·m) time and memory in line counts. Inputs above [`LARGE_DIFF_CELLS`]
//! table cells still run to completion, with a warning logged.

use crate::text::split_lines;
use serde::{Deserialize, Serialize};

/// Table size above which [`diff_lines`] logs a warning before running.
pub const LARGE_DIFF_CELLS: usize = 4_000_000;

/// How a line of the edit script relates the base and comparison texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Present in both texts
    Unchanged,
    /// Only in the comparison text
    Added,
    /// Only in the base text
    Removed,
}

impl LineKind {
    /// True when this line occupies a line of the base text.
    pub fn in_base(self) -> bool {
        matches!(self, LineKind::Unchanged | LineKind::Removed)
    }

    /// True when this line occupies a line of the comparison text.
    pub fn in_comparison(self) -> bool {
        matches!(self, LineKind::Unchanged | LineKind::Added)
    }
}

/// A single tagged line of an [`EditScript`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    pub kind: LineKind,
    pub content: String,
}

impl DiffLine {
    pub fn unchanged(content: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Unchanged,
            content: content.into(),
        }
    }

    pub fn added(content: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Added,
            content: content.into(),
        }
    }

    pub fn removed(content: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Removed,
            content: content.into(),
        }
    }
}

/// Counts of each [`LineKind`] in a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub unchanged: usize,
    pub added: usize,
    pub removed: usize,
}

/// Ordered sequence of tagged lines transforming the base text into the
/// comparison text.
///
/// Unchanged and Removed lines, in order, are exactly the base lines;
/// Unchanged and Added lines, in order, are exactly the comparison lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditScript {
    lines: Vec<DiffLine>,
}

impl EditScript {
    pub fn new(lines: Vec<DiffLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Reconstruct the base lines (Unchanged + Removed).
    pub fn base_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|line| line.kind.in_base())
            .map(|line| line.content.as_str())
            .collect()
    }

    /// Reconstruct the comparison lines (Unchanged + Added).
    pub fn comparison_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|line| line.kind.in_comparison())
            .map(|line| line.content.as_str())
            .collect()
    }

    pub fn stats(&self) -> DiffStats {
        self.lines
            .iter()
            .fold(DiffStats::default(), |mut stats, line| {
                match line.kind {
                    LineKind::Unchanged => stats.unchanged += 1,
                    LineKind::Added => stats.added += 1,
                    LineKind::Removed => stats.removed += 1,
                }
                stats
            })
    }

    pub fn has_changes(&self) -> bool {
        self.lines
            .iter()
            .any(|line| line.kind != LineKind::Unchanged)
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a DiffLine;
    type IntoIter = std::slice::Iter<'a, DiffLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Diff two raw texts line-by-line.
pub fn diff(base: &str, comparison: &str) -> EditScript {
    diff_lines(&split_lines(base), &split_lines(comparison))
}

/// Diff two already-split line sequences.
///
/// Lines compare by exact string equality; no whitespace or case folding.
pub fn diff_lines(base: &[&str], comparison: &[&str]) -> EditScript {
    let n = base.len();
    let m = comparison.len();
    let cells = (n + 1).saturating_mul(m + 1);
    if cells > LARGE_DIFF_CELLS {
        tracing::warn!(
            base_lines = n,
            comparison_lines = m,
            cells,
            "large diff table, computation may be slow"
        );
    }

    let table = LcsTable::build(base, comparison);

    let mut lines = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && base[i - 1] == comparison[j - 1] {
            lines.push(DiffLine::unchanged(comparison[j - 1]));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table.get(i, j - 1) >= table.get(i - 1, j)) {
            lines.push(DiffLine::added(comparison[j - 1]));
            j -= 1;
        } else {
            lines.push(DiffLine::removed(base[i - 1]));
            i -= 1;
        }
    }
    lines.reverse();

    tracing::debug!(
        base_lines = n,
        comparison_lines = m,
        script_len = lines.len(),
        "computed line diff"
    );

    EditScript::new(lines)
}

/// `(n + 1) x (m + 1)` LCS length table stored row-major.
struct LcsTable {
    width: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    fn build(base: &[&str], comparison: &[&str]) -> Self {
        let width = comparison.len() + 1;
        let mut cells = vec![0u32; (base.len() + 1) * width];

        for i in 1..=base.len() {
            for j in 1..=comparison.len() {
                cells[i * width + j] = if base[i - 1] == comparison[j - 1] {
                    cells[(i - 1) * width + (j - 1)] + 1
                } else {
                    cells[(i - 1) * width + j].max(cells[i * width + (j - 1)])
                };
            }
        }

        Self { width, cells }
    }

    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.width + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_differing_line() {
        assert_eq!(
            diff("a", "b").lines(),
            [DiffLine::removed("a"), DiffLine::added("b")]
        );
    }

    #[test]
    fn identical_texts_are_unchanged() {
        let script = diff("one\ntwo\nthree", "one\ntwo\nthree");
        assert_eq!(script.len(), 3);
        assert!(!script.has_changes());
    }

    #[test]
    fn modified_first_line() {
        let script = diff(
            "const x = 1;\nconsole.log(x);",
            "const x = 2;\nconsole.log(x);",
        );
        assert_eq!(
            script.lines(),
            [
                DiffLine::removed("const x = 1;"),
                DiffLine::added("const x = 2;"),
                DiffLine::unchanged("console.log(x);"),
            ]
        );
    }

    #[test]
    fn empty_texts_diff_as_one_empty_line() {
        assert_eq!(diff("", "").lines(), [DiffLine::unchanged("")]);
    }

    #[test]
    fn empty_base_against_text() {
        // The base's single empty line is not skipped; it has no partner here.
        assert_eq!(
            diff("", "a").lines(),
            [DiffLine::removed(""), DiffLine::added("a")]
        );
    }

    #[test]
    fn appended_line_keeps_prefix() {
        assert_eq!(
            diff("a\nb", "a\nb\nc").lines(),
            [
                DiffLine::unchanged("a"),
                DiffLine::unchanged("b"),
                DiffLine::added("c"),
            ]
        );
    }

    #[test]
    fn trailing_newline_is_an_added_empty_line() {
        assert_eq!(
            diff("a", "a\n").lines(),
            [DiffLine::unchanged("a"), DiffLine::added("")]
        );
    }

    #[test]
    fn disjoint_texts() {
        assert_eq!(
            diff("a\nb", "c\nd").lines(),
            [
                DiffLine::removed("a"),
                DiffLine::removed("b"),
                DiffLine::added("c"),
                DiffLine::added("d"),
            ]
        );
    }

    #[test]
    fn exact_equality_no_normalization() {
        let script = diff("Foo ", "foo");
        assert_eq!(script.stats().unchanged, 0);
    }

    #[test]
    fn stats_count_each_kind() {
        let script = diff("a\nb\nc", "a\nx\nc\nd");
        assert_eq!(
            script.stats(),
            DiffStats {
                unchanged: 2,
                added: 2,
                removed: 1,
            }
        );
    }

    #[test]
    fn serializes_as_tagged_lines() {
        let script = diff("a", "b");
        let json = serde_json::to_string(&script).unwrap();
        assert_eq!(
            json,
            r#"[{"kind":"removed","content":"a"},{"kind":"added","content":"b"}]"#
        );
    }
}
