//! Brace-based fold detection and per-panel fold state.
//!
//! [`find_foldable_ranges`] is a textual heuristic: any line containing `{`
//! opens a block and any line containing `}` closes the most recent one. It does
//! not understand string or comment literals, so a brace inside a string counts
//! like any other. Folding works on raw panel text and is independent of the
//! diff.
//!
//! [`FoldState`] tracks which detected ranges a panel has collapsed. It is keyed
//! by start line, so it survives recomputation of the range list as long as the
//! block still starts on the same line.

use crate::text::split_lines;
use serde::Serialize;
use std::collections::BTreeSet;

/// A collapsible multi-line block, 1-based and inclusive on both ends.
///
/// `end_line > start_line` always holds; single-line blocks are not foldable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FoldableRange {
    pub start_line: usize,
    pub end_line: usize,
}

impl FoldableRange {
    /// Lines hidden when this range is folded (all but the first).
    pub fn hidden_line_count(&self) -> usize {
        self.end_line - self.start_line
    }
}

/// Scan `text` for brace-delimited multi-line blocks.
///
/// Returns ranges sorted by `start_line`. Unmatched `}` lines are ignored and
/// unmatched `{` lines are dropped at the end of the text.
pub fn find_foldable_ranges(text: &str) -> Vec<FoldableRange> {
    let mut ranges = Vec::new();
    let mut open_lines: Vec<usize> = Vec::new();

    for (index, line) in split_lines(text).into_iter().enumerate() {
        let line_number = index + 1;

        if line.contains('{') {
            open_lines.push(line_number);
        }

        if line.contains('}') {
            if let Some(start_line) = open_lines.pop() {
                if line_number > start_line {
                    ranges.push(FoldableRange {
                        start_line,
                        end_line: line_number,
                    });
                }
            }
        }
    }

    // Stable, so ranges sharing a start line keep discovery order.
    ranges.sort_by_key(|range| range.start_line);
    ranges
}

/// Which foldable ranges of a panel are collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldState {
    folded: BTreeSet<usize>,
}

impl FoldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_folded(&self, start_line: usize) -> bool {
        self.folded.contains(&start_line)
    }

    /// Collapse the range starting at `start_line`.
    ///
    /// Returns false if no range starts there or it is already folded.
    pub fn fold(&mut self, start_line: usize, ranges: &[FoldableRange]) -> bool {
        if !starts_range(start_line, ranges) {
            return false;
        }
        self.folded.insert(start_line)
    }

    /// Expand the range starting at `start_line`. Returns whether it was folded.
    pub fn unfold(&mut self, start_line: usize) -> bool {
        self.folded.remove(&start_line)
    }

    /// Flip the fold at `start_line`. Returns whether the state changed.
    pub fn toggle(&mut self, start_line: usize, ranges: &[FoldableRange]) -> bool {
        if self.unfold(start_line) {
            return true;
        }
        self.fold(start_line, ranges)
    }

    /// Drop folds whose range no longer exists after an edit.
    pub fn retain_ranges(&mut self, ranges: &[FoldableRange]) {
        self.folded.retain(|&start_line| starts_range(start_line, ranges));
    }

    /// All 1-based lines hidden by folded ranges.
    ///
    /// A folded range keeps its first line visible and hides the rest. Nested
    /// folds simply overlap.
    pub fn hidden_lines(&self, ranges: &[FoldableRange]) -> BTreeSet<usize> {
        ranges
            .iter()
            .filter(|range| self.is_folded(range.start_line))
            .flat_map(|range| (range.start_line + 1)..=range.end_line)
            .collect()
    }

    pub fn is_hidden(&self, line: usize, ranges: &[FoldableRange]) -> bool {
        ranges.iter().any(|range| {
            self.is_folded(range.start_line) && line > range.start_line && line <= range.end_line
        })
    }

    /// Placeholder text shown in place of a folded range's hidden lines.
    pub fn folded_label(range: &FoldableRange) -> String {
        format!("... {} lines", range.hidden_line_count())
    }
}

fn starts_range(start_line: usize, ranges: &[FoldableRange]) -> bool {
    ranges.iter().any(|range| range.start_line == start_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start_line: usize, end_line: usize) -> FoldableRange {
        FoldableRange {
            start_line,
            end_line,
        }
    }

    #[test]
    fn simple_block() {
        assert_eq!(find_foldable_ranges("a {\nb\n} c"), vec![range(1, 3)]);
    }

    #[test]
    fn single_line_block_is_not_foldable() {
        assert!(find_foldable_ranges("{}").is_empty());
        assert!(find_foldable_ranges("let x = { a: 1 };\nfoo").is_empty());
    }

    #[test]
    fn nested_blocks_sorted_by_start() {
        let text = "fn a() {\n  if x {\n    y\n  }\n}";
        assert_eq!(find_foldable_ranges(text), vec![range(1, 5), range(2, 4)]);
    }

    #[test]
    fn unmatched_braces_are_ignored() {
        assert!(find_foldable_ranges("}\n}\nfoo").is_empty());
        assert!(find_foldable_ranges("{\n{\nfoo").is_empty());
        assert_eq!(find_foldable_ranges("}\n{\nx\n}"), vec![range(2, 4)]);
    }

    #[test]
    fn close_then_open_on_same_line() {
        let text = "if a {\n  b\n} else {\n  c\n}";
        // The push happens before the pop, so `} else {` pops its own line and
        // the outer block spans both arms.
        assert_eq!(find_foldable_ranges(text), vec![range(1, 5)]);
    }

    #[test]
    fn braces_in_strings_count() {
        let text = "let s = \"{\";\nfoo\nbar }";
        assert_eq!(find_foldable_ranges(text), vec![range(1, 3)]);
    }

    #[test]
    fn fold_and_unfold() {
        let ranges = find_foldable_ranges("a {\nb\nc\n}\nd");
        let mut state = FoldState::new();

        assert!(state.toggle(1, &ranges));
        assert!(state.is_folded(1));
        assert_eq!(
            state.hidden_lines(&ranges).into_iter().collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
        assert!(state.is_hidden(4, &ranges));
        assert!(!state.is_hidden(1, &ranges));
        assert!(!state.is_hidden(5, &ranges));
        assert_eq!(FoldState::folded_label(&ranges[0]), "... 3 lines");

        assert!(state.toggle(1, &ranges));
        assert!(!state.is_folded(1));
        assert!(state.hidden_lines(&ranges).is_empty());
    }

    #[test]
    fn fold_requires_known_range() {
        let ranges = find_foldable_ranges("a {\nb\n}");
        let mut state = FoldState::new();
        assert!(!state.fold(2, &ranges));
        assert!(!state.toggle(2, &ranges));
        assert!(state.fold(1, &ranges));
        assert!(!state.fold(1, &ranges));
    }

    #[test]
    fn retain_drops_vanished_ranges() {
        let mut state = FoldState::new();
        let before = find_foldable_ranges("a {\nb\n}\nc {\nd\n}");
        state.fold(1, &before);
        state.fold(4, &before);

        let after = find_foldable_ranges("a {\nb\n}\nc");
        state.retain_ranges(&after);
        assert!(state.is_folded(1));
        assert!(!state.is_folded(4));
    }
}
