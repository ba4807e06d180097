//! Gutter line numbers for an edit script.

use crate::diff::{EditScript, LineKind};
use serde::Serialize;

/// 1-based line numbers of one script entry on each side.
///
/// Unchanged entries carry both numbers, Added entries only `current`, and
/// Removed entries only `base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineNumberPair {
    pub base: Option<usize>,
    pub current: Option<usize>,
}

/// Project base and comparison line numbers for every entry of `script`.
pub fn project_line_numbers(script: &EditScript) -> Vec<LineNumberPair> {
    let mut base_counter = 0;
    let mut current_counter = 0;

    script
        .iter()
        .map(|line| match line.kind {
            LineKind::Unchanged => {
                base_counter += 1;
                current_counter += 1;
                LineNumberPair {
                    base: Some(base_counter),
                    current: Some(current_counter),
                }
            },
            LineKind::Removed => {
                base_counter += 1;
                LineNumberPair {
                    base: Some(base_counter),
                    current: None,
                }
            },
            LineKind::Added => {
                current_counter += 1;
                LineNumberPair {
                    base: None,
                    current: Some(current_counter),
                }
            },
        })
        .collect()
}

/// Line numbers for the base panel, which has no script of its own.
///
/// Every line is present on both sides at its own position.
pub fn project_base_panel(line_count: usize) -> Vec<LineNumberPair> {
    (1..=line_count)
        .map(|line| LineNumberPair {
            base: Some(line),
            current: Some(line),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff;

    #[test]
    fn numbers_follow_each_side() {
        let script = diff("a\nb\nc", "a\nx\nc");
        let pairs = project_line_numbers(&script);
        let as_tuples: Vec<_> = pairs.iter().map(|p| (p.base, p.current)).collect();
        assert_eq!(
            as_tuples,
            vec![
                (Some(1), Some(1)),
                (Some(2), None),
                (None, Some(2)),
                (Some(3), Some(3)),
            ]
        );
    }

    #[test]
    fn base_panel_is_identity() {
        let pairs = project_base_panel(3);
        assert_eq!(pairs.len(), 3);
        assert!(pairs
            .iter()
            .enumerate()
            .all(|(i, p)| p.base == Some(i + 1) && p.current == Some(i + 1)));
    }

    #[test]
    fn empty_script_has_no_numbers() {
        assert!(project_line_numbers(&EditScript::default()).is_empty());
    }
}
