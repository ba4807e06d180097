//! Placing find matches on lines.
//!
//! Find results arrive as global offset pairs into a panel's raw text. The UI
//! paints highlights per line, so each [`Match`] is assigned a line and an
//! in-line column range using a [`LineStartOffsets`] table.
//!
//! Non-base panels render their [`EditScript`] rather than their plain text, and
//! the script contains Removed rows that do not exist in the panel's own text.
//! [`diff_to_plain_lines`] bridges the two numberings.
//!
//! Offsets and columns are byte offsets into the UTF-8 text, the same unit the
//! search layer reports.

use crate::{
    diff::{EditScript, LineKind},
    panel::PanelId,
    text::split_lines,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, ops::Range};

/// A find result: `start..end` into a panel's raw text, with `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    pub panel: PanelId,
    pub start: usize,
    pub end: usize,
}

impl Match {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Offset at which each line of a text begins.
///
/// Index is the 0-based line number; entry 0 is always 0 and there is one
/// entry per line produced by [`split_lines`](crate::text::split_lines).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LineStartOffsets {
    offsets: Vec<usize>,
}

impl LineStartOffsets {
    pub fn as_slice(&self) -> &[usize] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Start offset of `line`, if the text has that many lines.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.offsets.get(line).copied()
    }
}

/// Where a match lands once split into lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineMatch {
    /// Index into the match slice passed to [`assign_matches`].
    pub match_index: usize,
    /// 0-based line containing the match start.
    pub line: usize,
    /// Columns relative to the line start.
    ///
    /// A match spanning a line break keeps its full length, so `columns.end` can
    /// run past the end of the line; renderers clip it.
    pub columns: Range<usize>,
}

/// Build the line-start table for `text`.
pub fn build_line_start_offsets(text: &str) -> LineStartOffsets {
    let lines = split_lines(text);
    let mut offsets = Vec::with_capacity(lines.len());
    let mut next = 0;
    for line in lines {
        offsets.push(next);
        next += line.len() + 1;
    }
    LineStartOffsets { offsets }
}

/// Assign every match to the line containing its start.
///
/// Matches are visited in order of `start` with a pointer that only moves
/// forward over the lines, so the whole pass is O(matches + lines). Input that
/// is not already sorted is sorted first; results come back in `start` order
/// and [`LineMatch::match_index`] still refers to the input slice.
///
/// Matches are expected to satisfy `end >= start`; an inverted match is
/// treated as empty at its start.
pub fn assign_matches(matches: &[Match], offsets: &LineStartOffsets) -> Vec<LineMatch> {
    let mut order: Vec<usize> = (0..matches.len()).collect();
    order.sort_by_key(|&index| matches[index].start);

    let starts = offsets.as_slice();
    let mut line = 0;
    let mut assigned = Vec::with_capacity(matches.len());

    for match_index in order {
        let m = &matches[match_index];
        while line + 1 < starts.len() && starts[line + 1] <= m.start {
            line += 1;
        }
        let line_start = starts.get(line).copied().unwrap_or(0);
        assigned.push(LineMatch {
            match_index,
            line,
            columns: (m.start - line_start)..(m.end.max(m.start) - line_start),
        });
    }

    assigned
}

/// Line containing `offset`: the greatest line whose start is `<= offset`.
///
/// Binary search; agrees with [`assign_matches`] for any single offset.
pub fn line_for_offset(offsets: &LineStartOffsets, offset: usize) -> usize {
    offsets
        .as_slice()
        .partition_point(|&start| start <= offset)
        .saturating_sub(1)
}

/// Group assigned matches by line, preserving their order within a line.
pub fn group_by_line(assigned: &[LineMatch]) -> BTreeMap<usize, Vec<LineMatch>> {
    let mut groups: BTreeMap<usize, Vec<LineMatch>> = BTreeMap::new();
    for line_match in assigned {
        groups
            .entry(line_match.line)
            .or_default()
            .push(line_match.clone());
    }
    groups
}

/// Map each rendered row to a line of the panel's own text.
///
/// For the base panel (`script` is `None`) rows are the text's `line_count`
/// lines, so the mapping is the identity. For other panels each script entry is
/// a row: Unchanged and Added rows consume the next plain line, Removed rows map
/// to `None`.
pub fn diff_to_plain_lines(script: Option<&EditScript>, line_count: usize) -> Vec<Option<usize>> {
    let Some(script) = script else {
        return (0..line_count).map(Some).collect();
    };

    let mut plain_line = 0;
    script
        .iter()
        .map(|line| match line.kind {
            LineKind::Removed => None,
            LineKind::Unchanged | LineKind::Added => {
                let current = plain_line;
                plain_line += 1;
                Some(current)
            },
        })
        .collect()
}
