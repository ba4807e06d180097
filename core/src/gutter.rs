//! Rows for a diff-rendered panel.
//!
//! Combines a panel's edit script with its projected line numbers into the
//! rows a renderer paints: two line-number columns, a change marker, and the
//! line content.
//!
//! ```text
//!    1    1   const Greeter = (name) => {
//!    2      - console.log("Hello, " + name);
//!         2 +   console.log(`Hello, ${name}!`);
//! ```

use crate::{
    diff::{EditScript, LineKind},
    line_numbers::{project_base_panel, project_line_numbers, LineNumberPair},
    text::split_lines,
};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GutterRow {
    pub kind: LineKind,
    pub numbers: LineNumberPair,
    /// `'+'` for Added, `'-'` for Removed, `' '` otherwise.
    pub marker: char,
    pub content: String,
}

impl GutterRow {
    /// Render as one line of text, optionally without the number columns.
    pub fn render(&self, show_line_numbers: bool) -> String {
        if show_line_numbers {
            format!(
                "{:>4} {:>4} {} {}",
                number_cell(self.numbers.base),
                number_cell(self.numbers.current),
                self.marker,
                self.content
            )
        } else {
            format!("{} {}", self.marker, self.content)
        }
    }
}

impl fmt::Display for GutterRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(true))
    }
}

fn number_cell(number: Option<usize>) -> String {
    number.map(|n| n.to_string()).unwrap_or_default()
}

fn marker(kind: LineKind) -> char {
    match kind {
        LineKind::Added => '+',
        LineKind::Removed => '-',
        LineKind::Unchanged => ' ',
    }
}

/// Rows for a panel.
///
/// The base panel has no script (`None`) and renders its own lines, all
/// Unchanged, with no markers. Other panels render their script.
pub fn gutter_rows(script: Option<&EditScript>, text: &str) -> Vec<GutterRow> {
    match script {
        None => {
            let lines = split_lines(text);
            let numbers = project_base_panel(lines.len());
            lines
                .into_iter()
                .zip(numbers)
                .map(|(line, numbers)| GutterRow {
                    kind: LineKind::Unchanged,
                    numbers,
                    marker: ' ',
                    content: line.to_string(),
                })
                .collect()
        },
        Some(script) => script
            .iter()
            .zip(project_line_numbers(script))
            .map(|(line, numbers)| GutterRow {
                kind: line.kind,
                numbers,
                marker: marker(line.kind),
                content: line.content.clone(),
            })
            .collect(),
    }
}
