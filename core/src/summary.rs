//! Plain-text summary of the differences across panels.

use crate::{derived::DerivedTable, panel::PanelSet};

pub const NO_DIFFERENCES: &str = "No differences found between the panels.";

/// Summarize additions and removals over every comparison panel.
///
/// ```text
/// Found 3 additions and 1 removals.
/// Changes were detected in: Refactored.ts, Draft.ts.
/// ```
pub fn simple_summary(set: &PanelSet, table: &DerivedTable) -> String {
    let mut added = 0;
    let mut removed = 0;
    let mut changed_titles = Vec::new();

    for panel in set.iter().skip(1) {
        let Some(stats) = table
            .get(panel.id)
            .and_then(|derived| derived.script.as_ref())
            .map(|script| script.stats())
        else {
            continue;
        };

        if stats.added > 0 || stats.removed > 0 {
            added += stats.added;
            removed += stats.removed;
            changed_titles.push(panel.title.as_str());
        }
    }

    if added == 0 && removed == 0 {
        return NO_DIFFERENCES.to_string();
    }

    let mut summary = format!("Found {added} additions and {removed} removals.");
    if !changed_titles.is_empty() {
        summary.push_str(&format!(
            "\nChanges were detected in: {}.",
            changed_titles.join(", ")
        ));
    }
    summary
}
