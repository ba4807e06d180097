//! Per-panel derived artifacts.
//!
//! Everything the renderer needs for a panel (edit script, line numbers, fold
//! ranges, find highlights) is derived from the panel texts. [`DerivedTable`]
//! is the explicit `panel id -> artifacts` table the application layer owns.
//! It is never patched in place: [`DerivedTable::refresh`] returns a new table
//! in which only the affected panels were recomputed.
//!
//! # Invalidation
//!
//! - Editing a comparison panel recomputes that panel only.
//! - Editing the base panel recomputes every panel, since every script is
//!   relative to it.
//! - Adding or removing panels rebuilds the whole table.

use crate::{
    diff::{diff, EditScript},
    fold::{find_foldable_ranges, FoldableRange},
    line_numbers::{project_base_panel, project_line_numbers, LineNumberPair},
    matches::{
        assign_matches, build_line_start_offsets, diff_to_plain_lines, group_by_line, LineMatch,
        Match,
    },
    panel::{Panel, PanelId, PanelSet},
    search::{find_or_empty, FindOptions},
    text::line_count,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Artifacts derived from one panel's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedPanel {
    pub panel: PanelId,
    /// Script against the base panel; `None` for the base panel itself.
    pub script: Option<EditScript>,
    pub line_numbers: Vec<LineNumberPair>,
    pub folds: Vec<FoldableRange>,
    /// Lines in the panel's own text.
    pub line_count: usize,
}

impl DerivedPanel {
    pub fn base(panel: &Panel) -> Self {
        let line_count = line_count(&panel.text);
        Self {
            panel: panel.id,
            script: None,
            line_numbers: project_base_panel(line_count),
            folds: find_foldable_ranges(&panel.text),
            line_count,
        }
    }

    pub fn comparison(base: &Panel, panel: &Panel) -> Self {
        let script = diff(&base.text, &panel.text);
        Self {
            panel: panel.id,
            line_numbers: project_line_numbers(&script),
            folds: find_foldable_ranges(&panel.text),
            line_count: line_count(&panel.text),
            script: Some(script),
        }
    }

    /// Number of rendered rows: script entries, or plain lines for the base.
    pub fn row_count(&self) -> usize {
        self.line_numbers.len()
    }
}

/// Find results of one panel, placed on rendered rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelMatches {
    pub panel: PanelId,
    pub matches: Vec<Match>,
    /// Matches keyed by rendered row (script index for comparison panels).
    pub by_row: BTreeMap<usize, Vec<LineMatch>>,
}

/// `panel id -> DerivedPanel`, in panel order.
#[derive(Debug, Clone, Default)]
pub struct DerivedTable {
    order: Vec<PanelId>,
    entries: HashMap<PanelId, DerivedPanel>,
}

impl DerivedTable {
    /// Derive every panel from scratch.
    pub fn build(set: &PanelSet) -> Self {
        let base = set.base();
        let mut order = Vec::with_capacity(set.len());
        let mut entries = HashMap::with_capacity(set.len());

        for panel in set {
            let derived = if panel.id == base.id {
                DerivedPanel::base(panel)
            } else {
                DerivedPanel::comparison(base, panel)
            };
            order.push(panel.id);
            entries.insert(panel.id, derived);
        }

        tracing::debug!(panels = order.len(), "built derived table");
        Self { order, entries }
    }

    /// A new table reflecting an edit to `changed`.
    pub fn refresh(&self, set: &PanelSet, changed: PanelId) -> Self {
        let same_panels = set.iter().map(|panel| panel.id).eq(self.order.iter().copied());
        if !same_panels || set.is_base(changed) {
            return Self::build(set);
        }

        let Some(panel) = set.get(changed) else {
            return self.clone();
        };

        let mut entries = self.entries.clone();
        entries.insert(changed, DerivedPanel::comparison(set.base(), panel));
        tracing::debug!(%changed, "refreshed derived panel");

        Self {
            order: self.order.clone(),
            entries,
        }
    }

    pub fn get(&self, id: PanelId) -> Option<&DerivedPanel> {
        self.entries.get(&id)
    }

    /// Derived panels in panel order.
    pub fn iter(&self) -> impl Iterator<Item = &DerivedPanel> + '_ {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Run a find query over every panel and place the matches on rows.
    ///
    /// An invalid query yields panels with no matches.
    pub fn find(&self, set: &PanelSet, query: &str, options: FindOptions) -> Vec<PanelMatches> {
        set.iter()
            .filter_map(|panel| {
                let derived = self.get(panel.id)?;
                Some(panel_matches(panel, derived, query, options))
            })
            .collect()
    }
}

fn panel_matches(
    panel: &Panel,
    derived: &DerivedPanel,
    query: &str,
    options: FindOptions,
) -> PanelMatches {
    let matches = find_or_empty(query, options, panel.id, &panel.text);
    let offsets = build_line_start_offsets(&panel.text);
    let mut by_plain_line = group_by_line(&assign_matches(&matches, &offsets));

    let by_row = diff_to_plain_lines(derived.script.as_ref(), derived.line_count)
        .into_iter()
        .enumerate()
        .filter_map(|(row, plain_line)| {
            let line_matches = by_plain_line.remove(&plain_line?)?;
            Some((row, line_matches))
        })
        .collect();

    PanelMatches {
        panel: panel.id,
        matches,
        by_row,
    }
}
