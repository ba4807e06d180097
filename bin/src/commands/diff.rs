use super::load_panels;
use crate::config::Config;
use anyhow::Result;
use codediff_core::{
    gutter_rows, simple_summary, DerivedTable, DiffStats, FoldableRange, GutterRow, PanelSet,
};
use serde::Serialize;
use std::{io::Write, path::PathBuf};

#[derive(Debug, Serialize)]
struct PanelView<'a> {
    title: &'a str,
    is_base: bool,
    /// `None` for the base panel.
    stats: Option<DiffStats>,
    folds: &'a [FoldableRange],
    rows: Vec<GutterRow>,
}

#[derive(Debug, Serialize)]
struct DiffView<'a> {
    panels: Vec<PanelView<'a>>,
    summary: String,
}

pub fn handle<'a>(
    paths: impl IntoIterator<Item = &'a PathBuf>,
    json: bool,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    let set = load_panels(paths, config)?;
    let table = DerivedTable::build(&set);
    let view = build_view(&set, &table);

    if json {
        serde_json::to_writer_pretty(&mut *out, &view)?;
        writeln!(out)?;
        return Ok(());
    }

    for panel in &view.panels {
        let suffix = if panel.is_base { " (base)" } else { "" };
        writeln!(out, "== {}{suffix} ==", panel.title)?;
        for row in &panel.rows {
            writeln!(out, "{}", row.render(config.show_line_numbers))?;
        }
        writeln!(out)?;
    }
    writeln!(out, "{}", view.summary)?;
    Ok(())
}

fn build_view<'a>(set: &'a PanelSet, table: &'a DerivedTable) -> DiffView<'a> {
    let panels = set
        .iter()
        .zip(table.iter())
        .map(|(panel, derived)| PanelView {
            title: &panel.title,
            is_base: set.is_base(panel.id),
            stats: derived.script.as_ref().map(|script| script.stats()),
            folds: &derived.folds,
            rows: gutter_rows(derived.script.as_ref(), &panel.text),
        })
        .collect();

    DiffView {
        panels,
        summary: simple_summary(set, table),
    }
}
