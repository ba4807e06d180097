use super::load_panels;
use crate::config::Config;
use anyhow::Result;
use codediff_core::{gutter_rows, DerivedTable, FindOptions, PanelMatches};
use serde::Serialize;
use std::{io::Write, path::PathBuf};

#[derive(Debug, Serialize)]
struct FindView<'a> {
    title: &'a str,
    #[serde(flatten)]
    matches: &'a PanelMatches,
}

pub fn handle<'a>(
    query: &str,
    paths: impl IntoIterator<Item = &'a PathBuf>,
    options: FindOptions,
    json: bool,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    let set = load_panels(paths, config)?;
    let table = DerivedTable::build(&set);
    let results = table.find(&set, query, options);
    tracing::debug!(
        query,
        total = results.iter().map(|panel| panel.matches.len()).sum::<usize>(),
        "find finished"
    );

    if json {
        let views: Vec<FindView<'_>> = set
            .iter()
            .zip(&results)
            .map(|(panel, matches)| FindView {
                title: &panel.title,
                matches,
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &views)?;
        writeln!(out)?;
        return Ok(());
    }

    for (panel, found) in set.iter().zip(&results) {
        writeln!(out, "== {} ==", panel.title)?;
        if found.matches.is_empty() {
            writeln!(out, "No results")?;
            continue;
        }
        writeln!(out, "{} matches", found.matches.len())?;

        let derived = table.get(panel.id);
        let rows = gutter_rows(
            derived.and_then(|derived| derived.script.as_ref()),
            &panel.text,
        );
        for (row, line_matches) in &found.by_row {
            let Some(gutter_row) = rows.get(*row) else {
                continue;
            };
            let columns: Vec<String> = line_matches
                .iter()
                .map(|m| format!("{}..{}", m.columns.start, m.columns.end))
                .collect();
            writeln!(
                out,
                "{}  [{}]",
                gutter_row.render(config.show_line_numbers),
                columns.join(", ")
            )?;
        }
    }
    Ok(())
}
