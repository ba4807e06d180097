//! Subcommand handlers.
//!
//! Each handler reads its input files, runs the core, and writes to the given
//! writer so tests can capture the output.

use crate::{cli::Command, config::Config};
use anyhow::{Context, Result};
use codediff_core::{Panel, PanelSet};
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub mod diff;
pub mod find;
pub mod folds;
pub mod replace;
pub mod summary;

pub fn run(command: Command, config: &Config, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Diff { panels, json } => diff::handle(panels.paths(), json, config, out),
        Command::Folds { file, json } => folds::handle(&file, json, out),
        Command::Find {
            query,
            panels,
            find: find_args,
            json,
        } => {
            let options = find_args.resolve(config.find);
            find::handle(&query, panels.paths(), options, json, config, out)
        },
        Command::Replace {
            query,
            replacement,
            file,
            all,
            find: find_args,
        } => {
            let options = find_args.resolve(config.find);
            replace::handle(&query, &replacement, &file, all, options, out)
        },
        Command::Summary { panels } => summary::handle(panels.paths(), config, out),
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Panel title for a file: its file name, or the whole path if it has none.
pub(crate) fn title(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read every file into a panel; the first path is the base.
pub(crate) fn load_panels<'a>(
    paths: impl IntoIterator<Item = &'a PathBuf>,
    config: &Config,
) -> Result<PanelSet> {
    let panels = paths
        .into_iter()
        .map(|path| Ok(Panel::new(title(path), read_file(path)?)))
        .collect::<Result<Vec<_>>>()?;

    let set = PanelSet::from_panels(panels).context("Invalid panel count")?;
    warn_if_large(&set, config.large_diff_warning_lines);
    Ok(set)
}

fn warn_if_large(set: &PanelSet, limit: usize) {
    for panel in set {
        let lines = codediff_core::text::line_count(&panel.text);
        if lines > limit {
            tracing::warn!(
                panel = %panel.title,
                lines,
                limit,
                "large panel, diffing may be slow"
            );
        }
    }
}
