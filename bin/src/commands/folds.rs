use super::read_file;
use anyhow::Result;
use codediff_core::{find_foldable_ranges, FoldState};
use std::{io::Write, path::Path};

pub fn handle(file: &Path, json: bool, out: &mut dyn Write) -> Result<()> {
    let text = read_file(file)?;
    let ranges = find_foldable_ranges(&text);
    tracing::debug!(file = %file.display(), ranges = ranges.len(), "detected folds");

    if json {
        serde_json::to_writer_pretty(&mut *out, &ranges)?;
        writeln!(out)?;
        return Ok(());
    }

    if ranges.is_empty() {
        writeln!(out, "No foldable ranges")?;
    }
    for range in &ranges {
        writeln!(
            out,
            "{}-{} {}",
            range.start_line,
            range.end_line,
            FoldState::folded_label(range)
        )?;
    }
    Ok(())
}
