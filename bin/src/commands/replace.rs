use super::read_file;
use anyhow::Result;
use codediff_core::{find_or_empty, replace_all, FindOptions, FindSession, PanelId};
use std::{io::Write, path::Path};

/// Print `file` with the first (or every) match of `query` replaced.
///
/// The file is left untouched. With no matches the text is printed as is.
pub fn handle(
    query: &str,
    replacement: &str,
    file: &Path,
    all: bool,
    options: FindOptions,
    out: &mut dyn Write,
) -> Result<()> {
    let text = read_file(file)?;
    let matches = find_or_empty(query, options, PanelId::nil(), &text);
    tracing::debug!(query, matches = matches.len(), all, "replacing");

    let replaced = if all {
        replace_all(&text, &matches, replacement)
    } else {
        FindSession::new(matches)
            .replace_active(&text, replacement)
            .unwrap_or(text)
    };

    out.write_all(replaced.as_bytes())?;
    Ok(())
}
