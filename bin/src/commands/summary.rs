use super::load_panels;
use crate::config::Config;
use anyhow::Result;
use codediff_core::{simple_summary, DerivedTable};
use std::{io::Write, path::PathBuf};

pub fn handle<'a>(
    paths: impl IntoIterator<Item = &'a PathBuf>,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    let set = load_panels(paths, config)?;
    let table = DerivedTable::build(&set);
    writeln!(out, "{}", simple_summary(&set, &table))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{files, output};

    #[test]
    fn summarizes_every_comparison() {
        let (_dir, paths) = files(&[
            ("base.ts", "a\nb"),
            ("same.ts", "a\nb"),
            ("draft.ts", "a\nc\nd"),
        ]);
        let text = output(|out| handle(&paths, &Config::default(), out));
        assert_eq!(
            text,
            "Found 2 additions and 1 removals.\nChanges were detected in: draft.ts.\n"
        );
    }

    #[test]
    fn identical_files() {
        let (_dir, paths) = files(&[("a", "x"), ("b", "x")]);
        let text = output(|out| handle(&paths, &Config::default(), out));
        assert_eq!(text, "No differences found between the panels.\n");
    }
}
