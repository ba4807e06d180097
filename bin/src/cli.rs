use clap::{Args, Parser, Subcommand};
use codediff_core::FindOptions;
use std::path::PathBuf;

/// Compare a base file against up to three others, line by line.
#[derive(Debug, Parser)]
#[command(name = "codediff", author, version, about, long_about = None)]
pub struct Cli {
    /// Config file, instead of the discovered `.codediff/config.toml`
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path, or a directory for the default log file name
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show each comparison file as a diff against the base, then a summary
    Diff {
        #[command(flatten)]
        panels: PanelArgs,

        /// Print derived panels as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the foldable brace ranges of a file
    Folds {
        file: PathBuf,

        /// Print ranges as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find a query in every file and place the matches on diff rows
    Find {
        query: String,

        #[command(flatten)]
        panels: PanelArgs,

        #[command(flatten)]
        find: FindArgs,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace the first match (or every match) of a query and print the result
    Replace {
        query: String,
        replacement: String,
        file: PathBuf,

        /// Replace every match instead of the first
        #[arg(long)]
        all: bool,

        #[command(flatten)]
        find: FindArgs,
    },

    /// Print a short summary of additions and removals
    Summary {
        #[command(flatten)]
        panels: PanelArgs,
    },
}

/// A base file and one to three comparison files.
#[derive(Debug, Args)]
pub struct PanelArgs {
    /// File every other file is compared against
    pub base: PathBuf,

    /// Files to compare against the base
    #[arg(required = true, num_args = 1..=3)]
    pub others: Vec<PathBuf>,
}

impl PanelArgs {
    /// Base first, then the comparison files.
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> + '_ {
        std::iter::once(&self.base).chain(&self.others)
    }
}

/// Find toggles; unset flags fall back to the config.
///
/// `--regex` alone means `--regex=true`; `--regex=false` turns a config
/// default off.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct FindArgs {
    /// Treat the query as a regular expression
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub regex: Option<bool>,

    /// Match case exactly
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub case_sensitive: Option<bool>,
}

impl FindArgs {
    /// Config defaults overridden by any flag given on the command line.
    pub fn resolve(self, defaults: FindOptions) -> FindOptions {
        FindOptions {
            case_sensitive: self.case_sensitive.unwrap_or(defaults.case_sensitive),
            use_regex: self.regex.unwrap_or(defaults.use_regex),
        }
    }
}
