//! Discovery of the `.codediff/` settings directory.
//!
//! The nearest `.codediff/` in the start directory or any ancestor wins;
//! otherwise `<config_dir>/codediff` is used if it exists.

use std::path::{Path, PathBuf};

pub const DIR_NAME: &str = ".codediff";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodediffPaths {
    pub codediff_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

pub fn discover(start_dir: &Path) -> CodediffPaths {
    if let Some(dir) = walk_ancestors(start_dir) {
        tracing::info!("found project .codediff directory: {}", dir.display());
        return paths_from_dir(&dir);
    }

    match system_config_dir() {
        Some(dir) => {
            tracing::info!("using system config directory: {}", dir.display());
            paths_from_dir(&dir)
        },
        None => {
            tracing::debug!("no .codediff directory found");
            CodediffPaths::default()
        },
    }
}

fn walk_ancestors(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

fn system_config_dir() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join("codediff");
    dir.is_dir().then_some(dir)
}

fn paths_from_dir(dir: &Path) -> CodediffPaths {
    let config = dir.join(CONFIG_FILE);
    CodediffPaths {
        codediff_dir: Some(dir.to_path_buf()),
        config_path: config.is_file().then_some(config),
    }
}
