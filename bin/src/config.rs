//! Configuration for the `codediff` binary.
//!
//! Loads `config.toml` from the path discovered by [`crate::paths::discover`],
//! with optional CLI override via `--config`.
//!
//! # Architecture
//!
//! 1. **Startup** calls [`crate::paths::discover`] from the working directory
//! 2. [`Config::load_with_overrides`] picks the config path: CLI override > discovered > embedded
//! 3. Commands read find defaults and output toggles from the [`Config`]; find
//!    flags given on the command line take precedence
//!
//! # Testing
//!
//! Tests use [`Config::load()`] with explicit paths to temporary directories.

use anyhow::{Context, Result};
use codediff_core::FindOptions;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default toggles for `find` and `replace`.
    pub find: FindOptions,

    /// Render base/current line-number columns in gutter output.
    #[serde(default = "default_show_line_numbers")]
    pub show_line_numbers: bool,

    /// Line count above which a diff side triggers a slowness warning.
    #[serde(default = "default_large_diff_warning_lines")]
    pub large_diff_warning_lines: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            find: FindOptions::default(),
            show_line_numbers: default_show_line_numbers(),
            large_diff_warning_lines: default_large_diff_warning_lines(),
        }
    }
}

fn default_show_line_numbers() -> bool {
    true
}

fn default_large_diff_warning_lines() -> usize {
    2000
}

impl Config {
    /// Read and deserialize a TOML config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration with priority: CLI override > discovered path > embedded defaults.
    pub fn load_with_overrides(
        cli_override: Option<&Path>,
        discovered_path: Option<&Path>,
    ) -> Result<Self> {
        if let Some(path) = cli_override {
            return Self::load(path);
        }
        if let Some(path) = discovered_path {
            return Self::load(path);
        }
        Self::load_embedded()
    }

    fn load_embedded() -> Result<Self> {
        let source = include_str!("../../config.toml");
        toml::from_str(source).context("Failed to parse embedded config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_empty_config() {
        let tmp_dir = tempdir().unwrap();
        let config_path = tmp_dir.path().join("config.toml");
        std::fs::write(&config_path, "").unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn errors_on_invalid_toml() {
        let tmp_dir = tempdir().unwrap();
        let config_path = tmp_dir.path().join("config.toml");
        std::fs::write(&config_path, "invalid toml {{{{").unwrap();

        let result = Config::load(&config_path);
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }

    #[test]
    fn errors_on_nonexistent_file() {
        let tmp_dir = tempdir().unwrap();
        let config_path = tmp_dir.path().join("nonexistent.toml");

        let result = Config::load(&config_path);
        assert!(result.unwrap_err().to_string().contains("Failed to read"));
    }

    #[test]
    fn rejects_unknown_keys() {
        let tmp_dir = tempdir().unwrap();
        let config_path = tmp_dir.path().join("config.toml");
        std::fs::write(&config_path, "show_line_numbrs = false").unwrap();
        assert!(Config::load(&config_path).is_err());

        std::fs::write(&config_path, "[find]\nwhole_word = true").unwrap();
        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn partial_find_table_keeps_defaults() {
        let tmp_dir = tempdir().unwrap();
        let config_path = tmp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[find]\nuse_regex = true").unwrap();

        let config = Config::load(&config_path).unwrap();
        assert!(config.find.use_regex);
        assert!(!config.find.case_sensitive);
        assert!(config.show_line_numbers);
    }

    #[test]
    fn cli_override_takes_priority() {
        let tmp_dir = tempdir().unwrap();
        let cli_path = tmp_dir.path().join("cli.toml");
        let discovered_path = tmp_dir.path().join("discovered.toml");
        std::fs::write(&cli_path, "large_diff_warning_lines = 10").unwrap();
        std::fs::write(&discovered_path, "large_diff_warning_lines = 20").unwrap();

        let config = Config::load_with_overrides(Some(&cli_path), Some(&discovered_path)).unwrap();
        assert_eq!(config.large_diff_warning_lines, 10);
    }

    #[test]
    fn discovered_path_used_when_no_cli_override() {
        let tmp_dir = tempdir().unwrap();
        let discovered_path = tmp_dir.path().join("discovered.toml");
        std::fs::write(&discovered_path, "show_line_numbers = false").unwrap();

        let config = Config::load_with_overrides(None, Some(&discovered_path)).unwrap();
        assert!(!config.show_line_numbers);
    }

    #[test]
    fn embedded_matches_defaults() {
        let config = Config::load_with_overrides(None, None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_overrides_errors_on_missing_cli_override() {
        let tmp_dir = tempdir().unwrap();
        let missing = tmp_dir.path().join("nonexistent.toml");
        assert!(Config::load_with_overrides(Some(&missing), None).is_err());
    }
}
