//! Logging setup for codediff with file output and optional stderr.
//!
//! Logs always go to a file at `warn` level (or the requested level when one
//! is set through the environment). Console logging goes to stderr, keeping
//! stdout for command output, and is enabled when `CODEDIFF_LOG` or `RUST_LOG`
//! is set, or in debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`CODEDIFF_LOG`** (highest priority) - codediff-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for codediff crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/codediff/logs/codediff-<pid>.log`
//! - macOS: `~/Library/Application Support/codediff/logs/codediff-12345.log`
//! - Linux: `~/.local/share/codediff/logs/codediff-12345.log`
//!
//! Override with `--log-file <path>`.

use std::{
    env,
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Crates whose level a bare `CODEDIFF_LOG=<level>` controls.
const CRATES: &[&str] = &["codediff_core", "codediff_bin", "codediff"];

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// A file path, or a directory to place the default file name in.
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// Filter priority is `CODEDIFF_LOG` > `RUST_LOG` > defaults, as described in
/// the module docs.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program.
/// Dropping it flushes and stops the background file writer.
pub fn init(config: LogConfig) -> Result<LogGuard, Error> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(create_file_filter());

    let console_layer = console_enabled().then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(create_filter())
    });

    Registry::default()
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    let log_file = log_dir.join(filename);
    tracing::debug!(log_file = %log_file.display(), "logging initialized");

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file,
    })
}

/// Initialize logging for tests.
///
/// Console only, no file output. Safe to call from every test; later calls
/// are no-ops.
pub fn test() {
    let _ = fmt()
        .with_env_filter(create_filter())
        .with_test_writer()
        .try_init();
}

fn console_enabled() -> bool {
    env::var("CODEDIFF_LOG").is_ok() || env::var("RUST_LOG").is_ok() || cfg!(debug_assertions)
}

/// Split an optional override into `(directory, file name)`.
///
/// A path with an extension is taken as the log file itself; anything else is
/// a directory for the default `codediff-<pid>.log`.
fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("codediff-{}.log", std::process::id());

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir.to_path_buf(), name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("codediff")
        .join("logs");

    (dir, filename)
}

/// File filter: the user-specified level if set, otherwise `warn`.
fn create_file_filter() -> EnvFilter {
    if env::var("CODEDIFF_LOG").is_ok() || env::var("RUST_LOG").is_ok() {
        return create_filter();
    }
    EnvFilter::new("warn")
}

fn create_filter() -> EnvFilter {
    EnvFilter::new(filter_directives(
        env::var("CODEDIFF_LOG").ok().as_deref(),
        env::var("RUST_LOG").ok().as_deref(),
    ))
}

/// Directive string for the given `CODEDIFF_LOG` and `RUST_LOG` values.
fn filter_directives(codediff_log: Option<&str>, rust_log: Option<&str>) -> String {
    if let Some(value) = codediff_log {
        return expand_codediff_log(value);
    }
    if let Some(value) = rust_log {
        return value.to_string();
    }
    expand_level("info")
}

/// Expand a `CODEDIFF_LOG` value.
///
/// - `CODEDIFF_LOG=debug` becomes `warn,codediff_core=debug,codediff_bin=debug,...`
/// - `CODEDIFF_LOG=codediff_core=trace` is used as-is
fn expand_codediff_log(value: &str) -> String {
    if value.contains('=') || value.contains(':') || value.contains(',') {
        return value.to_string();
    }
    expand_level(value)
}

fn expand_level(level: &str) -> String {
    let mut directives = String::from("warn");
    for name in CRATES {
        directives.push(',');
        directives.push_str(name);
        directives.push('=');
        directives.push_str(level);
    }
    directives
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives() {
        assert_eq!(
            filter_directives(None, None),
            "warn,codediff_core=info,codediff_bin=info,codediff=info"
        );
    }

    #[test]
    fn bare_level_expands_to_every_crate() {
        assert_eq!(
            filter_directives(Some("debug"), Some("trace")),
            "warn,codediff_core=debug,codediff_bin=debug,codediff=debug"
        );
    }

    #[test]
    fn advanced_syntax_passes_through() {
        assert_eq!(
            filter_directives(Some("codediff_core=trace"), None),
            "codediff_core=trace"
        );
        assert_eq!(filter_directives(None, Some("info")), "info");
    }

    #[test]
    fn log_path_defaults_to_pid_file() {
        let (dir, name) = resolve_log_path(None);
        assert!(dir.ends_with("codediff/logs"));
        assert_eq!(name, format!("codediff-{}.log", std::process::id()));
    }

    #[test]
    fn log_path_override_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("run.log");
        let (dir, name) = resolve_log_path(Some(file));
        assert_eq!(dir, tmp.path());
        assert_eq!(name, "run.log");
    }

    #[test]
    fn log_path_override_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let (dir, name) = resolve_log_path(Some(tmp.path().to_path_buf()));
        assert_eq!(dir, tmp.path());
        assert!(name.starts_with("codediff-"));
    }

    #[test]
    fn bare_file_name_lands_in_current_dir() {
        let (dir, name) = resolve_log_path(Some(PathBuf::from("codediff.log")));
        assert_eq!(dir, Path::new("."));
        assert_eq!(name, "codediff.log");
    }
}
