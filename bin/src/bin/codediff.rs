use anyhow::{Context, Result};
use clap::Parser;
use codediff_bin::{cli::Cli, commands, config::Config, paths};
use codediff_log::LogConfig;

fn main() {
    let cli = Cli::parse();

    let _log_guard = match codediff_log::init(LogConfig {
        log_file_path: cli.log_file.clone(),
    }) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {e}");
            None
        },
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let discovered = paths::discover(&cwd);
    let config = Config::load_with_overrides(
        cli.config.as_deref(),
        discovered.config_path.as_deref(),
    )?;
    tracing::debug!(?config, "loaded config");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(cli.command, &config, &mut out)
}
