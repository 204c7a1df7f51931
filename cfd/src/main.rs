//! cfd - show a configuration registry sorted by key
//!
//! Loads the registry, builds the version header and sorted dump, then hands
//! both to a window or console presenter.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use regex::Regex;
use tracing::{debug, info};

use configdumper::cli::Cli;
use configdumper::config::Config;
use configdumper::{ConfigStore, DumpOptions, PATCHLEVEL_KEY, VERSION_KEY, build_header, build_header_strict};
use configdumper::{ConsolePresenter, format_dump_with, present};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Logs go to a file so they never land on top of the window
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("configdumper")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => s.parse::<tracing::Level>().unwrap_or_else(|_| {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
            tracing::Level::INFO
        }),
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("configdumper.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    debug!(?cli, ?config, "main: resolved settings");

    let path = cli.file.clone().unwrap_or_else(|| config.registry_path.clone());
    let product = cli.product.as_deref().unwrap_or(&config.product);

    let store = ConfigStore::load(&path).context(format!("Failed to load registry {}", path.display()))?;

    let version = store.get(VERSION_KEY);
    let patchlevel = store.get(PATCHLEVEL_KEY);
    let header = if cli.strict || config.strict_version {
        build_header_strict(product, version, patchlevel).context("Failed to build header")?
    } else {
        build_header(product, version, patchlevel)
    };

    let filter = cli
        .filter
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("Invalid --filter pattern")?;
    let opts = DumpOptions {
        keys_only: cli.keys_only,
        shell: cli.shell,
        filter,
    };
    let body = format_dump_with(&store, &opts);

    let mut presenter = present::select(cli.console, config.viewport);
    let completion =
        present::present_or_fallback(presenter.as_mut(), &mut ConsolePresenter::stdout(), &header, &body)
            .context("Failed to present registry dump")?;

    info!(?completion, "cfd finished");
    Ok(())
}
