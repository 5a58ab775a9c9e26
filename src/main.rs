//! lineconf: line-oriented configuration files
//!
//! Entry point for the lineconf command-line tool.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lineconf::cli::{Cli, Command};
use lineconf::defaults::UPDATER_CONFIG_NAME;
use lineconf::find_config;
use lineconf::reader;
use lineconf::updater::UpdaterConfig;

mod app;

use app::{exit_code, print_config_hint, print_search_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.verbose);

    match cli.command {
        Command::Lines { path } => handle_lines(&path),
        Command::Locate { name } => handle_locate(&name),
        Command::Check { config, json } => handle_check(config, json),
    }
}

/// Handles the `lines` subcommand.
fn handle_lines(path: &Path) -> ExitCode {
    match reader::read_file(path) {
        Ok(lines) => {
            for line in &lines {
                println!("{}:{}: {}", line.file.display(), line.number, line.text);
            }
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            print_config_hint(&e);
            exit_code::CONFIG_ERROR
        }
    }
}

/// Handles the `locate` subcommand.
fn handle_locate(name: &str) -> ExitCode {
    if let Some(path) = find_config(name) {
        println!("{}", path.display());
        exit_code::SUCCESS
    } else {
        eprintln!("No config file named '{name}' found");
        print_search_hint(name);
        exit_code::CONFIG_ERROR
    }
}

/// Handles the `check` subcommand.
fn handle_check(config: Option<PathBuf>, json: bool) -> ExitCode {
    let Some(path) = config.or_else(|| find_config(UPDATER_CONFIG_NAME)) else {
        eprintln!("No config file named '{UPDATER_CONFIG_NAME}' found");
        print_search_hint(UPDATER_CONFIG_NAME);
        return exit_code::CONFIG_ERROR;
    };

    let settings = match UpdaterConfig::load(&path) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };
    tracing::info!(path = %path.display(), records = settings.record_count(), "config is valid");

    if !json {
        println!("{settings}");
        return exit_code::SUCCESS;
    }

    match serde_json::to_string_pretty(&settings) {
        Ok(out) => {
            println!("{out}");
            exit_code::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to serialize settings: {e}");
            exit_code::runtime_error()
        }
    }
}
