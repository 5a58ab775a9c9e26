//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use lineconf::ConfigError;
use lineconf::defaults::UPDATER_CONFIG_NAME;
use lineconf::locate::candidate_paths;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - unreadable file, bad directive, nothing found.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - failure writing output.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::FileRead { .. } => {
            eprintln!("\nRun 'lineconf locate {UPDATER_CONFIG_NAME}' to see the search path.");
        }
        ConfigError::IncludeDepth { .. } => {
            eprintln!("\nCheck for files that source each other.");
        }
        ConfigError::IndentedFirstLine { .. } => {
            eprintln!("\nOnly lines continuing a previous directive may be indented.");
        }
        _ => {}
    }
}

/// Prints the locations searched for `name` when none exists.
pub fn print_search_hint(name: &str) {
    eprintln!("\nSearched:");
    for path in candidate_paths(name, dirs::config_dir(), dirs::home_dir()) {
        eprintln!("  {}", path.display());
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
