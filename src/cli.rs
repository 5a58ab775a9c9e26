//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// lineconf: line-oriented configuration files
///
/// Inspects configuration files written as `key value...` lines and checks
/// dynamic-DNS updater settings.
#[derive(Debug, Parser)]
#[command(name = "lineconf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for lineconf
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the logical lines of a file after comments, continuations and
    /// `source` includes are processed
    Lines {
        /// File to read
        path: PathBuf,
    },

    /// Print where a configuration file of the given name is found
    Locate {
        /// File name, e.g. `dyndns.conf`
        name: String,
    },

    /// Parse and print dynamic-DNS updater settings
    Check {
        /// Path to configuration file (default: search for `dyndns.conf`)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Print settings as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
