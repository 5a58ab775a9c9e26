//! Settings for a dynamic-DNS record updater.
//!
//! A typical file:
//!
//! ```text
//! user     martin
//! key-file /home/martin/transip.key
//! api      api.transip.nl
//! get-ip   ip.example.net
//! records  example.com
//!          www.example.com
//!          mail.example.org
//! ```
//!
//! `records` may appear several times; FQDNs accumulate, grouped by their
//! registrable domain (the last two labels).

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::convert::TypeRegistry;
use crate::error::ConfigError;
use crate::parse::{Handlers, Parser};
use crate::record::{Fields, Record};

/// Error from the updater's custom field handlers.
#[derive(Debug, Error)]
pub enum UpdaterError {
    /// A record has fewer than two labels.
    #[error("record {0} doesn't look like a valid FQDN")]
    InvalidFqdn(String),

    /// The key file cannot be opened.
    #[error("cannot read key file '{}': {source}", path.display())]
    KeyFile {
        /// Path as configured
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Parsed updater settings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct UpdaterConfig {
    /// Account name
    pub user: String,
    /// Private key used to sign API requests
    pub key_file: PathBuf,
    /// API host name
    pub api: String,
    /// Host that reports the caller's public address
    pub get_ip: String,
    /// FQDNs to update, keyed by domain; each FQDN ends with a dot
    pub records: BTreeMap<String, Vec<String>>,
}

impl Record for UpdaterConfig {
    fn fields(&mut self) -> Fields<'_> {
        Fields::new()
            .field("User", &mut self.user)
            .field("KeyFile", &mut self.key_file)
            .field("API", &mut self.api)
            .field("GetIP", &mut self.get_ip)
            .field("Records", &mut self.records)
    }
}

impl UpdaterConfig {
    /// Reads settings from `path`.
    ///
    /// # Errors
    ///
    /// Returns the first read or directive error; see [`Parser::parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let registry = TypeRegistry::with_builtins();
        let parser = Parser::new(&registry);
        let mut config = Self::default();
        parser.parse(&mut config, path, Self::handlers())?;
        Ok(config)
    }

    /// Handlers for the fields that need more than a plain conversion.
    #[must_use]
    pub fn handlers<'h>() -> Handlers<'h, Self> {
        Handlers::new()
            .on("KeyFile", |config: &mut Self, values: &[String]| {
                config.set_key_file(values)
            })
            .on("Records", |config: &mut Self, values: &[String]| {
                config.add_records(values)
            })
    }

    /// Sets the key file from the joined values and checks it can be opened.
    ///
    /// # Errors
    ///
    /// Returns [`UpdaterError::KeyFile`] if the file cannot be opened; the
    /// path is stored regardless.
    pub fn set_key_file(&mut self, values: &[String]) -> Result<(), UpdaterError> {
        self.key_file = PathBuf::from(values.join(" "));
        File::open(&self.key_file)
            .map(drop)
            .map_err(|source| UpdaterError::KeyFile {
                path: self.key_file.clone(),
                source,
            })
    }

    /// Adds FQDNs under their domain, with a trailing dot.
    ///
    /// # Errors
    ///
    /// Returns [`UpdaterError::InvalidFqdn`] for a name with fewer than two
    /// labels. Names before it in `values` are kept.
    pub fn add_records(&mut self, values: &[String]) -> Result<(), UpdaterError> {
        for value in values {
            let fqdn = value.trim_end_matches('.');
            let labels: Vec<&str> = fqdn.split('.').collect();
            let [.., second_level, top_level] = labels.as_slice() else {
                return Err(UpdaterError::InvalidFqdn(fqdn.to_owned()));
            };

            self.records
                .entry(format!("{second_level}.{top_level}"))
                .or_default()
                .push(format!("{fqdn}."));
        }
        Ok(())
    }

    /// Number of FQDNs across all domains.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }
}

impl fmt::Display for UpdaterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "user:     {}", self.user)?;
        writeln!(f, "key file: {}", self.key_file.display())?;
        writeln!(f, "api:      {}", self.api)?;
        writeln!(f, "get ip:   {}", self.get_ip)?;
        write!(f, "records:  {}", self.record_count())?;
        for (domain, fqdns) in &self.records {
            write!(f, "\n  {domain}: {}", fqdns.join(" "))?;
        }
        Ok(())
    }
}
