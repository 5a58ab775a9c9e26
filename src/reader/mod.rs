//! Line reader: turns a configuration file into logical lines.
//!
//! A logical line is one directive after:
//! - dropping blank lines and `#` comments (`\#` is a literal `#`)
//! - collapsing whitespace runs to a single space
//! - appending indented lines to the directive above them
//! - splicing in files named by `source <path>` lines
//!
//! Each logical line remembers the file and physical line number it
//! started on, so diagnostics point at the right place even for lines
//! that came from a sourced file.

mod lexer;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::defaults::{MAX_INCLUDE_DEPTH, SOURCE_DIRECTIVE};
use crate::error::ConfigError;

pub use lexer::{collapse_whitespace, normalize, strip_comment};

/// One fully assembled directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// File the directive starts in.
    pub file: Arc<Path>,
    /// 1-based physical line number in `file`.
    pub number: usize,
    /// Normalized directive text: key followed by values, single-space separated.
    pub text: String,
}

impl LogicalLine {
    /// Returns the key token (the first token of the line).
    #[must_use]
    pub fn key(&self) -> &str {
        self.text.split(' ').next().unwrap_or_default()
    }

    /// Returns the value tokens (everything after the key).
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.text.split(' ').skip(1).map(str::to_owned).collect()
    }
}

/// Reads a configuration file into logical lines.
///
/// `source` directives are resolved recursively and their lines spliced in
/// at the position of the directive.
///
/// # Errors
///
/// Returns an error if the file or any sourced file cannot be read, if the
/// first directive of a file is indented, or if `source` directives nest
/// deeper than [`MAX_INCLUDE_DEPTH`].
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<LogicalLine>, ConfigError> {
    let mut lines = Vec::new();
    read_into(path.as_ref(), 0, &mut lines)?;
    Ok(lines)
}

/// Splits already-loaded content into logical lines.
///
/// `path` is only used to tag lines and errors; `source` directives are
/// still read from disk.
///
/// # Errors
///
/// Same as [`read_file`], minus the failure to read `path` itself.
pub fn read_str(path: impl AsRef<Path>, content: &str) -> Result<Vec<LogicalLine>, ConfigError> {
    let path = path.as_ref();
    let mut lines = Vec::new();
    Assembler::new(path, 0, &mut lines).feed_all(content)?;
    Ok(lines)
}

fn read_into(path: &Path, depth: usize, out: &mut Vec<LogicalLine>) -> Result<(), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let before = out.len();
    Assembler::new(path, depth, out).feed_all(&content)?;
    tracing::debug!(
        path = %path.display(),
        depth,
        lines = out.len() - before,
        "read config file"
    );

    Ok(())
}

/// Builds logical lines for one file, appending to a shared output.
struct Assembler<'a> {
    file: Arc<Path>,
    depth: usize,
    out: &'a mut Vec<LogicalLine>,
    /// Whether this file has produced a directive yet (including `source`).
    started: bool,
}

impl<'a> Assembler<'a> {
    fn new(path: &Path, depth: usize, out: &'a mut Vec<LogicalLine>) -> Self {
        Self {
            file: Arc::from(path),
            depth,
            out,
            started: false,
        }
    }

    fn feed_all(&mut self, content: &str) -> Result<(), ConfigError> {
        for (idx, raw) in content.lines().enumerate() {
            self.feed(idx + 1, raw)?;
        }
        Ok(())
    }

    fn feed(&mut self, number: usize, raw: &str) -> Result<(), ConfigError> {
        let indented = raw.starts_with(char::is_whitespace);
        let trimmed = raw.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }

        let text = lexer::normalize(trimmed);

        if indented {
            return self.continue_previous(number, &text);
        }

        self.started = true;
        if let Some(target) = text.strip_prefix(SOURCE_DIRECTIVE) {
            return self.source(number, target);
        }

        self.out.push(LogicalLine {
            file: Arc::clone(&self.file),
            number,
            text,
        });
        Ok(())
    }

    fn continue_previous(&mut self, number: usize, text: &str) -> Result<(), ConfigError> {
        let started = self.started;
        if let Some(previous) = self.out.last_mut().filter(|_| started) {
            previous.text.push(' ');
            previous.text.push_str(text);
            return Ok(());
        }

        Err(ConfigError::IndentedFirstLine {
            path: self.path(),
            line: number,
        })
    }

    fn source(&mut self, number: usize, target: &str) -> Result<(), ConfigError> {
        if self.depth >= MAX_INCLUDE_DEPTH {
            return Err(ConfigError::IncludeDepth {
                path: self.path(),
                line: number,
                max: MAX_INCLUDE_DEPTH,
            });
        }

        tracing::debug!(
            from = %self.file.display(),
            line = number,
            include = target,
            "sourcing config file"
        );

        read_into(Path::new(target), self.depth + 1, self.out).map_err(|err| match err {
            depth @ ConfigError::IncludeDepth { .. } => depth,
            other => ConfigError::Include {
                path: self.path(),
                line: number,
                source: Box::new(other),
            },
        })
    }

    fn path(&self) -> PathBuf {
        self.file.to_path_buf()
    }
}
