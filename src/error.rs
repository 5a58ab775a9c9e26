//! Error types for reading and applying configuration files.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by custom field handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for a whole parse.
///
/// Every variant carries the file it originated from; directive and
/// structural errors also carry the physical line number in that file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An indented (continuation) line appeared before any directive.
    #[error("{} line {line}: first line can't be indented", path.display())]
    IndentedFirstLine {
        /// File containing the line
        path: PathBuf,
        /// Physical line number
        line: usize,
    },

    /// `source` directives are nested too deeply, usually an include cycle.
    #[error("{} line {line}: source directives nested deeper than {max}", path.display())]
    IncludeDepth {
        /// File containing the directive
        path: PathBuf,
        /// Physical line number of the directive
        line: usize,
        /// Maximum nesting depth
        max: usize,
    },

    /// A sourced file could not be read.
    #[error("{} line {line}: cannot source file: {source}", path.display())]
    Include {
        /// File containing the `source` directive
        path: PathBuf,
        /// Physical line number of the directive
        line: usize,
        /// Error from reading the sourced file
        #[source]
        source: Box<ConfigError>,
    },

    /// A directive could not be applied to the destination record.
    #[error("{} line {line}: error parsing {key}: {source}", path.display())]
    Directive {
        /// File containing the directive
        path: PathBuf,
        /// Physical line number of the directive
        line: usize,
        /// Key token as written in the file
        key: String,
        /// What went wrong
        #[source]
        source: FieldError,
    },
}

impl ConfigError {
    /// Returns the field-level error if this is a [`ConfigError::Directive`].
    #[must_use]
    pub const fn field_error(&self) -> Option<&FieldError> {
        match self {
            Self::Directive { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns the physical line number the error points at, if any.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::FileRead { .. } => None,
            Self::IndentedFirstLine { line, .. }
            | Self::IncludeDepth { line, .. }
            | Self::Include { line, .. }
            | Self::Directive { line, .. } => Some(*line),
        }
    }
}

/// Error applying one directive to one field.
#[derive(Debug, Error)]
pub enum FieldError {
    /// No field matches the key, in singular or plural form.
    #[error("unknown option (field {} is missing)", candidates.join(" or "))]
    UnknownOption {
        /// Field names that were tried, in order
        candidates: Vec<String>,
    },

    /// The field has no custom handler and its type has no converter chain.
    #[error("don't know how to set fields of the type {type_name}")]
    UnsupportedType {
        /// Rust type name of the field
        type_name: &'static str,
    },

    /// A custom handler rejected the values.
    #[error("{0} (from handler)")]
    Handler(#[source] HandlerError),

    /// A converter in the type's chain rejected the values.
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Error produced by a converter.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Exactly one value was required.
    #[error("must have exactly one value (has: {found})")]
    ExactlyOne {
        /// Number of values given
        found: usize,
    },

    /// Fewer values than the lower bound.
    #[error("must have at least {min} values (has: {found})")]
    TooFew {
        /// Inclusive lower bound
        min: usize,
        /// Number of values given
        found: usize,
    },

    /// More values than the upper bound.
    #[error("must have at most {max} values (has: {found})")]
    TooMany {
        /// Inclusive upper bound
        max: usize,
        /// Number of values given
        found: usize,
    },

    /// A value could not be interpreted.
    #[error("invalid value '{value}': {reason}")]
    Invalid {
        /// The offending value
        value: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A converter received the output of the previous converter but
    /// expected a different type.
    #[error("converter expected input of type {expected}")]
    UnexpectedInput {
        /// Type the converter accepts
        expected: &'static str,
    },

    /// The chain finished with a value of the wrong type for the field.
    #[error("converted value is not of the field type {expected}")]
    Mismatch {
        /// Type of the field
        expected: &'static str,
    },
}

impl ConvertError {
    /// Creates an `Invalid` error for a value.
    #[must_use]
    pub fn invalid(value: impl Into<String>, reason: impl ToString) -> Self {
        Self::Invalid {
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
