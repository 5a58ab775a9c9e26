//! Parsing a configuration file into a record.
//!
//! For each logical line the key is resolved to a field name, then:
//!
//! 1. a custom handler for that field, if any, is called with the values;
//! 2. otherwise the converter chain registered for the field's type runs
//!    and its result is assigned to the field;
//! 3. otherwise the directive fails with an unsupported-type error.
//!
//! The first error aborts the parse. Fields set by earlier lines keep
//! their new values.

mod handlers;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use handlers::Handlers;

use std::path::Path;

use crate::convert::TypeRegistry;
use crate::error::{ConfigError, FieldError};
use crate::names::{EnglishInflector, Inflector, resolve};
use crate::reader::{self, LogicalLine};
use crate::record::Record;

/// Parser configuration: the converter registry and naming strategy.
///
/// # Example
///
/// ```no_run
/// use lineconf::{Fields, Handlers, Parser, Record, TypeRegistry};
///
/// #[derive(Default)]
/// struct Config {
///     user: String,
/// }
///
/// impl Record for Config {
///     fn fields(&mut self) -> Fields<'_> {
///         Fields::new().field("User", &mut self.user)
///     }
/// }
///
/// let registry = TypeRegistry::with_builtins();
/// let mut config = Config::default();
/// Parser::new(&registry).parse(&mut config, "config", Handlers::new())?;
/// # Ok::<(), lineconf::ConfigError>(())
/// ```
#[derive(Clone, Copy)]
pub struct Parser<'p> {
    registry: &'p TypeRegistry,
    inflector: &'p dyn Inflector,
}

impl<'p> Parser<'p> {
    /// Creates a parser using `registry` and English name inflection.
    #[must_use]
    pub const fn new(registry: &'p TypeRegistry) -> Self {
        Self {
            registry,
            inflector: &EnglishInflector,
        }
    }

    /// Replaces the naming strategy.
    #[must_use]
    pub const fn with_inflector(mut self, inflector: &'p dyn Inflector) -> Self {
        self.inflector = inflector;
        self
    }

    /// Reads `path` and applies every directive to `record`.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered, either from reading the file
    /// (see [`reader::read_file`]) or from applying a directive, in which
    /// case the error names the file, line and key.
    pub fn parse<R: Record>(
        &self,
        record: &mut R,
        path: impl AsRef<Path>,
        handlers: Handlers<'_, R>,
    ) -> Result<(), ConfigError> {
        let lines = reader::read_file(path)?;
        self.apply_all(record, &lines, handlers)
    }

    /// Applies already-read logical lines to `record`.
    ///
    /// # Errors
    ///
    /// Returns the first directive that fails, with its file, line and key.
    pub fn apply_all<R: Record>(
        &self,
        record: &mut R,
        lines: &[LogicalLine],
        mut handlers: Handlers<'_, R>,
    ) -> Result<(), ConfigError> {
        for line in lines {
            self.apply(record, line, &mut handlers)
                .map_err(|source| ConfigError::Directive {
                    path: line.file.to_path_buf(),
                    line: line.number,
                    key: line.key().to_owned(),
                    source,
                })?;
        }

        tracing::debug!(directives = lines.len(), "applied config");
        Ok(())
    }

    fn apply<R: Record>(
        &self,
        record: &mut R,
        line: &LogicalLine,
        handlers: &mut Handlers<'_, R>,
    ) -> Result<(), FieldError> {
        let field = {
            let fields = record.fields();
            resolve(line.key(), |name| fields.contains(name), self.inflector)?
        };
        let values = line.values();

        if let Some(handler) = handlers.get_mut(&field) {
            tracing::trace!(field = %field, line = line.number, "setting field from handler");
            return handler(record, &values).map_err(FieldError::Handler);
        }

        let mut fields = record.fields();
        let binding = fields
            .get_mut(&field)
            .ok_or_else(|| FieldError::UnknownOption {
                candidates: vec![field.clone()],
            })?;

        let converted = self
            .registry
            .convert(binding.field_type_id(), values)
            .ok_or_else(|| FieldError::UnsupportedType {
                type_name: binding.field_type_name(),
            })??;

        tracing::trace!(field = %field, line = line.number, "setting field from converter");
        binding.assign(converted)?;
        Ok(())
    }
}

impl std::fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("registry", self.registry)
            .finish_non_exhaustive()
    }
}

/// Reads `path` and applies every directive to `record`.
///
/// Shorthand for [`Parser::new`] followed by [`Parser::parse`].
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn parse<R: Record>(
    record: &mut R,
    path: impl AsRef<Path>,
    registry: &TypeRegistry,
    handlers: Handlers<'_, R>,
) -> Result<(), ConfigError> {
    Parser::new(registry).parse(record, path, handlers)
}

/// Like [`parse`], but panics on error.
///
/// # Panics
///
/// Panics with the error message if parsing fails.
pub fn must_parse<R: Record>(
    record: &mut R,
    path: impl AsRef<Path>,
    registry: &TypeRegistry,
    handlers: Handlers<'_, R>,
) {
    if let Err(err) = parse(record, path, registry, handlers) {
        panic!("{err}");
    }
}
