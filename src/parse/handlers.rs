//! Custom per-field handlers.

use std::collections::HashMap;
use std::fmt;

use crate::error::HandlerError;

type HandlerFn<'h, R> = Box<dyn FnMut(&mut R, &[String]) -> Result<(), HandlerError> + 'h>;

/// Custom code to run for specific fields, keyed by field name.
///
/// A handler receives the record and the directive's value tokens and sets
/// whatever it needs on the record itself. Fields with a handler never go
/// through the type registry.
///
/// # Example
///
/// ```
/// use lineconf::Handlers;
///
/// struct Config {
///     records: Vec<String>,
/// }
///
/// let handlers = Handlers::new().on("Records", |config: &mut Config, values: &[String]| {
///     config.records.extend(values.iter().map(|v| v.trim_end_matches('.').to_owned()));
///     Ok::<(), std::convert::Infallible>(())
/// });
/// assert!(handlers.contains("Records"));
/// ```
pub struct Handlers<'h, R> {
    map: HashMap<String, HandlerFn<'h, R>>,
}

impl<'h, R> Handlers<'h, R> {
    /// Creates an empty handler table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Adds a handler for `field`, replacing any existing one.
    #[must_use]
    pub fn on<F, E>(mut self, field: impl Into<String>, handler: F) -> Self
    where
        F: FnMut(&mut R, &[String]) -> Result<(), E> + 'h,
        E: Into<HandlerError>,
    {
        self.insert(field, handler);
        self
    }

    /// Adds a handler for `field`, replacing any existing one.
    pub fn insert<F, E>(&mut self, field: impl Into<String>, mut handler: F)
    where
        F: FnMut(&mut R, &[String]) -> Result<(), E> + 'h,
        E: Into<HandlerError>,
    {
        let boxed: HandlerFn<'h, R> = Box::new(move |record: &mut R, values: &[String]| {
            handler(record, values).map_err(Into::into)
        });
        self.map.insert(field.into(), boxed);
    }

    /// Returns true if a handler is registered for `field`.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.map.contains_key(field)
    }

    pub(super) fn get_mut(&mut self, field: &str) -> Option<&mut HandlerFn<'h, R>> {
        self.map.get_mut(field)
    }
}

impl<R> Default for Handlers<'_, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for Handlers<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<_> = self.map.keys().collect();
        fields.sort_unstable();
        f.debug_struct("Handlers").field("fields", &fields).finish()
    }
}
