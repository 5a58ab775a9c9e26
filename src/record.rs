//! Destination records and their field-binding tables.
//!
//! A record lists its settable fields by implementing [`Record`]. Each
//! binding pairs a field name with a mutable reference to the field; the
//! field's type selects the converter chain used to set it.
//!
//! # Example
//!
//! ```
//! use lineconf::{Fields, Record};
//!
//! #[derive(Default)]
//! struct Config {
//!     user: String,
//!     port: u16,
//! }
//!
//! impl Record for Config {
//!     fn fields(&mut self) -> Fields<'_> {
//!         Fields::new()
//!             .field("User", &mut self.user)
//!             .field("Port", &mut self.port)
//!     }
//! }
//!
//! let mut config = Config::default();
//! assert!(config.fields().contains("Port"));
//! ```

use std::any::{Any, TypeId, type_name};
use std::fmt;

use crate::convert::Value;
use crate::error::ConvertError;

/// A type the parser can populate by field name.
pub trait Record {
    /// Returns bindings for every field a configuration file may set.
    fn fields(&mut self) -> Fields<'_>;
}

type Assign<'a> = Box<dyn FnMut(Value) -> Result<(), ConvertError> + 'a>;

/// One named, typed, assignable field.
pub struct Binding<'a> {
    name: &'static str,
    type_id: TypeId,
    type_name: &'static str,
    assign: Assign<'a>,
}

impl Binding<'_> {
    /// Field name as matched against resolved keys.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Identity of the field's type, used to look up converter chains.
    #[must_use]
    pub const fn field_type_id(&self) -> TypeId {
        self.type_id
    }

    /// Readable name of the field's type, for diagnostics.
    #[must_use]
    pub const fn field_type_name(&self) -> &'static str {
        self.type_name
    }

    /// Stores a converted value in the field.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Mismatch`] if `value` is not of the field's
    /// type; the field is left unchanged.
    pub fn assign(&mut self, value: Value) -> Result<(), ConvertError> {
        (self.assign)(value)
    }
}

impl fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name)
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Field-binding table built by [`Record::fields`].
#[derive(Debug, Default)]
pub struct Fields<'a> {
    bindings: Vec<Binding<'a>>,
}

impl<'a> Fields<'a> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `slot`.
    ///
    /// If `name` is bound twice, lookups use the first binding.
    #[must_use]
    pub fn field<T: Any>(mut self, name: &'static str, slot: &'a mut T) -> Self {
        let assign = move |value: Value| -> Result<(), ConvertError> {
            let Ok(value) = value.downcast::<T>() else {
                return Err(ConvertError::Mismatch {
                    expected: type_name::<T>(),
                });
            };
            *slot = *value;
            Ok(())
        };

        self.bindings.push(Binding {
            name,
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            assign: Box::new(assign),
        });
        self
    }

    /// Returns true if a field named `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.iter().any(|b| b.name == name)
    }

    /// Returns the binding for `name`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Binding<'a>> {
        self.bindings.iter_mut().find(|b| b.name == name)
    }
}
