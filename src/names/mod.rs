//! Name resolution: mapping key tokens onto record field names.
//!
//! A key such as `key-file` is camel-cased to `KeyFile`, common acronyms
//! are upper-cased (`get-ip` → `GetIP`), and if the record has no field by
//! that name the plural and then the singular form are tried.
//!
//! Inflection is pluggable through [`Inflector`]; [`EnglishInflector`] is
//! the default.

mod english;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use english::{ACRONYMS, EnglishInflector};

use heck::ToUpperCamelCase;

use crate::error::FieldError;

/// Inflection strategy used by [`resolve`].
pub trait Inflector {
    /// Returns the plural form of a camel-case name.
    fn pluralize(&self, name: &str) -> String;

    /// Returns the singular form of a camel-case name.
    fn singularize(&self, name: &str) -> String;

    /// Upper-cases acronyms embedded in a camel-case name.
    fn normalize_acronyms(&self, name: &str) -> String;
}

/// Camel-cases a key: `key-file`, `key_file` and `key file` become `KeyFile`.
///
/// Words are split on any non-alphanumeric character and on case changes;
/// each word is capitalized and the rest lower-cased.
#[must_use]
pub fn camelize(key: &str) -> String {
    key.to_upper_camel_case()
}

/// Converts a key to the field name it most directly maps to.
#[must_use]
pub fn field_name(key: &str, inflector: &dyn Inflector) -> String {
    inflector.normalize_acronyms(&camelize(key))
}

/// Resolves `key` to a field name accepted by `has_field`.
///
/// Tries the direct name, then its plural, then its singular. The returned
/// name is the candidate that matched.
///
/// # Errors
///
/// Returns [`FieldError::UnknownOption`] listing the candidates tried when
/// none of them is a field.
pub fn resolve(
    key: &str,
    has_field: impl Fn(&str) -> bool,
    inflector: &dyn Inflector,
) -> Result<String, FieldError> {
    let name = field_name(key, inflector);
    if has_field(&name) {
        return Ok(name);
    }

    let plural = inflector.pluralize(&name);
    if has_field(&plural) {
        return Ok(plural);
    }

    let singular = inflector.singularize(&name);
    if has_field(&singular) {
        return Ok(singular);
    }

    let mut candidates = vec![name];
    for candidate in [plural, singular] {
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }

    Err(FieldError::UnknownOption { candidates })
}
