//! Type conversion: turning value tokens into typed field values.
//!
//! This module provides:
//! - Converter functions and chain stages ([`Converter`], [`converter`])
//! - Validating stages ([`one_value`], [`n_values`])
//! - The registry mapping field types to converter chains ([`TypeRegistry`])
//! - Built-in converters for primitives ([`builtin`]), network types
//!   ([`net`]) and text patterns ([`text`])
//!
//! # Chains
//!
//! A chain is an ordered list of converters. The first converter receives
//! the directive's value tokens as a [`Tokens`] value; each following
//! converter receives the previous one's output. The chain stops at the
//! first error, and the final output is assigned to the field.
//!
//! ```
//! use lineconf::convert::{TypeRegistry, converter, n_values};
//! use lineconf::ConvertError;
//!
//! #[derive(Debug, PartialEq)]
//! struct Range(u16, u16);
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Range>([
//!     n_values(2, 2),
//!     converter(|tokens: Vec<String>| {
//!         let bound = |s: &String| s.parse::<u16>().map_err(|e| ConvertError::invalid(s, e));
//!         Ok(Range(bound(&tokens[0])?, bound(&tokens[1])?))
//!     }),
//! ]);
//! assert!(registry.contains::<Range>());
//! ```

pub mod builtin;
pub mod net;
mod registry;
pub mod text;


use std::any::{Any, type_name};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ConvertError;

pub use registry::TypeRegistry;

/// Value passed between converters of a chain.
pub type Value = Box<dyn Any>;

/// Value tokens of a directive, the input of every chain.
pub type Tokens = Vec<String>;

/// One stage of a converter chain.
pub type Converter = Arc<dyn Fn(Value) -> Result<Value, ConvertError> + Send + Sync>;

/// Builds a converter stage from a typed function.
///
/// The stage downcasts its input to `I`; receiving anything else is a
/// [`ConvertError::UnexpectedInput`], which means the chain is assembled
/// in the wrong order.
pub fn converter<I, O, F>(f: F) -> Converter
where
    I: Any,
    O: Any,
    F: Fn(I) -> Result<O, ConvertError> + Send + Sync + 'static,
{
    Arc::new(move |value: Value| {
        let input = value
            .downcast::<I>()
            .map_err(|_| ConvertError::UnexpectedInput {
                expected: type_name::<I>(),
            })?;
        f(*input).map(|output| Box::new(output) as Value)
    })
}

/// Validates that exactly one token was given; passes the tokens through.
#[must_use]
pub fn one_value() -> Converter {
    converter(|tokens: Tokens| {
        if tokens.len() == 1 {
            Ok(tokens)
        } else {
            Err(ConvertError::ExactlyOne {
                found: tokens.len(),
            })
        }
    })
}

/// Validates the token count against inclusive bounds; passes the tokens
/// through.
///
/// A bound of `0` means unbounded on that side.
#[must_use]
pub fn n_values(min: usize, max: usize) -> Converter {
    converter(move |tokens: Tokens| {
        let found = tokens.len();
        if min > 0 && found < min {
            Err(ConvertError::TooFew { min, found })
        } else if max > 0 && found > max {
            Err(ConvertError::TooMany { max, found })
        } else {
            Ok(tokens)
        }
    })
}

/// Parses the single token with [`FromStr`].
#[must_use]
pub fn parse_str<T>() -> Converter
where
    T: FromStr + Any,
    T::Err: Display,
{
    converter(|tokens: Tokens| {
        let value = single(tokens)?;
        value
            .parse::<T>()
            .map_err(|err| ConvertError::invalid(value, err))
    })
}

/// Joins all tokens with single spaces into a `String`.
#[must_use]
pub fn join() -> Converter {
    converter(|tokens: Tokens| Ok(tokens.join(" ")))
}

/// Takes the only token out of `tokens`.
///
/// # Errors
///
/// Returns [`ConvertError::ExactlyOne`] unless there is exactly one token.
pub fn single(tokens: Tokens) -> Result<String, ConvertError> {
    match <[String; 1]>::try_from(tokens) {
        Ok([value]) => Ok(value),
        Err(rest) => Err(ConvertError::ExactlyOne { found: rest.len() }),
    }
}
