//! Converters for text pattern types: `Regex` and `Url`.

use regex::Regex;
use url::Url;

use crate::error::ConvertError;

use super::{Tokens, TypeRegistry, converter, one_value, single};

/// Registers the `Regex` and `Url` converters.
pub fn register(registry: &mut TypeRegistry) {
    registry
        .register::<Regex>([one_value(), converter(parse_regex)])
        .register::<Url>([one_value(), converter(parse_url)]);
}

/// Compiles the single token as a regular expression.
///
/// # Errors
///
/// Returns [`ConvertError::Invalid`] if the pattern does not compile.
pub fn parse_regex(tokens: Tokens) -> Result<Regex, ConvertError> {
    let pattern = single(tokens)?;
    Regex::new(&pattern).map_err(|err| ConvertError::invalid(pattern, err))
}

/// Parses the single token as an absolute URL.
///
/// # Errors
///
/// Returns [`ConvertError::Invalid`] if the value is not a valid URL.
pub fn parse_url(tokens: Tokens) -> Result<Url, ConvertError> {
    let value = single(tokens)?;
    Url::parse(&value).map_err(|err| ConvertError::invalid(value, err))
}
