//! Converters for primitive field types.
//!
//! | Type | Chain |
//! |------|-------|
//! | `String`, `PathBuf` | all tokens joined with a single space |
//! | `bool` | one value; `true`/`yes`/`on`/`enable`/`enabled`/`1` or the opposites |
//! | integers, floats | one value, parsed with `FromStr` |
//! | `Vec<String>` | tokens as given |

use std::path::PathBuf;

use crate::error::ConvertError;

use super::{Tokens, TypeRegistry, converter, join, one_value, single};

/// Words accepted as `true`.
const TRUE_WORDS: [&str; 6] = ["true", "yes", "on", "enable", "enabled", "1"];

/// Words accepted as `false`.
const FALSE_WORDS: [&str; 6] = ["false", "no", "off", "disable", "disabled", "0"];

/// Registers the primitive converters.
pub fn register(registry: &mut TypeRegistry) {
    registry
        .register::<String>([join()])
        .register::<PathBuf>([join(), converter(|path: String| Ok(PathBuf::from(path)))])
        .register::<bool>([one_value(), converter(parse_bool)])
        .register::<Tokens>([converter(Ok::<Tokens, ConvertError>)]);

    registry
        .register_from_str::<i8>()
        .register_from_str::<i16>()
        .register_from_str::<i32>()
        .register_from_str::<i64>()
        .register_from_str::<i128>()
        .register_from_str::<isize>()
        .register_from_str::<u8>()
        .register_from_str::<u16>()
        .register_from_str::<u32>()
        .register_from_str::<u64>()
        .register_from_str::<u128>()
        .register_from_str::<usize>()
        .register_from_str::<f32>()
        .register_from_str::<f64>();
}

/// Parses a boolean word, case-insensitively.
///
/// # Errors
///
/// Returns [`ConvertError::Invalid`] for words outside the accepted sets,
/// or [`ConvertError::ExactlyOne`] for any count other than one token.
pub fn parse_bool(tokens: Tokens) -> Result<bool, ConvertError> {
    let value = single(tokens)?;
    let lower = value.to_lowercase();

    if TRUE_WORDS.contains(&lower.as_str()) {
        Ok(true)
    } else if FALSE_WORDS.contains(&lower.as_str()) {
        Ok(false)
    } else {
        Err(ConvertError::invalid(
            value,
            "expected yes/no, true/false, on/off or 1/0",
        ))
    }
}
