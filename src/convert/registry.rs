//! Registry of converter chains keyed by field type.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ConvertError;

use super::{Converter, Tokens, Value, builtin, one_value, parse_str};

/// Converter chains for one field type.
struct Chain {
    type_name: &'static str,
    converters: Vec<Converter>,
}

/// Maps field types to the converter chains that produce them.
///
/// Build one registry before parsing and pass it by reference to every
/// parse; registration is not expected while a parse is running.
///
/// # Example
///
/// ```
/// use std::net::IpAddr;
/// use lineconf::convert::{TypeRegistry, net};
///
/// let mut registry = TypeRegistry::with_builtins();
/// net::register(&mut registry);
///
/// assert!(registry.contains::<String>());
/// assert!(registry.contains::<IpAddr>());
/// ```
#[derive(Default)]
pub struct TypeRegistry {
    chains: HashMap<TypeId, Chain>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the [`builtin`] converters registered.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::register(&mut registry);
        registry
    }

    /// Sets the converter chain for fields of type `T`.
    ///
    /// Replaces any chain previously registered for `T`. The chain's final
    /// output must be a `T`.
    pub fn register<T: Any>(
        &mut self,
        converters: impl IntoIterator<Item = Converter>,
    ) -> &mut Self {
        let chain = Chain {
            type_name: type_name::<T>(),
            converters: converters.into_iter().collect(),
        };
        if self.chains.insert(TypeId::of::<T>(), chain).is_some() {
            tracing::debug!(ty = type_name::<T>(), "replaced converter chain");
        }
        self
    }

    /// Registers `T` as a single value parsed with [`FromStr`].
    pub fn register_from_str<T>(&mut self) -> &mut Self
    where
        T: FromStr + Any,
        T::Err: fmt::Display,
    {
        self.register::<T>([one_value(), parse_str::<T>()])
    }

    /// Returns true if a chain is registered for `T`.
    #[must_use]
    pub fn contains<T: Any>(&self) -> bool {
        self.chains.contains_key(&TypeId::of::<T>())
    }

    /// Runs the chain registered for `type_id` over `tokens`.
    ///
    /// Returns `None` if no chain is registered for the type.
    #[must_use]
    pub fn convert(&self, type_id: TypeId, tokens: Tokens) -> Option<Result<Value, ConvertError>> {
        let chain = self.chains.get(&type_id)?;
        tracing::trace!(
            ty = chain.type_name,
            stages = chain.converters.len(),
            "running converter chain"
        );

        let start: Value = Box::new(tokens);
        Some(
            chain
                .converters
                .iter()
                .try_fold(start, |value, stage| stage(value)),
        )
    }

    /// Converts `tokens` straight into a `T`.
    ///
    /// Returns `None` if no chain is registered for `T`.
    #[must_use]
    pub fn convert_to<T: Any>(&self, tokens: Tokens) -> Option<Result<T, ConvertError>> {
        let result = self.convert(TypeId::of::<T>(), tokens)?;
        Some(result.and_then(|value| {
            value
                .downcast::<T>()
                .map(|boxed| *boxed)
                .map_err(|_| ConvertError::Mismatch {
                    expected: type_name::<T>(),
                })
        }))
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.chains.values().map(|c| c.type_name).collect();
        types.sort_unstable();
        f.debug_struct("TypeRegistry")
            .field("types", &types)
            .finish()
    }
}
