//! lineconf: line-oriented configuration files
//!
//! A library for reading simple `key value...` configuration files into
//! typed records.
//!
//! A file is read into logical lines ([`reader`]): comments are dropped,
//! indented lines continue the previous line and `source <path>` splices in
//! another file. Each line's key is mapped to a field name ([`names`]), and
//! its values are converted by the chain registered for the field's type
//! ([`convert`]) or passed to a custom handler ([`Handlers`]).
//!
//! # Example
//!
//! ```no_run
//! use lineconf::{Fields, Handlers, Record, TypeRegistry};
//!
//! #[derive(Default)]
//! struct Config {
//!     user: String,
//!     port: u16,
//!     records: Vec<String>,
//! }
//!
//! impl Record for Config {
//!     fn fields(&mut self) -> Fields<'_> {
//!         Fields::new()
//!             .field("User", &mut self.user)
//!             .field("Port", &mut self.port)
//!             .field("Records", &mut self.records)
//!     }
//! }
//!
//! let registry = TypeRegistry::with_builtins();
//! let mut config = Config::default();
//! lineconf::parse(
//!     &mut config,
//!     "config",
//!     &registry,
//!     Handlers::new().on("Records", |c: &mut Config, values: &[String]| {
//!         c.records.extend(values.iter().cloned());
//!         Ok::<(), std::convert::Infallible>(())
//!     }),
//! )?;
//! # Ok::<(), lineconf::ConfigError>(())
//! ```

pub mod cli;
pub mod convert;
pub mod defaults;
pub mod error;
pub mod locate;
pub mod names;
pub mod parse;
pub mod reader;
pub mod record;
pub mod updater;


pub use convert::TypeRegistry;
pub use error::{ConfigError, ConvertError, FieldError, HandlerError};
pub use locate::find_config;
pub use parse::{Handlers, Parser, must_parse, parse};
pub use reader::LogicalLine;
pub use record::{Binding, Fields, Record};
