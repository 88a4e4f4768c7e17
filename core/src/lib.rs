//! Typed command-line option declaration and parsing.
//!
//! This crate lets a program register named options and parse an argument
//! list into them:
//!
//! - [`Parser`]: registry of options keyed by short (`-x`) and long
//!   (`--name`) names, plus the dispatcher that walks the argument list.
//! - [`ValuedOption`]: collects one converted value per occurrence, with an
//!   optional default.
//! - [`FlagOption`]: counts occurrences of an option without a value.
//! - [`OptionValue`]: conversion from text, implemented for strings, paths,
//!   characters, booleans, and all primitive numbers.
//!
//! Failures are reported as [`CommandLineError`]; the crate never prints or
//! exits on its own.
//!
//! # Example
//!
//! ```
//! use command_line_core::{ErrorKind, Parser};
//!
//! let mut parser = Parser::new();
//! let input = parser.mandatory::<String>(Some('i'), "input", "File to read").unwrap();
//! let scale = parser
//!     .optional::<f64>(Some('s'), "scale", "Scale factor", Some(1.0))
//!     .unwrap();
//! let verbose = parser.flag(Some('v'), "verbose", "Chatty output").unwrap();
//!
//! parser.run(["--input=photo.png", "-s", "0.5", "-v"]).unwrap();
//!
//! assert_eq!(parser.value(input).unwrap(), "photo.png");
//! assert_eq!(parser.value(scale).unwrap(), &0.5);
//! assert!(parser.option(verbose).unwrap().is_set());
//!
//! let err = parser.run(["--bogus"]).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Malformed);
//! ```

mod config;
mod error;
mod help;
mod info;
mod option;
mod parser;
mod value;

pub use config::ParserConfig;
pub use error::{CommandLineError, ErrorKind, Result};
pub use info::OptionInfo;
pub use option::{ArgumentOption, FlagOption, ValuedOption};
pub use parser::{OptionDescriptor, OptionHandle, Parser, Requirement};
pub use value::OptionValue;
