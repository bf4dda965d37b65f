//! Command registry, option parser and dispatcher for line-oriented command
//! interfaces.
//!
//! An [`Interface`] holds named commands, each with option definitions and an
//! ordered chain of callbacks. [`Interface::parse`] takes one raw input line,
//! resolves the command named by its first token, classifies the remaining
//! tokens into options and positional arguments, and runs the command's
//! callbacks with an alias-aware [`OptionQuery`].
//!
//! - [`Interface`]: registry, output [`Sink`]s, error templates, dispatch.
//! - [`Command`] / [`OptionDef`] / [`CommandDef`]: the command model.
//! - [`classify`] / [`tokenize`]: the option grammar (`--long[=v]`,
//!   `-s[=v]`, bundled `-abc`).
//! - [`format`]: `{key}` templates; [`table`]: column layout for help.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use cli_parser_core::*;
//!
//! let mut cli = Interface::new(InterfaceConfig::default());
//! let strength = Rc::new(Cell::new(0u32));
//! let seen = Rc::clone(&strength);
//!
//! cli.command_fn("scream", move |inv| {
//!     if let Some(level) = inv.options().parse::<u32>("strength") {
//!         seen.set(level?);
//!     }
//!     Ok(())
//! })
//! .unwrap()
//! .option(OptionDef::new(Some('s'), Some("strength")))
//! .unwrap();
//!
//! let outcome = cli.parse("scream -s=3 --message=help").unwrap();
//! assert_eq!(strength.get(), 3);
//! assert!(matches!(outcome, ParseOutcome::Dispatched { .. }));
//! ```

mod error;
mod format;
mod help;
mod parse;
mod query;
mod registry;
mod table;
mod types;
mod validate;

pub use error::{CliError, Result};
pub use format::{Substitutions, format};
pub use help::{command_usage, program_help};
pub use parse::{Classified, classify, tokenize};
pub use query::{OptionQuery, OptionValues};
pub use registry::{
    ErrorKind, ErrorTemplate, Interface, InterfaceConfig, ParseOutcome, ProgramVersion, Sink,
};
pub use table::{TableConfig, table};
pub use types::{Callback, CallbackResult, Command, CommandDef, Invocation, OptionDef};
pub use validate::{validate_command_name, validate_option};

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
