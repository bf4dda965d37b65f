//! The command interface: registry, output sinks, error templates and
//! dispatch.
//!
//! An [`Interface`] owns every registered [`Command`]. Text leaves the
//! interface only through its output [`Sink`]s, including the messages for
//! unknown commands and malformed bundled flags.
//!
//! # Examples
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use cli_parser_core::*;
//!
//! let mut cli = Interface::new(InterfaceConfig::default());
//! let out = Rc::new(RefCell::new(Vec::<String>::new()));
//! let sink_out = Rc::clone(&out);
//! cli.add_sink(&Sink::new(move |data| sink_out.borrow_mut().push(data.to_string())));
//!
//! cli.command_fn("greet", |inv| {
//!     let name = inv.arg(0).unwrap_or("world");
//!     let greeting = if inv.options().has("loud") { "HELLO" } else { "hello" };
//!     inv.emit(&format!("{greeting} {name}"));
//!     Ok(())
//! })
//! .unwrap()
//! .option(OptionDef::new(Some('l'), Some("loud")))
//! .unwrap();
//!
//! cli.parse("greet -l Ada").unwrap();
//! cli.parse("grete").unwrap();
//! assert_eq!(*out.borrow(), vec!["HELLO Ada", "grete: command was not found"]);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CliError, Result};
use crate::format::{Substitutions, format};
use crate::help::{self, HELP_COMMAND};
use crate::parse::{classify, tokenize};
use crate::query::OptionQuery;
use crate::types::{CallbackResult, Command, CommandDef, Invocation};
use crate::validate::validate_command_name;

/// Settings for a new [`Interface`].
///
/// # Examples
///
/// ```
/// use cli_parser_core::InterfaceConfig;
///
/// let config: InterfaceConfig = serde_json::from_str(r#"{"name": "rl-parser"}"#).unwrap();
/// assert_eq!(config.name, "rl-parser");
/// assert!(config.auto_help);
/// assert!(config.version.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceConfig {
    /// Program name shown by `help`.
    pub name: String,
    /// Program description shown by `help`.
    pub description: String,
    /// Program version shown by `help`.
    pub version: String,
    /// Give every command a `-h/--help` option that prints its usage.
    pub auto_help: bool,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            version: String::new(),
            auto_help: true,
        }
    }
}

/// A program version given as text or as numeric components.
///
/// # Examples
///
/// ```
/// use cli_parser_core::ProgramVersion;
///
/// assert_eq!(ProgramVersion::from([1, 4, 2]).as_str(), "1.4.2");
/// assert_eq!(ProgramVersion::from("2.0-beta").as_str(), "2.0-beta");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgramVersion(String);

impl ProgramVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProgramVersion {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl From<String> for ProgramVersion {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl From<&[u32]> for ProgramVersion {
    fn from(parts: &[u32]) -> Self {
        Self(
            parts
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join("."),
        )
    }
}

impl<const N: usize> From<[u32; N]> for ProgramVersion {
    fn from(parts: [u32; N]) -> Self {
        Self::from(parts.as_slice())
    }
}

impl From<Vec<u32>> for ProgramVersion {
    fn from(parts: Vec<u32>) -> Self {
        Self::from(parts.as_slice())
    }
}

/// An output function. Sinks are compared by identity, so keep a clone of
/// the value to remove it later.
#[derive(Clone)]
pub struct Sink(Rc<dyn Fn(&str)>);

impl Sink {
    /// Wraps a closure as a sink.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) + 'static,
    {
        Self(Rc::new(f))
    }

    /// Returns true if both values refer to the same function.
    pub fn ptr_eq(&self, other: &Sink) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Calls the sink.
    pub fn write(&self, data: &str) {
        (self.0)(data)
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sink({:p})", Rc::as_ptr(&self.0))
    }
}

/// Kinds of errors reported through the output sinks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A bundled flag contained a non-letter. Substitution key: `option`.
    InvalidOption,
    /// The first token named no registered command. Substitution key: `command`.
    BadCommand,
    /// Application-defined kind raised with [`Interface::raise_error`].
    Other(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidOption => f.write_str("invalidOption"),
            ErrorKind::BadCommand => f.write_str("badCommand"),
            ErrorKind::Other(name) => f.write_str(name),
        }
    }
}

/// How an error kind is reported: a `{key}` template emitted through the
/// sinks, or a handler called instead.
#[derive(Clone)]
pub enum ErrorTemplate {
    Format(String),
    Handler(Rc<dyn Fn()>),
}

impl ErrorTemplate {
    /// Wraps a closure as a handler.
    pub fn handler<F: Fn() + 'static>(f: F) -> Self {
        Self::Handler(Rc::new(f))
    }
}

impl From<&str> for ErrorTemplate {
    fn from(template: &str) -> Self {
        Self::Format(template.to_string())
    }
}

impl From<String> for ErrorTemplate {
    fn from(template: String) -> Self {
        Self::Format(template)
    }
}

impl fmt::Debug for ErrorTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(template) => f.debug_tuple("Format").field(template).finish(),
            Self::Handler(h) => write!(f, "Handler({:p})", Rc::as_ptr(h)),
        }
    }
}

/// What [`Interface::parse`] did with a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The command was found and its whole chain ran.
    Dispatched { command: String, invoked: usize },
    /// No command matched; `badCommand` was reported and nothing ran.
    UnknownCommand { name: String },
}

/// Command registry and dispatcher.
///
/// Not thread-safe: sinks and callbacks are `Rc` closures and dispatch runs
/// to completion on the caller's thread.
#[derive(Debug)]
pub struct Interface {
    name: String,
    description: String,
    version: ProgramVersion,
    auto_help: bool,
    commands: Vec<Command>,
    sinks: Vec<Sink>,
    errors: HashMap<ErrorKind, ErrorTemplate>,
}

impl Interface {
    /// Creates an interface with the built-in `help` command registered.
    pub fn new(config: InterfaceConfig) -> Self {
        let errors = HashMap::from([
            (
                ErrorKind::InvalidOption,
                ErrorTemplate::from("{option}: option invalid"),
            ),
            (
                ErrorKind::BadCommand,
                ErrorTemplate::from("{command}: command was not found"),
            ),
        ]);

        let mut interface = Self {
            name: config.name,
            description: config.description,
            version: ProgramVersion::from(config.version),
            auto_help: config.auto_help,
            commands: Vec::new(),
            sinks: Vec::new(),
            errors,
        };

        let mut help_command = Command::new(HELP_COMMAND);
        if interface.auto_help {
            help_command.insert_option(help::help_option());
        }
        help_command
            .set_description("Find information about the program")
            .add_callback(help::program_help_callback());
        interface.install(help_command);
        interface
    }

    /// Program name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Program description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Program version.
    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    /// Replaces the program name.
    pub fn set_name(&mut self, name: &str) -> &mut Self {
        self.name = name.to_string();
        self
    }

    /// Replaces the program description.
    pub fn set_description(&mut self, desc: &str) -> &mut Self {
        self.description = desc.to_string();
        self
    }

    /// Replaces the program version.
    pub fn set_version(&mut self, version: impl Into<ProgramVersion>) -> &mut Self {
        self.version = version.into();
        self
    }

    /// Registered commands in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Registers a command, replacing any command with the same name.
    ///
    /// A replaced command loses its position; the new one is appended.
    ///
    /// # Errors
    ///
    /// [`CliError::InvalidName`] for a malformed name,
    /// [`CliError::InvalidOption`] for a malformed option in `def`.
    pub fn command(&mut self, name: &str, def: CommandDef) -> Result<&mut Command> {
        validate_command_name(name)?;

        let mut command = Command::new(name);
        if self.auto_help {
            command.option(help::help_option())?;
        }
        command.set_description(&def.description);
        if let Some(params) = &def.params {
            command.add_params(params);
        }
        for option in def.options {
            command.option(option)?;
        }
        if let Some(callback) = def.callback {
            command.add_callback(callback);
        }

        debug!(command = name, "registered command");
        Ok(self.install(command))
    }

    /// Registers a command defined only by its callback.
    pub fn command_fn<F>(&mut self, name: &str, f: F) -> Result<&mut Command>
    where
        F: Fn(&Invocation<'_>) -> CallbackResult + 'static,
    {
        self.command(name, CommandDef::from_callback(f))
    }

    fn install(&mut self, mut command: Command) -> &mut Command {
        if self.auto_help {
            command.add_callback(help::usage_callback());
        }
        self.commands.retain(|c| c.name() != command.name());
        self.commands.push(command);
        let index = self.commands.len() - 1;
        &mut self.commands[index]
    }

    /// Finds a command by exact name.
    pub fn find_command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name() == name)
    }

    /// Finds a command by exact name for mutation.
    pub fn find_command_mut(&mut self, name: &str) -> Option<&mut Command> {
        self.commands.iter_mut().find(|c| c.name() == name)
    }

    /// Output sinks in call order.
    pub fn sinks(&self) -> &[Sink] {
        &self.sinks
    }

    /// Adds a sink unless the same sink is already registered.
    pub fn add_sink(&mut self, sink: &Sink) -> &mut Self {
        if !self.has_sink(sink) {
            self.sinks.push(sink.clone());
        }
        self
    }

    /// Adds several sinks, skipping ones already registered.
    pub fn add_sinks<'a>(&mut self, sinks: impl IntoIterator<Item = &'a Sink>) -> &mut Self {
        for sink in sinks {
            self.add_sink(sink);
        }
        self
    }

    /// Removes the sink. Removing an unknown sink does nothing.
    pub fn remove_sink(&mut self, sink: &Sink) -> &mut Self {
        self.sinks.retain(|s| !s.ptr_eq(sink));
        self
    }

    /// Returns true if the sink is registered.
    pub fn has_sink(&self, sink: &Sink) -> bool {
        self.sinks.iter().any(|s| s.ptr_eq(sink))
    }

    /// Calls every sink, in order, with `data`.
    pub fn emit(&self, data: &str) {
        for sink in &self.sinks {
            sink.write(data);
        }
    }

    /// Sets the template or handler for an error kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use cli_parser_core::*;
    ///
    /// let mut cli = Interface::new(InterfaceConfig::default());
    /// cli.set_error_template(ErrorKind::BadCommand, "unknown: {command}");
    /// cli.set_error_template(
    ///     ErrorKind::Other("quota".into()),
    ///     ErrorTemplate::handler(|| eprintln!("quota exceeded")),
    /// );
    /// ```
    pub fn set_error_template(
        &mut self,
        kind: ErrorKind,
        template: impl Into<ErrorTemplate>,
    ) -> &mut Self {
        self.errors.insert(kind, template.into());
        self
    }

    /// Returns the template or handler for an error kind.
    pub fn error_template(&self, kind: &ErrorKind) -> Option<&ErrorTemplate> {
        self.errors.get(kind)
    }

    /// Reports an error: calls its handler, or formats its template with
    /// `substitutions` and emits the text.
    ///
    /// # Errors
    ///
    /// [`CliError::InvalidArgument`] when `substitutions` is not keyed.
    pub fn raise_error<S>(&self, kind: &ErrorKind, substitutions: &S) -> Result<()>
    where
        S: Substitutions + ?Sized,
    {
        match self.errors.get(kind) {
            Some(ErrorTemplate::Handler(handler)) => handler(),
            Some(ErrorTemplate::Format(template)) => self.emit(&format(template, substitutions)?),
            None => warn!(%kind, "no template for error kind"),
        }
        Ok(())
    }

    /// Parses a line and dispatches it to the named command's callbacks.
    ///
    /// An unknown command reports `badCommand` and runs nothing. Invalid
    /// bundled-flag characters report `invalidOption` but do not stop the
    /// dispatch.
    ///
    /// # Errors
    ///
    /// [`CliError::Callback`] when a callback fails; later callbacks are
    /// skipped.
    pub fn parse(&self, line: &str) -> Result<ParseOutcome> {
        let tokens = tokenize(line);
        let candidate = tokens.first().copied().unwrap_or("");

        let Some(command) = self.find_command(candidate) else {
            debug!(command = candidate, "unknown command");
            self.raise_error(&ErrorKind::BadCommand, &HashMap::from([("command", candidate)]))?;
            return Ok(ParseOutcome::UnknownCommand {
                name: candidate.to_string(),
            });
        };

        let classified = classify(command, tokens.get(1..).unwrap_or_default());
        for c in &classified.invalid {
            self.raise_error(&ErrorKind::InvalidOption, &HashMap::from([("option", c)]))?;
        }

        let query = OptionQuery::new(&classified.options, command.options());
        let invocation = Invocation::new(self, command, query, &classified.args);

        let mut invoked = 0;
        for callback in command.callbacks() {
            callback
                .call(&invocation)
                .map_err(|source| CliError::Callback {
                    command: command.name().to_string(),
                    source,
                })?;
            invoked += 1;
        }

        debug!(command = command.name(), invoked, "dispatched");
        Ok(ParseOutcome::Dispatched {
            command: command.name().to_string(),
            invoked,
        })
    }
}
