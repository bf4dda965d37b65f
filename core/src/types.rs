//! Command and option definitions.
//!
//! This module defines the data model the registry stores and the parser
//! reads: option definitions, commands with their callback chains, the
//! registration-time [`CommandDef`] and the [`Invocation`] handed to every
//! callback.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::OptionQuery;
use crate::registry::Interface;
use crate::validate::validate_option;

/// Result type returned by command callbacks.
///
/// Any error stops the remaining callbacks of the chain and is surfaced from
/// [`Interface::parse`] as [`CliError::Callback`](crate::CliError::Callback).
pub type CallbackResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// Definition of a command option.
///
/// An option has an optional single-letter short name (`-c`) and/or an
/// optional long name (`--carrots`), plus a parameter hint and description
/// used only by the help output.
///
/// # Examples
///
/// ```
/// use cli_parser_core::OptionDef;
///
/// let opt = OptionDef::new(Some('c'), Some("carrots"))
///     .with_param("N")
///     .with_description("How many carrots");
/// assert!(opt.matches("c"));
/// assert!(opt.matches("carrots"));
/// assert!(!opt.matches("apples"));
/// assert_eq!(opt.canonical_name(), "carrots");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptionDef {
    /// Short form without the dash (e.g. `'c'`)
    pub short: Option<char>,
    /// Long form without the dashes (e.g. `"carrots"`)
    pub long: Option<String>,
    /// Parameter hint shown in help (e.g. `"FILE"`)
    #[serde(default)]
    pub param: String,
    /// Description shown in help
    #[serde(default)]
    pub description: String,
}

impl OptionDef {
    /// Creates an option definition. Empty long names are treated as absent.
    pub fn new(short: Option<char>, long: Option<&str>) -> Self {
        Self {
            short,
            long: long.filter(|l| !l.is_empty()).map(String::from),
            param: String::new(),
            description: String::new(),
        }
    }

    /// Sets the parameter hint.
    pub fn with_param(mut self, param: &str) -> Self {
        self.param = param.to_string();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Returns the long name if set, otherwise the short name.
    pub fn canonical_name(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => long.clone(),
            (None, Some(short)) => short.to_string(),
            (None, None) => String::new(),
        }
    }

    /// Checks whether `name` equals the short or the long name.
    pub fn matches(&self, name: &str) -> bool {
        self.long.as_deref() == Some(name) || self.short.is_some_and(|c| is_single_char(name, c))
    }

    fn shares_name_with(&self, other: &OptionDef) -> bool {
        (self.short.is_some() && self.short == other.short)
            || (self.long.is_some() && self.long == other.long)
    }
}

fn is_single_char(s: &str, c: char) -> bool {
    let mut chars = s.chars();
    chars.next() == Some(c) && chars.next().is_none()
}

/// A handler in a command's callback chain.
///
/// Callbacks are reference counted so the same handler can be registered on
/// several commands and later removed by identity.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(&Invocation<'_>) -> CallbackResult>);

impl Callback {
    /// Wraps a closure as a callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> CallbackResult + 'static,
    {
        Self(Rc::new(f))
    }

    /// Returns true if both values refer to the same handler.
    pub fn ptr_eq(&self, other: &Callback) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn call(&self, invocation: &Invocation<'_>) -> CallbackResult {
        (self.0)(invocation)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0))
    }
}

/// Registration-time description of a command.
///
/// Passed to [`Interface::command`]. Every field is optional; a bare
/// callback can be registered with [`CommandDef::from_callback`] or
/// [`Interface::command_fn`].
///
/// # Examples
///
/// ```
/// use cli_parser_core::*;
///
/// let def = CommandDef::new()
///     .with_description("Enter the server")
///     .with_params("[name] [passwd]")
///     .with_option(OptionDef::new(Some('r'), Some("remember")));
/// assert_eq!(def.options.len(), 1);
/// assert!(def.callback.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandDef {
    /// Short description of the command
    pub description: String,
    /// Usage line for positional parameters (e.g. `"[name] [passwd]"`)
    pub params: Option<String>,
    /// Options accepted by the command
    pub options: Vec<OptionDef>,
    /// First callback of the chain
    pub callback: Option<Callback>,
}

impl CommandDef {
    /// Creates an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a definition holding only a callback.
    pub fn from_callback<F>(f: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> CallbackResult + 'static,
    {
        Self {
            callback: Some(Callback::new(f)),
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Sets the usage line.
    pub fn with_params(mut self, params: &str) -> Self {
        self.params = Some(params.to_string());
        self
    }

    /// Adds an option.
    pub fn with_option(mut self, option: OptionDef) -> Self {
        self.options.push(option);
        self
    }

    /// Sets the callback.
    pub fn with_callback(mut self, callback: Callback) -> Self {
        self.callback = Some(callback);
        self
    }
}

/// A registered command.
///
/// Commands are owned by an [`Interface`] and obtained from
/// [`Interface::command`] or [`Interface::find_command_mut`]. The mutators
/// return `&mut Self` so they can be chained.
#[derive(Debug, Clone)]
pub struct Command {
    name: String,
    params: Vec<String>,
    description: String,
    options: Vec<OptionDef>,
    callbacks: Vec<Callback>,
}

impl Command {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            params: Vec::new(),
            description: String::new(),
            options: Vec::new(),
            callbacks: Vec::new(),
        }
    }

    /// Command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Usage lines for positional parameters.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Command description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Option definitions in insertion order.
    pub fn options(&self) -> &[OptionDef] {
        &self.options
    }

    /// Callback chain in invocation order.
    pub fn callbacks(&self) -> &[Callback] {
        &self.callbacks
    }

    /// Finds an option by short or long name.
    pub fn find_option(&self, name: &str) -> Option<&OptionDef> {
        self.options.iter().rfind(|o| o.matches(name))
    }

    /// Adds an option, replacing any existing option that shares its short or
    /// long name. The new option is appended at the end.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidOption`](crate::CliError::InvalidOption)
    /// when the definition breaks the naming rules.
    ///
    /// # Examples
    ///
    /// ```
    /// use cli_parser_core::*;
    ///
    /// let mut cli = Interface::new(InterfaceConfig::default());
    /// let cmd = cli.command("shop", CommandDef::new()).unwrap();
    /// cmd.option(OptionDef::new(Some('m'), Some("money"))).unwrap()
    ///     .option(OptionDef::new(Some('m'), Some("mode"))).unwrap();
    ///
    /// assert!(cmd.find_option("money").is_none());
    /// assert_eq!(cmd.find_option("m").unwrap().long.as_deref(), Some("mode"));
    /// ```
    pub fn option(&mut self, option: OptionDef) -> Result<&mut Self> {
        validate_option(&option)?;
        self.insert_option(option);
        Ok(self)
    }

    pub(crate) fn insert_option(&mut self, option: OptionDef) {
        self.options.retain(|existing| !existing.shares_name_with(&option));
        self.options.push(option);
    }

    /// Removes every option whose short or long name equals `name`.
    pub fn remove_option(&mut self, name: &str) -> &mut Self {
        self.options.retain(|o| !o.matches(name));
        self
    }

    /// Replaces the description.
    pub fn set_description(&mut self, desc: &str) -> &mut Self {
        self.description = desc.to_string();
        self
    }

    /// Replaces all usage lines.
    pub fn set_params(&mut self, params: Vec<String>) -> &mut Self {
        self.params = params;
        self
    }

    /// Appends a usage line.
    pub fn add_params(&mut self, params: &str) -> &mut Self {
        self.params.push(params.to_string());
        self
    }

    /// Removes every usage line equal to `params`.
    pub fn remove_params(&mut self, params: &str) -> &mut Self {
        self.params.retain(|p| p != params);
        self
    }

    /// Appends a callback to the chain.
    pub fn add_callback(&mut self, callback: Callback) -> &mut Self {
        self.callbacks.push(callback);
        self
    }

    /// Appends a closure to the chain.
    pub fn callback<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Invocation<'_>) -> CallbackResult + 'static,
    {
        self.add_callback(Callback::new(f))
    }

    /// Removes every occurrence of `callback` (by identity) from the chain.
    pub fn remove_callback(&mut self, callback: &Callback) -> &mut Self {
        self.callbacks.retain(|c| !c.ptr_eq(callback));
        self
    }

    /// Removes the most recently added callback.
    pub fn pop_callback(&mut self) -> Option<Callback> {
        self.callbacks.pop()
    }

    /// Replaces the whole chain.
    pub fn reset_callbacks(&mut self, callbacks: Vec<Callback>) -> &mut Self {
        self.callbacks = callbacks;
        self
    }
}

/// Everything a callback receives for one dispatched line.
///
/// Holds the interface (for output), the resolved command, the alias-aware
/// option view and the positional arguments that followed the command name.
pub struct Invocation<'a> {
    interface: &'a Interface,
    command: &'a Command,
    options: OptionQuery<'a>,
    args: &'a [String],
}

impl<'a> Invocation<'a> {
    pub(crate) fn new(
        interface: &'a Interface,
        command: &'a Command,
        options: OptionQuery<'a>,
        args: &'a [String],
    ) -> Self {
        Self {
            interface,
            command,
            options,
            args,
        }
    }

    /// The interface that dispatched the line.
    pub fn interface(&self) -> &'a Interface {
        self.interface
    }

    /// The resolved command.
    pub fn command(&self) -> &'a Command {
        self.command
    }

    /// Parsed options.
    pub fn options(&self) -> &OptionQuery<'a> {
        &self.options
    }

    /// Positional arguments after the command name, in order.
    pub fn args(&self) -> &'a [String] {
        self.args
    }

    /// Positional argument at `index`.
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).map(String::as_str)
    }

    /// Sends `data` to the interface's output sinks.
    pub fn emit(&self, data: &str) {
        self.interface.emit(data);
    }
}
