//! Error types for registration, formatting and dispatch.
//!
//! Registration problems (bad command names, malformed option definitions)
//! and wrongly shaped arguments are returned as [`CliError`] values. Parse-time
//! problems with user input are not errors in this sense: they travel through
//! the interface's output sinks instead (see
//! [`Interface::raise_error`](crate::Interface::raise_error)).

use thiserror::Error;

/// Errors returned by the command interface.
#[derive(Debug, Error)]
pub enum CliError {
    /// Command name is empty, has no letter, or contains characters other
    /// than `A-Za-z0-9_-`.
    #[error("invalid command name: {0}")]
    InvalidName(String),

    /// Option definition violates the naming rules.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// An argument had the wrong shape (e.g. a non-keyed substitution value).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No command is registered under the given name.
    #[error("command not found: {0}")]
    BadCommand(String),

    /// A callback in a command's chain failed; the rest of the chain was skipped.
    #[error("callback for command '{command}' failed: {source}")]
    Callback {
        command: String,
        #[source]
        source: Box<dyn std::error::Error>,
    },
}

/// Convenience alias for results with [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;
