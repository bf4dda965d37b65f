//! Naming rules for commands and options.
//!
//! Checked once at registration time so the parser never has to deal with
//! malformed definitions.
//!
//! # Examples
//!
//! ```
//! use cli_parser_core::*;
//!
//! assert!(validate_command_name("git-remote_2").is_ok());
//! assert!(validate_command_name("1234").is_err());
//!
//! assert!(validate_option(&OptionDef::new(Some('v'), Some("verbose"))).is_ok());
//! assert!(validate_option(&OptionDef::new(Some('1'), None)).is_err());
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CliError, Result};
use crate::types::OptionDef;

static COMMAND_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static regex must compile"));
static LONG_OPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_-]*$").expect("static regex must compile")
});

/// Validates a command name.
///
/// A name must be non-empty, contain at least one ASCII letter and otherwise
/// only `A-Za-z0-9`, `-` and `_`.
pub fn validate_command_name(name: &str) -> Result<()> {
    if !COMMAND_NAME_RE.is_match(name) || !name.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(CliError::InvalidName(format!(
            "'{name}' should contain at least one letter and only A-Za-z0-9_- characters"
        )));
    }
    Ok(())
}

/// Validates an option definition.
///
/// At least one of the short or long name must be set. A short name is a
/// single ASCII letter; a long name starts with a word character followed by
/// word characters or hyphens.
pub fn validate_option(option: &OptionDef) -> Result<()> {
    if option.short.is_none() && option.long.is_none() {
        return Err(CliError::InvalidOption(
            "option must define a short or long name".to_string(),
        ));
    }

    if let Some(short) = option.short {
        if !short.is_ascii_alphabetic() {
            return Err(CliError::InvalidOption(format!(
                "short option '{short}' must be a single letter"
            )));
        }
    }

    if let Some(long) = &option.long {
        if !LONG_OPTION_RE.is_match(long) {
            return Err(CliError::InvalidOption(format!(
                "long option '{long}' should start with a word character and only contain A-Za-z0-9_- characters"
            )));
        }
    }

    Ok(())
}
