//! Tokenizing and classifying an input line.
//!
//! A line is split on whitespace; the first token names the command and the
//! rest are classified as options or positional arguments:
//!
//! | Token            | Result                                  |
//! |------------------|-----------------------------------------|
//! | `--name`         | `name` -> flag                          |
//! | `--name=value`   | `name` -> `value`                       |
//! | `-x`, `-x=value` | `x` -> flag / `value`                   |
//! | `-name`          | `name` if the command defines it        |
//! | `-abc`           | flags `a`, `b`, `c` (`=value` ignored)  |
//! | anything else    | positional argument                     |
//!
//! Bundled flags must be ASCII letters. Decoding of a bundle stops at the
//! first other character, which is reported in [`Classified::invalid`].

use tracing::debug;

use crate::query::OptionValues;
use crate::types::Command;

/// Options and arguments extracted from the tokens after the command name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    /// Option keys as written (without dashes) mapped to their values.
    pub options: OptionValues,
    /// Non-option tokens in order.
    pub args: Vec<String>,
    /// Characters that aborted a bundled-flag token, in input order.
    pub invalid: Vec<char>,
}

/// Splits a line into whitespace-separated tokens.
///
/// # Examples
///
/// ```
/// use cli_parser_core::tokenize;
///
/// assert_eq!(tokenize("  bag   --carrots \t x "), vec!["bag", "--carrots", "x"]);
/// assert!(tokenize("   ").is_empty());
/// ```
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Classifies the tokens that follow the command name.
///
/// `command` decides whether a multi-character single-dash token is one
/// option (`-carrots` when `carrots` is defined) or a bundle of short flags.
///
/// # Examples
///
/// ```
/// use cli_parser_core::*;
///
/// let mut cli = Interface::new(InterfaceConfig::default());
/// let cmd = cli.command("scream", CommandDef::new()).unwrap();
/// cmd.option(OptionDef::new(Some('s'), Some("strength"))).unwrap();
///
/// let classified = classify(cmd, &["-s=3", "--message=help", "now", "-qz9x"]);
/// assert_eq!(classified.options["s"].as_deref(), Some("3"));
/// assert_eq!(classified.options["message"].as_deref(), Some("help"));
/// assert_eq!(classified.options["q"], None);
/// assert_eq!(classified.options["z"], None);
/// assert!(!classified.options.contains_key("x"));
/// assert_eq!(classified.args, vec!["now"]);
/// assert_eq!(classified.invalid, vec!['9']);
/// ```
pub fn classify(command: &Command, tokens: &[&str]) -> Classified {
    let mut out = Classified::default();

    for &token in tokens {
        let Some(option) = token.strip_prefix('-') else {
            debug!(token, "positional");
            out.args.push(token.to_string());
            continue;
        };

        let (key, value) = match option.split_once('=') {
            Some((key, value)) => (key, Some(value.to_string())),
            None => (option, None),
        };

        if let Some(long) = key.strip_prefix('-') {
            debug!(key = long, ?value, "long option");
            out.options.insert(long.to_string(), value);
        } else if key.chars().count() <= 1 || command.find_option(key).is_some() {
            debug!(key, ?value, "short option");
            out.options.insert(key.to_string(), value);
        } else {
            decode_bundle(key, &mut out);
        }
    }

    out
}

fn decode_bundle(flags: &str, out: &mut Classified) {
    for c in flags.chars() {
        if !c.is_ascii_alphabetic() {
            debug!(bundle = flags, invalid = %c, "bundled flags aborted");
            out.invalid.push(c);
            return;
        }
        out.options.insert(c.to_string(), None);
    }
    debug!(bundle = flags, "bundled flags");
}
