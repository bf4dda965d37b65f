//! Alias-aware read view over parsed option values.
//!
//! A key given to [`OptionQuery`] may be either name of a defined option:
//! `--carrots` on the command line is visible as both `"carrots"` and `"c"`
//! when the command defines `(c, carrots)`. Keys with no definition are looked
//! up verbatim.

use std::collections::HashMap;
use std::str::FromStr;

use crate::types::OptionDef;

/// Option values recorded while classifying a line.
///
/// A key maps to `None` for a bare flag (`--verbose`) and to `Some(value)` for
/// `--key=value`.
pub type OptionValues = HashMap<String, Option<String>>;

/// Read-only view of the options of one parsed line.
///
/// # Examples
///
/// ```
/// use cli_parser_core::{OptionDef, OptionQuery, OptionValues};
///
/// let defs = vec![OptionDef::new(Some('s'), Some("strength"))];
/// let mut values = OptionValues::new();
/// values.insert("s".into(), Some("3".into()));
/// values.insert("quiet".into(), None);
///
/// let query = OptionQuery::new(&values, &defs);
/// assert_eq!(query.value("strength"), Some("3"));
/// assert!(query.has("quiet"));
/// assert_eq!(query.get("quiet"), Some(None));
/// assert!(!query.has("loud"));
/// assert_eq!(query.parse::<u8>("s"), Some(Ok(3)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OptionQuery<'a> {
    values: &'a OptionValues,
    definitions: &'a [OptionDef],
}

impl<'a> OptionQuery<'a> {
    /// Binds parsed values to a command's option definitions.
    pub fn new(values: &'a OptionValues, definitions: &'a [OptionDef]) -> Self {
        Self {
            values,
            definitions,
        }
    }

    /// Looks up an option.
    ///
    /// Returns `None` when the option was never given, `Some(None)` for a
    /// flag given without a value and `Some(Some(value))` otherwise. For a
    /// defined option the long name's value wins over the short name's.
    pub fn get(&self, key: &str) -> Option<Option<&'a str>> {
        let found = match self.definitions.iter().rfind(|d| d.matches(key)) {
            Some(def) => def
                .long
                .as_deref()
                .and_then(|long| self.lookup(long))
                .or_else(|| def.short.and_then(|short| self.lookup(&short.to_string()))),
            None => self.lookup(key),
        };
        found.map(|value| value.as_deref())
    }

    /// Returns true if the option was given, with or without a value.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the option's value, treating bare flags like absent options.
    pub fn value(&self, key: &str) -> Option<&'a str> {
        self.get(key).flatten()
    }

    /// Applies `transform` to the option's value if the option was given.
    ///
    /// `transform` is not called for absent options.
    pub fn get_with<T, F>(&self, key: &str, transform: F) -> Option<T>
    where
        F: FnOnce(Option<&'a str>) -> T,
    {
        self.get(key).map(transform)
    }

    /// Parses the option's value with [`FromStr`].
    ///
    /// Returns `None` when the option is absent or given without a value.
    pub fn parse<T: FromStr>(&self, key: &str) -> Option<Result<T, T::Err>> {
        self.value(key).map(str::parse)
    }

    /// Raw keys recorded by the parser, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.values.keys().map(String::as_str)
    }

    /// Number of distinct raw keys recorded.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no option was given.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn lookup(&self, key: &str) -> Option<&'a Option<String>> {
        self.values.get(key)
    }
}
