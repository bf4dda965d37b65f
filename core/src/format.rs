//! `{key}` template substitution.
//!
//! Used for error messages and help rows. Any keyed structure can supply the
//! substitutions: maps use their keys, sequences use their indices.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use cli_parser_core::format;
//!
//! let names = HashMap::from([("name", "John"), ("surname", "Smith")]);
//! assert_eq!(format("{name} {surname}", &names).unwrap(), "John Smith");
//! assert_eq!(format("{0} {1} {2}", &["I", "love", "Rust"]).unwrap(), "I love Rust");
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::BuildHasher;

use serde_json::Value;

use crate::error::{CliError, Result};

/// A keyed collection of substitution values.
pub trait Substitutions {
    /// Returns `(key, value)` pairs with values already stringified.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidArgument`] if the collection is not keyed.
    fn entries(&self) -> Result<Vec<(String, String)>>;
}

impl<K: Display, V: Display, S: BuildHasher> Substitutions for HashMap<K, V, S> {
    fn entries(&self) -> Result<Vec<(String, String)>> {
        Ok(self
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }
}

impl<K: Display, V: Display> Substitutions for BTreeMap<K, V> {
    fn entries(&self) -> Result<Vec<(String, String)>> {
        Ok(self
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }
}

impl<T: Display> Substitutions for [T] {
    fn entries(&self) -> Result<Vec<(String, String)>> {
        Ok(self
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v.to_string()))
            .collect())
    }
}

impl<T: Display, const N: usize> Substitutions for [T; N] {
    fn entries(&self) -> Result<Vec<(String, String)>> {
        self.as_slice().entries()
    }
}

impl<T: Display> Substitutions for Vec<T> {
    fn entries(&self) -> Result<Vec<(String, String)>> {
        self.as_slice().entries()
    }
}

impl Substitutions for serde_json::Map<String, Value> {
    fn entries(&self) -> Result<Vec<(String, String)>> {
        Ok(self
            .iter()
            .map(|(k, v)| (k.clone(), json_to_text(v)))
            .collect())
    }
}

impl Substitutions for Value {
    fn entries(&self) -> Result<Vec<(String, String)>> {
        match self {
            Value::Object(map) => map.entries(),
            Value::Array(items) => Ok(items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), json_to_text(v)))
                .collect()),
            other => Err(CliError::InvalidArgument(format!(
                "expected an object or array of substitutions, got {}",
                json_type_name(other)
            ))),
        }
    }
}

fn json_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Replaces every `{key}` in `template` with the matching substitution.
///
/// The template is scanned once from left to right. Substituted text is
/// never scanned again, so a value containing `{other}` is kept literally.
/// Tokens without a matching key are left as they are.
///
/// # Errors
///
/// Returns [`CliError::InvalidArgument`] when `substitutions` is not keyed
/// (e.g. a JSON number).
pub fn format<S>(template: &str, substitutions: &S) -> Result<String>
where
    S: Substitutions + ?Sized,
{
    let values: HashMap<String, String> = substitutions.entries()?.into_iter().collect();

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after
            .find('}')
            .and_then(|close| values.get(&after[..close]).map(|v| (close, v)));
        match value {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}
