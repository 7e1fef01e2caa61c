//! Parser arguments
//!
//! A parser declares the arguments it accepts as an ordered list of
//! [`ParserArgument`]. A project stores the values as a single string of
//! `key="value"` pairs, decoded into [`Arguments`] at analysis time.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `key="value"` or `key='value'`, whitespace allowed around `=`
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\w+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("attribute pattern is valid")
});

/// Errors raised when an argument is missing or has an unusable value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// A non-optional argument was not supplied
    #[error("missing required argument '{0}'")]
    Missing(String),

    /// An argument was supplied but its value is not usable
    #[error("invalid value '{value}' for argument '{name}': {reason}")]
    Invalid {
        /// Argument name
        name: String,
        /// Supplied value
        value: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl ArgumentError {
    /// Build an [`ArgumentError::Invalid`]
    #[must_use]
    pub fn invalid(name: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name: name.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// One named argument a parser accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserArgument {
    /// Argument name, e.g. `col` or `tag`
    pub name: String,
    /// Whether the parser can run without it
    pub optional: bool,
}

impl ParserArgument {
    /// A mandatory argument
    #[must_use]
    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_string(),
            optional: false,
        }
    }

    /// An optional argument
    #[must_use]
    pub fn optional(name: &str) -> Self {
        Self {
            name: name.to_string(),
            optional: true,
        }
    }
}

/// Argument values passed to one parser invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arguments(BTreeMap<String, String>);

impl Arguments {
    /// Create an empty argument map
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Decode an argument string such as `col="3" colID='A'`
    ///
    /// Anything that is not a `key="value"` pair is ignored. A key given
    /// twice keeps its last value.
    #[must_use]
    pub fn parse(encoded: &str) -> Self {
        let map = ATTRIBUTE_RE
            .captures_iter(encoded)
            .map(|caps| {
                let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
                (caps[1].to_string(), value.to_string())
            })
            .collect();
        Self(map)
    }

    /// Encode back to the project string form
    ///
    /// Values containing a double quote are wrapped in single quotes.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.0 {
            if !out.is_empty() {
                out.push(' ');
            }
            if value.contains('"') {
                let _ = write!(out, "{key}='{value}'");
            } else {
                let _ = write!(out, "{key}=\"{value}\"");
            }
        }
        out
    }

    /// Set an argument value, returning the builder for chaining
    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    /// Set an argument value
    pub fn insert(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }

    /// Get an argument value
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Get a mandatory argument value
    pub fn require(&self, name: &str) -> Result<&str, ArgumentError> {
        self.get(name).ok_or_else(|| ArgumentError::Missing(name.to_string()))
    }

    /// Whether an argument is present
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Check that every non-optional argument of a signature is present
    pub fn check_signature(&self, signature: &[ParserArgument]) -> Result<(), ArgumentError> {
        signature
            .iter()
            .filter(|arg| !arg.optional)
            .try_for_each(|arg| self.require(&arg.name).map(|_| ()))
    }

    /// Overlay `other` on top of `self`: keys present in `other` win
    #[must_use]
    pub fn merged_with(&self, other: &Self) -> Self {
        let mut map = self.0.clone();
        map.extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self(map)
    }

    /// Iterate over `(name, value)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of arguments
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no argument is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
