//! Parser capability port
//!
//! Defines the interface every format parser implements, built-in or plugin.

use std::sync::Arc;

use thiserror::Error;

use super::super::models::{ArgumentError, Arguments, ParsedLine, ParserArgument};

/// Errors a parser can return
///
/// Per-row problems are never errors: parsers skip the row and continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Arguments are missing or unusable (configuration level)
    #[error(transparent)]
    Config(#[from] ArgumentError),

    /// The resource could not be read or is malformed (resource level)
    #[error("cannot read '{resource}': {reason}")]
    Resource {
        /// Path, URL or identifier of the resource
        resource: String,
        /// Cause, for logging and status display
        reason: String,
    },
}

impl ParseError {
    /// Build a [`ParseError::Resource`]
    #[must_use]
    pub fn resource(resource: &str, reason: impl ToString) -> Self {
        Self::Resource {
            resource: resource.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error comes from configuration rather than the resource
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Errors raised when resolving a parser by name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No parser is registered under this name
    #[error("unknown parser '{0}'")]
    NotFound(String),
}

/// A unit converting one resource format into an ordered line sequence
pub trait ParserCapability: Send + Sync {
    /// Registry name, e.g. `csv`
    fn name(&self) -> &str;

    /// Ordered argument signature
    fn arguments(&self) -> Vec<ParserArgument>;

    /// Extract `(row id, text)` pairs from a resource
    fn parse(&self, resource: &str, arguments: &Arguments) -> Result<Vec<ParsedLine>, ParseError>;

    /// Whether the resource looks like something this parser reads
    ///
    /// `None` means the parser does not provide this capability, which is
    /// not the same as `Some(false)`.
    fn validate_resource(&self, _resource: &str) -> Option<bool> {
        None
    }

    /// Human-readable name of the resource
    ///
    /// `None` means the parser does not provide this capability.
    fn display_name(&self, _resource: &str) -> Option<String> {
        None
    }
}

/// Name-based access to parser capabilities
pub trait ParserLookup: Send + Sync {
    /// Resolve a parser by name
    fn resolve(&self, name: &str) -> Result<Arc<dyn ParserCapability>, RegistryError>;

    /// Registered parser names, sorted
    fn names(&self) -> Vec<String>;
}
