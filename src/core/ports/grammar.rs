//! Grammar checker port
//!
//! The external grammar and spelling engine, treated as a black box.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by a grammar checker
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// `check` was called before `initialize`
    #[error("grammar checker is not initialized")]
    NotInitialized,

    /// No grammar backend is available in this build or configuration
    #[error("grammar checker unavailable: {0}")]
    Unavailable(String),

    /// The backend failed while checking
    #[error("grammar backend error: {0}")]
    Backend(String),
}

/// One match returned by the grammar tool
///
/// `offset` and `length` count Unicode scalar values of the checked text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarMatch {
    /// Start of the match in the checked text
    pub offset: usize,
    /// Length of the match
    pub length: usize,
    /// Text covered by the match
    pub matched_text: String,
    /// Rule identifier, e.g. `MORFOLOGIK_RULE_EN_US`
    pub rule_id: String,
    /// Explanation from the tool
    pub message: String,
    /// Suggested replacements, best first
    pub replacements: Vec<String>,
    /// Category reported by the tool, e.g. `misspelling`
    pub category: String,
}

/// Grammar and spelling engine
///
/// Initialization is per language; re-initializing with another language
/// replaces the active instance.
pub trait GrammarChecker: Send + Sync {
    /// Prepare the checker for a language
    fn initialize(&mut self, language: &str) -> Result<(), GrammarError>;

    /// Language the checker is currently initialized for
    fn language(&self) -> Option<&str>;

    /// Check a text
    fn check(&self, text: &str) -> Result<Vec<GrammarMatch>, GrammarError>;

    /// Release the active instance
    fn close(&mut self);
}
