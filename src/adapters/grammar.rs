//! Grammar checker used when no backend is configured
//!
//! Analyses still run the character and banword detectors; the grammar
//! detector is reported as skipped.

use crate::core::ports::{GrammarChecker, GrammarError, GrammarMatch};

/// A grammar checker that is never available
#[derive(Debug, Clone, Default)]
pub struct DisabledGrammarChecker {
    reason: String,
}

impl DisabledGrammarChecker {
    /// Disabled checker explaining why
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl GrammarChecker for DisabledGrammarChecker {
    fn initialize(&mut self, _language: &str) -> Result<(), GrammarError> {
        Err(GrammarError::Unavailable(self.reason.clone()))
    }

    fn language(&self) -> Option<&str> {
        None
    }

    fn check(&self, _text: &str) -> Result<Vec<GrammarMatch>, GrammarError> {
        Err(GrammarError::NotInitialized)
    }

    fn close(&mut self) {}
}
