//! Grammar session
//!
//! Owns the grammar checker for an application session so that its
//! initialization cost is paid once per language, not once per file.

use std::fmt;

use crate::core::ports::{GrammarChecker, GrammarError};

/// A grammar checker kept alive across analyses
pub struct GrammarSession {
    checker: Box<dyn GrammarChecker>,
}

impl fmt::Debug for GrammarSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrammarSession")
            .field("language", &self.checker.language())
            .finish()
    }
}

impl GrammarSession {
    /// Wrap a checker
    #[must_use]
    pub fn new(checker: Box<dyn GrammarChecker>) -> Self {
        Self { checker }
    }

    /// Make the checker ready for `language`
    ///
    /// Re-initializes only when the active language differs.
    pub fn prepare(&mut self, language: &str) -> Result<(), GrammarError> {
        if self.checker.language() == Some(language) {
            return Ok(());
        }
        if self.checker.language().is_some() {
            log::info!("Switching grammar checker to {language}");
            self.checker.close();
        }
        self.checker.initialize(language)
    }

    /// The underlying checker
    #[must_use]
    pub fn checker(&self) -> &dyn GrammarChecker {
        self.checker.as_ref()
    }

    /// Active language, if initialized
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.checker.language()
    }

    /// Release the checker
    pub fn close(&mut self) {
        self.checker.close();
    }
}

impl Drop for GrammarSession {
    fn drop(&mut self) {
        self.checker.close();
    }
}
