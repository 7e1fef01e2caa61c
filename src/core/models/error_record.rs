//! Error record model
//!
//! Uniform shape of every finding, whichever detector produced it.

use serde::{Deserialize, Serialize};

/// `error_type` and `error_category` of invalid character findings
pub const INVALID_CHARACTER: &str = "INVALID_CHARACTER";

/// `error_type` and `error_category` of banned word findings
pub const BANWORD: &str = "BANWORD";

/// Grammar-tool category used for spelling mistakes
pub const SPELLING_CATEGORY: &str = "misspelling";

/// Explanation attached to invalid character findings
pub const INVALID_CHARACTER_EXPLANATION: &str = "Character not in the project's valid characters";

/// Explanation attached to banned word findings
pub const BANWORD_EXPLANATION: &str = "Word is in the project's banwords";

/// One finding on one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Row identifier of the line the finding belongs to
    pub row_id: String,
    /// Text of the line, after suppression
    pub line_text: String,
    /// Offending text: a character, a word, or the grammar match
    pub error_token: String,
    /// `INVALID_CHARACTER`, `BANWORD`, or a grammar rule identifier
    pub error_type: String,
    /// Routing category (`misspelling` for spelling mistakes)
    pub error_category: String,
    /// Human-readable explanation
    pub explanation: String,
    /// Suggested replacement(s), empty when none
    #[serde(default)]
    pub suggestion: String,
}

impl ErrorRecord {
    /// Invalid character finding
    #[must_use]
    pub fn invalid_character(row_id: &str, line_text: &str, character: char) -> Self {
        Self {
            row_id: row_id.to_string(),
            line_text: line_text.to_string(),
            error_token: character.to_string(),
            error_type: INVALID_CHARACTER.to_string(),
            error_category: INVALID_CHARACTER.to_string(),
            explanation: INVALID_CHARACTER_EXPLANATION.to_string(),
            suggestion: String::new(),
        }
    }

    /// Banned word finding
    #[must_use]
    pub fn banword(row_id: &str, line_text: &str, word: &str) -> Self {
        Self {
            row_id: row_id.to_string(),
            line_text: line_text.to_string(),
            error_token: word.to_string(),
            error_type: BANWORD.to_string(),
            error_category: BANWORD.to_string(),
            explanation: BANWORD_EXPLANATION.to_string(),
            suggestion: String::new(),
        }
    }

    /// Whether this is a spelling finding from the grammar tool
    #[must_use]
    pub fn is_spelling(&self) -> bool {
        self.error_category == SPELLING_CATEGORY
    }
}
