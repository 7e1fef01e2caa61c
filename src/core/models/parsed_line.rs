//! Parsed line model
//!
//! The unit every parser produces and every later stage consumes.

use serde::{Deserialize, Serialize};

/// One line of text extracted from a resource, with its row identifier
///
/// `row_id` is opaque: a line number, a spreadsheet row, or an identifier
/// attribute. It is never assumed to be numeric or unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLine {
    /// Row identifier used for display and for re-locating the line
    pub row_id: String,
    /// Text of the line
    pub text: String,
}

impl ParsedLine {
    /// Create a new parsed line
    #[must_use]
    pub fn new(row_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            row_id: row_id.into(),
            text: text.into(),
        }
    }
}
