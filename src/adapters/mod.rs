//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `json` - project list and result sets as JSON files
//! - `grammar` - the checker used when no grammar backend is configured
//! - `languagetool` - LanguageTool HTTP client (feature `languagetool`)
//! - `sheets` - Google Sheets HTTP client (feature `sheets`)

pub mod grammar;
pub mod json;
#[cfg(feature = "languagetool")]
pub mod languagetool;
#[cfg(feature = "sheets")]
pub mod sheets;

pub use grammar::DisabledGrammarChecker;
pub use json::{JsonProjectStore, JsonResultStore};
#[cfg(feature = "languagetool")]
pub use languagetool::LanguageToolChecker;
#[cfg(feature = "sheets")]
pub use sheets::GoogleSheetsClient;
