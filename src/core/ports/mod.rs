//! Port traits (interfaces) for external collaborators
//!
//! These traits define the boundaries between the analysis pipeline and
//! everything it does not own: file formats, the grammar engine, remote
//! spreadsheets and persistence.
//!
//! Implementations live in the `parsers` and `adapters` modules.

mod grammar;
mod parser;
mod spreadsheet;
mod store;

pub use grammar::{GrammarChecker, GrammarError, GrammarMatch};
pub use parser::{ParseError, ParserCapability, ParserLookup, RegistryError};
pub use spreadsheet::{
    Credentials, SpreadsheetAccess, SpreadsheetError, SpreadsheetHandle, TRANSIENT_STATUS_CODES,
    WorksheetHandle,
};
pub use store::{ProjectStore, ResultStore, StoreError};
