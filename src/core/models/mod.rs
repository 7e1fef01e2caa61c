//! Domain models for rawtextcheck
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`ParsedLine`] - one `(row id, text)` pair produced by a parser
//! - [`Arguments`] / [`ParserArgument`] - parser invocation arguments
//! - [`Project`] - the configuration bundle of one body of text
//! - [`ErrorRecord`] - one finding on one line
//! - [`ResultSet`] - ordered findings of one analysed file

mod arguments;
mod error_record;
mod parsed_line;
mod project;
mod result_set;

pub use arguments::{ArgumentError, Arguments, ParserArgument};
pub use error_record::{
    BANWORD, BANWORD_EXPLANATION, ErrorRecord, INVALID_CHARACTER, INVALID_CHARACTER_EXPLANATION,
    SPELLING_CATEGORY,
};
pub use parsed_line::ParsedLine;
pub use project::{Project, ProjectChange, ProjectError, Replacement, SubstringRules};
pub use result_set::ResultSet;
