//! rawtextcheck - Proofreading for the raw text of games and localization files
//!
//! Text lines are extracted from a file by a format parser, cleaned of the
//! project's ignored codes and spans, then checked for invalid characters,
//! banned words and grammar mistakes. Findings are merged into one ordered
//! result set per analysed file and persisted with the project configuration.

// Deny all clippy warnings in this crate
#![deny(clippy::all, clippy::pedantic, clippy::nursery, unsafe_code)]
#![warn(missing_docs, missing_debug_implementations, unused_import_braces)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod output;
pub mod parsers;
pub mod paths;
pub mod retry;
pub mod worker;
