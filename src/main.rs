//! rawtextcheck - Proofreading for the raw text of games and localization files
//!
//! Headless driver over the rawtextcheck library: manage projects, run
//! analyses and triage their findings from the command line.

// Deny all clippy warnings in this crate
#![deny(clippy::all, clippy::pedantic, clippy::nursery, unsafe_code)]
#![warn(missing_docs, missing_debug_implementations, unused_import_braces)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

mod cli;

/// Main entry point for the rawtextcheck CLI
fn main() -> anyhow::Result<()> {
    cli::run()
}
