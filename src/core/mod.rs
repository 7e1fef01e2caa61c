//! Core domain logic for rawtextcheck
//!
//! This module contains pure business logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (ParsedLine, Project, ErrorRecord, ResultSet)
//! - `services/` - Suppression, detection, aggregation and the analysis pipeline
//! - `ports/` - Trait definitions for parsers, grammar, spreadsheets and stores
pub mod models;
pub mod ports;
pub mod services;
