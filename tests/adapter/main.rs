//! Adapter tests
//!
//! Tests for I/O adapter implementations:
//! - JSON project store
//! - JSON result store

mod json_store_test;
