//! Command implementations

mod analyze;
mod parsers;
mod project;
mod results;
mod session;
mod triage;

pub use analyze::analyze;
pub use parsers::parsers;
pub use project::project;
pub use results::results;
pub use triage::{triage, triage_action};
