//! Business logic services
//!
//! Pure orchestration logic that operates on domain models and ports.
//! Nothing here touches the filesystem or the network directly.
//!
//! - [`suppression`] - strip ignored codes and spans from lines
//! - [`detectors`] - invalid characters, banwords, grammar
//! - [`aggregator`] - merge, order and identify findings
//! - [`pipeline`] - one analysis from resource to result set
//! - [`triage`] - accept a finding and clear its occurrences
//! - [`catalog`] - project rename and delete

pub mod aggregator;
pub mod catalog;
pub mod detectors;
pub mod grammar_session;
pub mod pipeline;
pub mod suppression;
pub mod triage;

pub use aggregator::aggregate;
pub use catalog::{ResultFolderPolicy, delete_project, rename_project};
pub use grammar_session::GrammarSession;
pub use pipeline::{Analysis, AnalysisContext, AnalysisError, AnalysisStatus, analyze, analyze_and_store};
pub use suppression::{SuppressionRules, clean};
pub use triage::{TriageAction, TriageOutcome, triage};
