//! Triage
//!
//! What happens when a user accepts a finding: the project configuration is
//! updated so the finding never comes back, then every matching record is
//! cleared from the file's results.

use serde::Serialize;

use crate::core::models::{BANWORD, INVALID_CHARACTER, ProjectChange, SPELLING_CATEGORY};
use crate::core::ports::{ProjectStore, ResultStore, StoreError};

/// A user decision on a finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageAction {
    /// Accept a character as valid
    AcceptCharacter(char),
    /// Stop banning a word
    AcceptBanword(String),
    /// Add a word to the dictionary
    AcceptSpelling(String),
    /// Ignore a grammar rule
    IgnoreRule(String),
}

/// Outcome of a triage action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TriageOutcome {
    /// Whether the project configuration changed
    pub project_changed: bool,
    /// Records removed from the file's results
    pub records_removed: usize,
}

/// Apply a triage action to a project and one of its result files
pub fn triage(
    projects: &dyn ProjectStore,
    results: &dyn ResultStore,
    project: &str,
    file: &str,
    action: &TriageAction,
) -> Result<TriageOutcome, StoreError> {
    let (project_changed, records_removed) = match action {
        TriageAction::AcceptCharacter(c) => {
            let token = c.to_string();
            let changed = projects.apply(project, ProjectChange::AddValidCharacters(token.clone()))?;
            let removed = results.delete_by_type_and_token(project, file, INVALID_CHARACTER, &token)?;
            (changed, removed)
        }
        TriageAction::AcceptBanword(word) => {
            let changed = projects.apply(project, ProjectChange::RemoveBanword(word.clone()))?;
            let removed = results.delete_by_type_and_token(project, file, BANWORD, word)?;
            (changed, removed)
        }
        TriageAction::AcceptSpelling(word) => {
            let changed = projects.apply(project, ProjectChange::AddDictionaryWord(word.clone()))?;
            let removed = results.delete_by_category_and_token(project, file, SPELLING_CATEGORY, word)?;
            (changed, removed)
        }
        TriageAction::IgnoreRule(rule) => {
            let changed = projects.apply(project, ProjectChange::AddIgnoredRule(rule.clone()))?;
            let removed = results.delete_by_type(project, file, rule)?;
            (changed, removed)
        }
    };
    log::info!("Triage on {project}/{file}: {records_removed} records cleared");
    Ok(TriageOutcome {
        project_changed,
        records_removed,
    })
}
