//! Triage command

use std::path::Path;

use rawtextcheck::adapters::{JsonProjectStore, JsonResultStore};
use rawtextcheck::core::services::{self, TriageAction};
use rawtextcheck::output::{self, OutputMode};

/// Build the triage action from the mutually exclusive flags
pub fn triage_action(
    character: Option<char>,
    banword: Option<String>,
    spelling: Option<String>,
    rule: Option<String>,
) -> anyhow::Result<TriageAction> {
    match (character, banword, spelling, rule) {
        (Some(c), None, None, None) => Ok(TriageAction::AcceptCharacter(c)),
        (None, Some(word), None, None) => Ok(TriageAction::AcceptBanword(word)),
        (None, None, Some(word), None) => Ok(TriageAction::AcceptSpelling(word)),
        (None, None, None, Some(rule)) => Ok(TriageAction::IgnoreRule(rule)),
        _ => anyhow::bail!("Choose exactly one of --char, --banword, --spelling or --rule"),
    }
}

/// Accept a finding for a project and clear its occurrences in one file
pub fn triage(
    home: &Path,
    project: &str,
    file: &str,
    action: &TriageAction,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let outcome = services::triage(
        &JsonProjectStore::new(home),
        &JsonResultStore::new(home),
        project,
        file,
        action,
    )?;
    output::render_triage(&outcome, mode);
    Ok(())
}
