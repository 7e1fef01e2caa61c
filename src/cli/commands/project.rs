//! Project management command - list, show, create, rename, delete, edit

use std::path::Path;

use rawtextcheck::adapters::{JsonProjectStore, JsonResultStore};
use rawtextcheck::core::models::{Project, ProjectChange, Replacement};
use rawtextcheck::core::ports::{ParserLookup, ProjectStore};
use rawtextcheck::core::services::{delete_project, rename_project};
use rawtextcheck::output::{self, OperationResult, OutputMode};

use super::session;
use crate::cli::app::{EditArgs, ProjectAction};

/// Handle project subcommands
pub fn project(home: &Path, action: ProjectAction, mode: OutputMode) -> anyhow::Result<()> {
    let projects = JsonProjectStore::new(home);
    match action {
        ProjectAction::List => {
            output::render_projects(&projects.list()?, mode);
        }
        ProjectAction::Show { name } => {
            output::render_project(&projects.get(&name)?, mode);
        }
        ProjectAction::Create {
            name,
            language,
            parser,
            args,
        } => {
            let mut project = Project::new(&name, &language, &parser)?;
            if let Some(args) = args {
                project.apply(ProjectChange::SetParserArguments(args))?;
            }
            if session::open(home).registry().resolve(&project.parser).is_err() {
                log::warn!("Parser '{}' is not registered yet", project.parser);
            }
            let name = project.name.clone();
            projects.create(project)?;
            OperationResult::ok(format!("Created project {name}")).render(mode);
        }
        ProjectAction::Rename { old, new } => {
            rename_project(&projects, &JsonResultStore::new(home), &old, &new)?;
            OperationResult::ok(format!("Renamed {old} to {}", new.trim())).render(mode);
        }
        ProjectAction::Delete { name, results } => {
            let removed = delete_project(&projects, &JsonResultStore::new(home), &name, results)?;
            let message = if removed {
                format!("Deleted project {name} and its results")
            } else {
                format!("Deleted project {name}")
            };
            OperationResult::ok(message).render(mode);
        }
        ProjectAction::Edit(args) => edit(&projects, &args, mode)?,
    }
    Ok(())
}

fn spans(values: &[String]) -> impl Iterator<Item = (String, String)> + '_ {
    values
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
}

/// Translate edit flags into targeted changes, in a fixed order
fn changes(args: &EditArgs) -> Vec<ProjectChange> {
    let target: Replacement = args.into;
    let mut changes = Vec::new();
    changes.extend(args.language.clone().map(ProjectChange::SetLanguage));
    changes.extend(args.parser.clone().map(ProjectChange::SetParser));
    changes.extend(args.args.clone().map(ProjectChange::SetParserArguments));
    changes.extend(args.add_chars.iter().cloned().map(ProjectChange::AddValidCharacters));
    changes.extend(args.remove_chars.iter().cloned().map(ProjectChange::RemoveValidCharacters));
    changes.extend(args.add_word.iter().cloned().map(ProjectChange::AddDictionaryWord));
    changes.extend(args.remove_word.iter().cloned().map(ProjectChange::RemoveDictionaryWord));
    changes.extend(args.add_banword.iter().cloned().map(ProjectChange::AddBanword));
    changes.extend(args.remove_banword.iter().cloned().map(ProjectChange::RemoveBanword));
    changes.extend(
        args.add_code
            .iter()
            .map(|code| ProjectChange::AddIgnoredCode {
                target,
                code: code.clone(),
            }),
    );
    changes.extend(
        args.remove_code
            .iter()
            .map(|code| ProjectChange::RemoveIgnoredCode {
                target,
                code: code.clone(),
            }),
    );
    changes.extend(
        spans(&args.add_span).map(|(start, end)| ProjectChange::AddIgnoredSubstring { target, start, end }),
    );
    changes.extend(
        spans(&args.remove_span)
            .map(|(start, end)| ProjectChange::RemoveIgnoredSubstring { target, start, end }),
    );
    changes.extend(args.add_rule.iter().cloned().map(ProjectChange::AddIgnoredRule));
    changes.extend(args.remove_rule.iter().cloned().map(ProjectChange::RemoveIgnoredRule));
    changes
}

fn edit(projects: &JsonProjectStore, args: &EditArgs, mode: OutputMode) -> anyhow::Result<()> {
    let changes = changes(args);
    if changes.is_empty() {
        anyhow::bail!("Nothing to change. See 'rawtextcheck project edit --help'");
    }
    let total = changes.len();
    let mut applied = 0;
    for change in changes {
        let label = change.label();
        if projects.apply(&args.name, change)? {
            applied += 1;
        } else {
            log::debug!("{label}: already in place");
        }
    }
    let message = format!("{applied} of {total} change(s) applied to {}", args.name);
    if applied > 0 {
        OperationResult::ok(message).render(mode);
    } else {
        OperationResult::unchanged(message).render(mode);
    }
    Ok(())
}
