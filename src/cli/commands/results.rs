//! Results command - list, show, delete

use std::path::Path;

use rawtextcheck::adapters::JsonResultStore;
use rawtextcheck::core::ports::ResultStore;
use rawtextcheck::output::{self, OperationResult, OutputMode, ResultsView};

use crate::cli::app::ResultsAction;

/// Handle results subcommands
pub fn results(home: &Path, action: ResultsAction, mode: OutputMode) -> anyhow::Result<()> {
    let store = JsonResultStore::new(home);
    match action {
        ResultsAction::List { project } => {
            output::render_files(&project, &store.list_files(&project)?, mode);
        }
        ResultsAction::Show { project, file } => {
            let results = store.load(&project, &file)?;
            ResultsView {
                project: &project,
                file: &file,
                results: &results,
            }
            .render(mode);
        }
        ResultsAction::Delete {
            project,
            file,
            id,
            error_type,
            category,
            token,
        } => {
            let removed = match (id, error_type, category, token) {
                (Some(id), ..) => usize::from(store.delete_entry(&project, &file, &id)?),
                (None, Some(error_type), None, Some(token)) => {
                    store.delete_by_type_and_token(&project, &file, &error_type, &token)?
                }
                (None, Some(error_type), None, None) => store.delete_by_type(&project, &file, &error_type)?,
                (None, None, Some(category), Some(token)) => {
                    store.delete_by_category_and_token(&project, &file, &category, &token)?
                }
                _ => anyhow::bail!("Choose one of --id, --type or --category with --token"),
            };
            let message = format!("Deleted {removed} finding(s) from {project}/{file}");
            if removed > 0 {
                OperationResult::ok(message).render(mode);
            } else {
                OperationResult::unchanged(message).render(mode);
            }
        }
    }
    Ok(())
}
