//! Project lifecycle
//!
//! Rename and delete touch both the project store and the result store, and
//! must never damage another project's results.

use std::fmt;
use std::str::FromStr;

use crate::core::models::ProjectError;
use crate::core::ports::{ProjectStore, ResultStore, StoreError};

/// What happens to a project's results folder when the project is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultFolderPolicy {
    /// Leave results on disk
    #[default]
    Keep,
    /// Delete the results folder
    Remove,
}

impl FromStr for ResultFolderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "remove" | "delete" => Ok(Self::Remove),
            _ => Err(format!("Unknown result policy: {s}. Use 'keep' or 'remove'")),
        }
    }
}

impl fmt::Display for ResultFolderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep => write!(f, "keep"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// Rename a project and move its results with it
///
/// Results stay where they are when the new name maps to the same folder.
pub fn rename_project(
    projects: &dyn ProjectStore,
    results: &dyn ResultStore,
    old: &str,
    new: &str,
) -> Result<(), StoreError> {
    let new = new.trim();
    if new.is_empty() {
        return Err(ProjectError::EmptyField("name").into());
    }
    projects.rename(old, new)?;
    if results.folder_key(old) != results.folder_key(new) {
        results.rename_project(old, new)?;
    }
    Ok(())
}

/// Delete a project, handling its results folder according to `policy`
///
/// [`ResultFolderPolicy::Remove`] is refused, before anything is deleted,
/// when another project's results live in the same folder.
pub fn delete_project(
    projects: &dyn ProjectStore,
    results: &dyn ResultStore,
    name: &str,
    policy: ResultFolderPolicy,
) -> Result<bool, StoreError> {
    projects.get(name)?;
    if policy == ResultFolderPolicy::Remove {
        let key = results.folder_key(name);
        if let Some(other) = projects
            .names()?
            .into_iter()
            .find(|other| other != name && results.folder_key(other) == key)
        {
            return Err(ProjectError::SharedResultFolder {
                project: name.to_string(),
                other,
            }
            .into());
        }
    }
    projects.delete(name)?;
    match policy {
        ResultFolderPolicy::Keep => Ok(false),
        ResultFolderPolicy::Remove => results.remove_project_results(name),
    }
}
