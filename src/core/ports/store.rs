//! Configuration and result store ports
//!
//! Projects and result sets are persisted as whole units: every save
//! replaces the previous content entirely.

use std::path::PathBuf;

use thiserror::Error;

use super::super::models::{Project, ProjectChange, ProjectError, ResultSet};

/// Errors raised by the stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a file failed
    #[error("i/o error on {path}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A stored file could not be decoded or encoded
    #[error("malformed data in {path}: {source}")]
    Format {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// The project operation itself was rejected
    #[error(transparent)]
    Project(#[from] ProjectError),
}

impl StoreError {
    /// Build a [`StoreError::Io`]
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a [`StoreError::Format`]
    #[must_use]
    pub fn format(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Format {
            path: path.into(),
            source,
        }
    }
}

/// Persistent collection of projects, keyed by unique name
pub trait ProjectStore: Send + Sync {
    /// All projects, sorted by name
    fn list(&self) -> Result<Vec<Project>, StoreError>;

    /// Insert a new project, rejecting a name already in use
    fn create(&self, project: Project) -> Result<(), StoreError>;

    /// Replace a stored project
    fn save(&self, project: &Project) -> Result<(), StoreError>;

    /// Rename a project, rejecting a name already in use
    fn rename(&self, old: &str, new: &str) -> Result<(), StoreError>;

    /// Delete a project, returning it
    fn delete(&self, name: &str) -> Result<Project, StoreError>;

    /// Get a project by name
    fn get(&self, name: &str) -> Result<Project, StoreError> {
        self.list()?
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ProjectError::NotFound(name.to_string()).into())
    }

    /// Project names, sorted
    fn names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.list()?.into_iter().map(|p| p.name).collect())
    }

    /// Apply one targeted change and persist it
    ///
    /// Returns whether the project was modified; an unmodified project is
    /// not written.
    fn apply(&self, name: &str, change: ProjectChange) -> Result<bool, StoreError> {
        let mut project = self.get(name)?;
        let changed = project.apply(change)?;
        if changed {
            self.save(&project)?;
        }
        Ok(changed)
    }
}

/// Persistent result sets, one per (project, file) pair
pub trait ResultStore: Send + Sync {
    /// Replace the result set of a file
    fn save(&self, project: &str, file: &str, results: &ResultSet) -> Result<(), StoreError>;

    /// Load the result set of a file; a file never analysed yields an empty set
    fn load(&self, project: &str, file: &str) -> Result<ResultSet, StoreError>;

    /// Files of a project that have stored results, sorted
    fn list_files(&self, project: &str) -> Result<Vec<String>, StoreError>;

    /// Key of the folder holding a project's results
    ///
    /// Two projects with the same key share their results folder.
    fn folder_key(&self, project: &str) -> String;

    /// Move a project's results to a new project name
    fn rename_project(&self, old: &str, new: &str) -> Result<(), StoreError>;

    /// Delete every result of a project, returning whether anything existed
    fn remove_project_results(&self, project: &str) -> Result<bool, StoreError>;

    /// Load, modify and save one result set, returning the number of removed records
    fn update(
        &self,
        project: &str,
        file: &str,
        edit: &mut dyn FnMut(&mut ResultSet) -> usize,
    ) -> Result<usize, StoreError> {
        let mut results = self.load(project, file)?;
        let removed = edit(&mut results);
        if removed > 0 {
            self.save(project, file, &results)?;
        }
        Ok(removed)
    }

    /// Delete one record by identifier
    fn delete_entry(&self, project: &str, file: &str, id: &str) -> Result<bool, StoreError> {
        let removed = self.update(project, file, &mut |r| usize::from(r.remove(id).is_some()))?;
        Ok(removed > 0)
    }

    /// Delete every record of an error type
    fn delete_by_type(&self, project: &str, file: &str, error_type: &str) -> Result<usize, StoreError> {
        self.update(project, file, &mut |r| r.remove_by_type(error_type))
    }

    /// Delete every record with an error type and token
    fn delete_by_type_and_token(
        &self,
        project: &str,
        file: &str,
        error_type: &str,
        token: &str,
    ) -> Result<usize, StoreError> {
        self.update(project, file, &mut |r| r.remove_by_type_and_token(error_type, token))
    }

    /// Delete every record with an error category and token
    fn delete_by_category_and_token(
        &self,
        project: &str,
        file: &str,
        category: &str,
        token: &str,
    ) -> Result<usize, StoreError> {
        self.update(project, file, &mut |r| r.remove_by_category_and_token(category, token))
    }
}
