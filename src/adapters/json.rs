//! JSON file stores
//!
//! Implements `ProjectStore` with a single `projects.json` and `ResultStore`
//! with one JSON file per analysed file. Every save rewrites the whole file.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::models::{Project, ProjectError, ResultSet};
use crate::core::ports::{ProjectStore, ResultStore, StoreError};
use crate::paths;

fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(StoreError::io(path, err)),
    }
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    let content = serde_json::to_string_pretty(value).map_err(|e| StoreError::format(path, e))?;
    fs::write(path, content).map_err(|e| StoreError::io(path, e))
}

// =============================================================================
// Projects
// =============================================================================

/// Projects stored in one JSON object keyed by project name
#[derive(Debug, Clone)]
pub struct JsonProjectStore {
    path: PathBuf,
}

impl JsonProjectStore {
    /// Store backed by `projects.json` under a data directory
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            path: paths::projects_file(root),
        }
    }

    /// Store backed by an explicit file
    #[must_use]
    pub const fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, Project>, StoreError> {
        let Some(content) = read_optional(&self.path)? else {
            return Ok(BTreeMap::new());
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let mut map: BTreeMap<String, Project> =
            serde_json::from_str(&content).map_err(|e| StoreError::format(&self.path, e))?;
        for (name, project) in &mut map {
            project.name.clone_from(name);
        }
        Ok(map)
    }

    fn store(&self, map: &BTreeMap<String, Project>) -> Result<(), StoreError> {
        write_json(&self.path, map)
    }
}

impl ProjectStore for JsonProjectStore {
    fn list(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.load()?.into_values().collect())
    }

    fn get(&self, name: &str) -> Result<Project, StoreError> {
        self.load()?
            .remove(name)
            .ok_or_else(|| ProjectError::NotFound(name.to_string()).into())
    }

    fn create(&self, project: Project) -> Result<(), StoreError> {
        let mut map = self.load()?;
        if map.contains_key(&project.name) {
            return Err(ProjectError::DuplicateName(project.name).into());
        }
        log::info!("Created project {}", project.name);
        map.insert(project.name.clone(), project);
        self.store(&map)
    }

    fn save(&self, project: &Project) -> Result<(), StoreError> {
        let mut map = self.load()?;
        map.insert(project.name.clone(), project.clone());
        self.store(&map)
    }

    fn rename(&self, old: &str, new: &str) -> Result<(), StoreError> {
        let mut map = self.load()?;
        if old == new {
            return if map.contains_key(old) {
                Ok(())
            } else {
                Err(ProjectError::NotFound(old.to_string()).into())
            };
        }
        if map.contains_key(new) {
            return Err(ProjectError::DuplicateName(new.to_string()).into());
        }
        let mut project = map
            .remove(old)
            .ok_or_else(|| ProjectError::NotFound(old.to_string()))?;
        project.name = new.to_string();
        map.insert(new.to_string(), project);
        log::info!("Renamed project {old} to {new}");
        self.store(&map)
    }

    fn delete(&self, name: &str) -> Result<Project, StoreError> {
        let mut map = self.load()?;
        let project = map
            .remove(name)
            .ok_or_else(|| ProjectError::NotFound(name.to_string()))?;
        self.store(&map)?;
        log::info!("Deleted project {name}");
        Ok(project)
    }
}

// =============================================================================
// Results
// =============================================================================

/// Result sets stored as `results/<project>/<file>.json`
#[derive(Debug, Clone)]
pub struct JsonResultStore {
    root: PathBuf,
}

impl JsonResultStore {
    /// Store rooted at a data directory
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Path of the result file of one analysed file
    #[must_use]
    pub fn file_path(&self, project: &str, file: &str) -> PathBuf {
        paths::result_file(&self.root, project, file)
    }
}

impl ResultStore for JsonResultStore {
    fn save(&self, project: &str, file: &str, results: &ResultSet) -> Result<(), StoreError> {
        write_json(&self.file_path(project, file), results)
    }

    fn load(&self, project: &str, file: &str) -> Result<ResultSet, StoreError> {
        let path = self.file_path(project, file);
        match read_optional(&path)? {
            Some(content) => serde_json::from_str(&content).map_err(|e| StoreError::format(&path, e)),
            None => {
                log::warn!("No results stored for {project}/{file}");
                Ok(ResultSet::new())
            }
        }
    }

    fn list_files(&self, project: &str) -> Result<Vec<String>, StoreError> {
        let dir = paths::project_results_dir(&self.root, project);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::io(&dir, err)),
        };
        let mut files: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|e| e.to_str()) == Some(paths::RESULT_EXTENSION)
            })
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        files.sort();
        Ok(files)
    }

    fn folder_key(&self, project: &str) -> String {
        paths::sanitize_folder_name(project)
    }

    fn rename_project(&self, old: &str, new: &str) -> Result<(), StoreError> {
        let from = paths::project_results_dir(&self.root, old);
        let to = paths::project_results_dir(&self.root, new);
        if !from.is_dir() {
            return Ok(());
        }
        if !to.exists() {
            fs::create_dir_all(paths::results_dir(&self.root))
                .map_err(|e| StoreError::io(&self.root, e))?;
            return fs::rename(&from, &to).map_err(|e| StoreError::io(&from, e));
        }
        // Leftover results under the new name are overwritten file by file.
        for entry in fs::read_dir(&from).map_err(|e| StoreError::io(&from, e))? {
            let entry = entry.map_err(|e| StoreError::io(&from, e))?;
            let target = to.join(entry.file_name());
            fs::rename(entry.path(), &target).map_err(|e| StoreError::io(&target, e))?;
        }
        fs::remove_dir(&from).map_err(|e| StoreError::io(&from, e))
    }

    fn remove_project_results(&self, project: &str) -> Result<bool, StoreError> {
        let dir = paths::project_results_dir(&self.root, project);
        match fs::remove_dir_all(&dir) {
            Ok(()) => {
                log::info!("Removed results of {project}");
                Ok(true)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(StoreError::io(&dir, err)),
        }
    }
}
