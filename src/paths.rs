//! Centralized path definitions for rawtextcheck
//!
//! This module provides a single source of truth for all filesystem paths
//! used by rawtextcheck.
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.rawtextcheck/
//! ├── config.toml               # Application preferences
//! ├── projects.json             # Every project, keyed by name
//! ├── parsers/                  # Plugin parser manifests
//! │   └── subtitles.toml
//! └── results/
//!     └── <project>/            # Sanitized project name
//!         └── <file>.json       # One result set per analysed file
//! ```
//!
//! The root can be moved with the `RAWTEXTCHECK_HOME` environment variable.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const HOME_ENV: &str = "RAWTEXTCHECK_HOME";

/// Directory name under the user's home
pub const DATA_DIR: &str = ".rawtextcheck";

/// Application configuration filename
pub const CONFIG_FILE: &str = "config.toml";

/// Project list filename
pub const PROJECTS_FILE: &str = "projects.json";

/// Results subdirectory
pub const RESULTS_DIR: &str = "results";

/// Plugin manifests subdirectory
pub const PARSERS_DIR: &str = "parsers";

/// Extension of stored result sets
pub const RESULT_EXTENSION: &str = "json";

/// Longest sanitized name kept, in bytes
pub const MAX_NAME_LEN: usize = 255;

/// Stand-in for a name with nothing usable left
const PLACEHOLDER: &str = "_";

/// Characters that are not allowed in a folder or file name
const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Get the data directory.
///
/// `RAWTEXTCHECK_HOME` when set, else `~/.rawtextcheck`, else
/// `./.rawtextcheck` when no home directory is known.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::home_dir().map_or_else(|| PathBuf::from(DATA_DIR), |home| home.join(DATA_DIR))
}

/// Get path to `config.toml` under a data directory
#[must_use]
pub fn config_file(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Get path to `projects.json` under a data directory
#[must_use]
pub fn projects_file(root: &Path) -> PathBuf {
    root.join(PROJECTS_FILE)
}

/// Get the results directory under a data directory
#[must_use]
pub fn results_dir(root: &Path) -> PathBuf {
    root.join(RESULTS_DIR)
}

/// Get the plugin manifest directory under a data directory
#[must_use]
pub fn parsers_dir(root: &Path) -> PathBuf {
    root.join(PARSERS_DIR)
}

/// Get the results folder of one project
#[must_use]
pub fn project_results_dir(root: &Path, project: &str) -> PathBuf {
    results_dir(root).join(sanitize_folder_name(project))
}

/// Get the result file of one analysed file
#[must_use]
pub fn result_file(root: &Path, project: &str, file: &str) -> PathBuf {
    let stem = sanitize_name(file, MAX_NAME_LEN - RESULT_EXTENSION.len() - 1);
    project_results_dir(root, project).join(format!("{stem}.{RESULT_EXTENSION}"))
}

/// Make a name safe to use as a folder or file name.
///
/// Forbidden characters become `_`, control characters are dropped, the
/// result is trimmed and capped at [`MAX_NAME_LEN`] bytes. The output is
/// always one plain path component: a name left empty or made only of dots
/// becomes `_`.
#[must_use]
pub fn sanitize_folder_name(name: &str) -> String {
    sanitize_name(name, MAX_NAME_LEN)
}

fn sanitize_name(name: &str, max_bytes: usize) -> String {
    let replaced: String = name
        .chars()
        .filter(|c| u32::from(*c) >= 32)
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();
    let mut capped = String::new();
    for c in replaced.trim().chars() {
        if capped.len() + c.len_utf8() > max_bytes {
            break;
        }
        capped.push(c);
    }
    let capped = capped.trim_end();
    if capped.chars().all(|c| c == '.') {
        PLACEHOLDER.to_string()
    } else {
        capped.to_string()
    }
}
