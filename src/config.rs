//! Application configuration
//!
//! Stored as TOML at `<data dir>/config.toml`. A missing or unreadable file
//! yields the defaults; saving always writes the whole file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::parsers::PluginPrecedence;
use crate::paths;
use crate::retry::{DEFAULT_DELAY, DEFAULT_MAX_ATTEMPTS, RetryPolicy};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Interface preferences
    #[serde(default)]
    pub ui: UiConfig,
    /// Parser registry settings
    #[serde(default)]
    pub parsers: ParsersConfig,
    /// Grammar backend settings
    #[serde(default)]
    pub grammar: GrammarConfig,
    /// Remote spreadsheet settings
    #[serde(default)]
    pub sheets: SheetsConfig,
}

/// Interface preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Interface language
    #[serde(default = "default_language")]
    pub language: String,
    /// Theme preference
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Result columns hidden by the user
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hidden_columns: Vec<String>,
    /// Project selected last time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_project: Option<String>,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            theme: default_theme(),
            hidden_columns: Vec::new(),
            last_project: None,
        }
    }
}

/// Parser registry settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsersConfig {
    /// Plugin directory, `<data dir>/parsers` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_dir: Option<PathBuf>,
    /// Resolution of plugin and built-in name collisions
    #[serde(default)]
    pub precedence: PluginPrecedence,
}

/// Grammar backend settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarConfig {
    /// LanguageTool server; grammar checking is disabled when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
}

/// Remote spreadsheet settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// JSON file holding the credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_file: Option<PathBuf>,
    /// Attempts before a transient failure is given up on
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Seconds between attempts
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
}

const fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

const fn default_delay_secs() -> u64 {
    DEFAULT_DELAY.as_secs()
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            credentials_file: None,
            max_attempts: default_max_attempts(),
            delay_secs: default_delay_secs(),
        }
    }
}

impl SheetsConfig {
    /// Retry policy for remote calls
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_secs(self.delay_secs))
    }
}

impl AppConfig {
    /// Load config from the default data directory
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&paths::data_dir())
    }

    /// Load config from a data directory, or defaults if absent or invalid
    #[must_use]
    pub fn load_from(root: &Path) -> Self {
        let path = paths::config_file(root);
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(&path).map(|content| toml::from_str(&content)) {
            Ok(Ok(config)) => config,
            Ok(Err(err)) => {
                log::warn!("Ignoring invalid config {}: {err}", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("Cannot read config {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Save config to a data directory
    pub fn save_to(&self, root: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(root)?;
        let content = toml::to_string_pretty(self)?;
        fs::write(paths::config_file(root), content)?;
        Ok(())
    }

    /// Plugin directory in effect
    #[must_use]
    pub fn plugin_dir(&self, root: &Path) -> PathBuf {
        self.parsers
            .plugin_dir
            .clone()
            .unwrap_or_else(|| paths::parsers_dir(root))
    }
}
