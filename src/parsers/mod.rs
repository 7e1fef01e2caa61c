//! Format parsers and the parser registry
//!
//! Built-in parsers are always registered. Plugin parsers are declared by
//! TOML manifests in a plugin directory, rescanned every time a registry is
//! built. A manifest that fails to load is reported, never raised, and does
//! not prevent the others from loading.

pub mod columns;
pub mod csv_file;
pub mod excel;
pub mod google_sheet;
pub mod manifest;
pub mod po;
pub mod textfile;
pub mod xml;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use csv_file::CsvParser;
pub use excel::ExcelParser;
pub use google_sheet::GoogleSheetParser;
pub use manifest::{Manifest, ManifestParser};
pub use po::PoParser;
pub use textfile::TextFileParser;
pub use xml::XmlParser;

use crate::core::models::ParserArgument;
use crate::core::ports::{ParserCapability, ParserLookup, RegistryError, SpreadsheetAccess};

/// Who wins when a plugin has the name of a built-in parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginPrecedence {
    /// The built-in parser is kept, the plugin is reported
    #[default]
    BuiltinsWin,
    /// The plugin replaces the built-in parser
    PluginsWin,
}

impl FromStr for PluginPrecedence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "builtins_win" | "builtins" => Ok(Self::BuiltinsWin),
            "plugins_win" | "plugins" => Ok(Self::PluginsWin),
            _ => Err(format!("Unknown precedence: {s}. Use 'builtins' or 'plugins'")),
        }
    }
}

impl fmt::Display for PluginPrecedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuiltinsWin => write!(f, "builtins_win"),
            Self::PluginsWin => write!(f, "plugins_win"),
        }
    }
}

/// A plugin manifest that could not be registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginLoadFailure {
    /// Manifest file
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: String,
}

/// Where a registered parser comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserOrigin {
    /// Compiled in
    Builtin,
    /// Declared by a manifest
    Plugin,
}

struct Entry {
    parser: Arc<dyn ParserCapability>,
    origin: ParserOrigin,
}

/// Name-to-parser registry
pub struct ParserRegistry {
    parsers: BTreeMap<String, Entry>,
    failures: Vec<PluginLoadFailure>,
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("parsers", &self.parsers.keys().collect::<Vec<_>>())
            .field("failures", &self.failures.len())
            .finish()
    }
}

/// The built-in parsers
#[must_use]
pub fn builtins(spreadsheet: Option<Arc<dyn SpreadsheetAccess>>) -> Vec<Arc<dyn ParserCapability>> {
    vec![
        Arc::new(TextFileParser),
        Arc::new(CsvParser),
        Arc::new(ExcelParser),
        Arc::new(GoogleSheetParser::new(spreadsheet)),
        Arc::new(PoParser),
        Arc::new(XmlParser),
    ]
}

impl ParserRegistry {
    /// Registry holding only the built-in parsers
    #[must_use]
    pub fn new(spreadsheet: Option<Arc<dyn SpreadsheetAccess>>) -> Self {
        let parsers = builtins(spreadsheet)
            .into_iter()
            .map(|parser| {
                let entry = Entry {
                    parser,
                    origin: ParserOrigin::Builtin,
                };
                (entry.parser.name().to_string(), entry)
            })
            .collect();
        Self {
            parsers,
            failures: Vec::new(),
        }
    }

    /// Registry with built-ins plus the manifests found in `plugin_dir`
    #[must_use]
    pub fn build(
        plugin_dir: Option<&Path>,
        precedence: PluginPrecedence,
        spreadsheet: Option<Arc<dyn SpreadsheetAccess>>,
    ) -> Self {
        let mut registry = Self::new(spreadsheet);
        if let Some(dir) = plugin_dir {
            registry.load_plugins(dir, precedence);
        }
        registry
    }

    /// Scan a directory for `*.toml` manifests and register them
    pub fn load_plugins(&mut self, dir: &Path, precedence: PluginPrecedence) {
        if !dir.is_dir() {
            log::debug!("No plugin directory at {}", dir.display());
            return;
        }
        let pattern = dir.join("*.toml");
        let pattern = pattern.to_string_lossy();
        let paths = match glob::glob(&pattern) {
            Ok(paths) => paths,
            Err(err) => {
                self.fail(dir, err.to_string());
                return;
            }
        };
        let mut files: Vec<PathBuf> = paths.filter_map(Result::ok).collect();
        files.sort();
        for path in files {
            match self.load_manifest(&path, precedence) {
                Ok(name) => log::info!("Loaded parser plugin {name} from {}", path.display()),
                Err(reason) => self.fail(&path, reason),
            }
        }
    }

    fn fail(&mut self, path: &Path, reason: String) {
        log::warn!("Skipping parser plugin {}: {reason}", path.display());
        self.failures.push(PluginLoadFailure {
            path: path.to_path_buf(),
            reason,
        });
    }

    fn load_manifest(&mut self, path: &Path, precedence: PluginPrecedence) -> Result<String, String> {
        let manifest = Manifest::load(path)?;
        let base = match self.parsers.get(&manifest.base) {
            Some(entry) if entry.origin == ParserOrigin::Builtin => Arc::clone(&entry.parser),
            Some(_) => return Err(format!("base '{}' is itself a plugin", manifest.base)),
            None => return Err(format!("unknown base parser '{}'", manifest.base)),
        };
        let parser = ManifestParser::new(manifest, base);
        let name = parser.name().to_string();
        match self.parsers.get(&name).map(|e| e.origin) {
            Some(ParserOrigin::Plugin) => {
                return Err(format!("another plugin is already named '{name}'"));
            }
            Some(ParserOrigin::Builtin) if precedence == PluginPrecedence::BuiltinsWin => {
                return Err(format!("'{name}' is a built-in parser"));
            }
            Some(ParserOrigin::Builtin) => {
                log::info!("Plugin {name} replaces the built-in parser");
            }
            None => {}
        }
        self.parsers.insert(
            name.clone(),
            Entry {
                parser: Arc::new(parser),
                origin: ParserOrigin::Plugin,
            },
        );
        Ok(name)
    }

    /// Register a parser explicitly, replacing any parser of the same name
    pub fn register(&mut self, parser: Arc<dyn ParserCapability>) {
        let name = parser.name().to_string();
        self.parsers.insert(
            name,
            Entry {
                parser,
                origin: ParserOrigin::Plugin,
            },
        );
    }

    /// Argument signature of a parser
    pub fn arguments_of(&self, name: &str) -> Result<Vec<ParserArgument>, RegistryError> {
        Ok(self.resolve(name)?.arguments())
    }

    /// Origin of a registered parser
    #[must_use]
    pub fn origin(&self, name: &str) -> Option<ParserOrigin> {
        self.parsers.get(name).map(|e| e.origin)
    }

    /// Manifests that could not be registered during the last scan
    #[must_use]
    pub fn load_failures(&self) -> &[PluginLoadFailure] {
        &self.failures
    }

    /// Names of parsers that claim a resource
    #[must_use]
    pub fn parsers_for(&self, resource: &str) -> Vec<String> {
        self.parsers
            .iter()
            .filter(|(_, e)| e.parser.validate_resource(resource) == Some(true))
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl ParserLookup for ParserRegistry {
    fn resolve(&self, name: &str) -> Result<Arc<dyn ParserCapability>, RegistryError> {
        self.parsers
            .get(name)
            .map(|e| Arc::clone(&e.parser))
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    fn names(&self) -> Vec<String> {
        self.parsers.keys().cloned().collect()
    }
}
