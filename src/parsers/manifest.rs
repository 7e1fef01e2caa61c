//! Plugin parser manifests
//!
//! A plugin is a TOML file in the plugin directory that derives a new parser
//! from a built-in one:
//!
//! ```toml
//! name = "subtitles"
//! base = "textfile"
//! display = "Subtitles {stem}"
//! extensions = ["srt"]
//!
//! [defaults]
//! notContains = "-->"
//! ```
//!
//! `defaults` are merged under the arguments of each call. `extensions`
//! provides resource validation; `display` provides a display name, where
//! `{name}` is the file name and `{stem}` the file name without extension.
//! Loading a manifest never executes code.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::core::models::{Arguments, ParsedLine, ParserArgument};
use crate::core::ports::{ParseError, ParserCapability};

/// Manifest file content
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Registry name of the plugin
    pub name: String,
    /// Built-in parser doing the actual parsing
    pub base: String,
    /// Display name template
    #[serde(default)]
    pub display: Option<String>,
    /// Accepted file extensions, without the dot
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Default argument values
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
}

impl Manifest {
    /// Read and decode a manifest file
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let manifest: Self = toml::from_str(&content).map_err(|e| e.to_string())?;
        if manifest.name.trim().is_empty() {
            return Err("manifest name is empty".to_string());
        }
        Ok(manifest)
    }
}

/// Parser defined by a manifest
pub struct ManifestParser {
    name: String,
    base: Arc<dyn ParserCapability>,
    display: Option<String>,
    extensions: Vec<String>,
    defaults: Arguments,
}

impl std::fmt::Debug for ManifestParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestParser")
            .field("name", &self.name)
            .field("base", &self.base.name())
            .field("extensions", &self.extensions)
            .finish_non_exhaustive()
    }
}

impl ManifestParser {
    /// Bind a manifest to its base parser
    #[must_use]
    pub fn new(manifest: Manifest, base: Arc<dyn ParserCapability>) -> Self {
        let mut defaults = Arguments::new();
        for (key, value) in &manifest.defaults {
            defaults.insert(key, value);
        }
        Self {
            name: manifest.name.trim().to_string(),
            base,
            display: manifest.display.filter(|d| !d.trim().is_empty()),
            extensions: manifest
                .extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            defaults,
        }
    }

    /// Name of the parser this plugin builds on
    #[must_use]
    pub fn base_name(&self) -> &str {
        self.base.name()
    }
}

impl ParserCapability for ManifestParser {
    fn name(&self) -> &str {
        &self.name
    }

    fn arguments(&self) -> Vec<ParserArgument> {
        self.base
            .arguments()
            .into_iter()
            .map(|arg| {
                if self.defaults.contains(&arg.name) {
                    ParserArgument::optional(&arg.name)
                } else {
                    arg
                }
            })
            .collect()
    }

    fn parse(&self, resource: &str, arguments: &Arguments) -> Result<Vec<ParsedLine>, ParseError> {
        self.base.parse(resource, &self.defaults.merged_with(arguments))
    }

    fn validate_resource(&self, resource: &str) -> Option<bool> {
        if self.extensions.is_empty() {
            return self.base.validate_resource(resource);
        }
        let ext = Path::new(resource)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());
        Some(ext.is_some_and(|ext| self.extensions.contains(&ext)))
    }

    fn display_name(&self, resource: &str) -> Option<String> {
        let Some(template) = &self.display else {
            return self.base.display_name(resource);
        };
        let path = Path::new(resource);
        let name = path.file_name().map_or_else(|| resource.into(), |n| n.to_string_lossy());
        let stem = path.file_stem().map_or_else(|| resource.into(), |n| n.to_string_lossy());
        Some(template.replace("{name}", &name).replace("{stem}", &stem))
    }
}
