//! Project model
//!
//! A [`Project`] is the configuration bundle describing how to parse and
//! validate files for one body of text. Set-valued fields are only changed
//! through targeted [`ProjectChange`]s.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Arguments;

/// Errors raised by project validation and mutation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// A required field was empty
    #[error("project {0} must not be empty")]
    EmptyField(&'static str),

    /// A change was requested with an empty value
    #[error("cannot apply '{0}' with an empty value")]
    EmptyValue(&'static str),

    /// Another project already uses this name
    #[error("a project named '{0}' already exists")]
    DuplicateName(String),

    /// No project with this name
    #[error("unknown project '{0}'")]
    NotFound(String),

    /// Removing the results folder would touch another project's results
    #[error("results folder of '{project}' is shared with '{other}'")]
    SharedResultFolder {
        /// Project being deleted
        project: String,
        /// Project whose name sanitizes to the same folder
        other: String,
    },
}

/// What a suppressed code or span is replaced with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Replacement {
    /// Replaced by a single space
    Space,
    /// Removed
    Nothing,
}

impl FromStr for Replacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "space" => Ok(Self::Space),
            "nothing" | "none" => Ok(Self::Nothing),
            _ => Err(format!("Unknown replacement: {s}. Use 'space' or 'nothing'")),
        }
    }
}

impl fmt::Display for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space => write!(f, "space"),
            Self::Nothing => write!(f, "nothing"),
        }
    }
}

/// Map from a start delimiter to its possible end delimiters
pub type SubstringRules = BTreeMap<String, BTreeSet<String>>;

/// Configuration of one project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique name, taken from the store key
    #[serde(skip)]
    pub name: String,
    /// Grammar tool locale code, e.g. `en-US`
    pub language: String,
    /// Parser name, resolved through the registry
    pub parser: String,
    /// Encoded parser arguments, e.g. `col="3" colID="A"`
    #[serde(default)]
    pub arg_parser: String,
    /// Accepted characters; order is irrelevant and duplicates are never stored
    #[serde(default)]
    pub valid_characters: String,
    /// Accepted words
    #[serde(default)]
    pub dictionary: BTreeSet<String>,
    /// Forbidden words
    #[serde(default)]
    pub banwords: BTreeSet<String>,
    /// Literal codes replaced by a space
    #[serde(default)]
    pub ignored_codes_into_space: BTreeSet<String>,
    /// Literal codes removed
    #[serde(default)]
    pub ignored_codes_into_nothing: BTreeSet<String>,
    /// Delimited spans replaced by a space
    #[serde(default)]
    pub ignored_substrings_into_space: SubstringRules,
    /// Delimited spans removed
    #[serde(default)]
    pub ignored_substrings_into_nothing: SubstringRules,
    /// Grammar rule identifiers to discard
    #[serde(default)]
    pub ignored_rules: BTreeSet<String>,
}

/// One targeted mutation of a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectChange {
    /// Add characters to the valid set
    AddValidCharacters(String),
    /// Remove characters from the valid set
    RemoveValidCharacters(String),
    /// Add a word to the dictionary
    AddDictionaryWord(String),
    /// Remove a word from the dictionary
    RemoveDictionaryWord(String),
    /// Add a banned word
    AddBanword(String),
    /// Remove a banned word
    RemoveBanword(String),
    /// Add an ignored code
    AddIgnoredCode {
        /// Which code set
        target: Replacement,
        /// Literal code
        code: String,
    },
    /// Remove an ignored code
    RemoveIgnoredCode {
        /// Which code set
        target: Replacement,
        /// Literal code
        code: String,
    },
    /// Add an end delimiter for a start delimiter
    AddIgnoredSubstring {
        /// Which substring map
        target: Replacement,
        /// Start delimiter
        start: String,
        /// End delimiter
        end: String,
    },
    /// Remove an end delimiter; the start goes away with its last end
    RemoveIgnoredSubstring {
        /// Which substring map
        target: Replacement,
        /// Start delimiter
        start: String,
        /// End delimiter
        end: String,
    },
    /// Add an ignored grammar rule
    AddIgnoredRule(String),
    /// Remove an ignored grammar rule
    RemoveIgnoredRule(String),
    /// Change the grammar language
    SetLanguage(String),
    /// Change the parser
    SetParser(String),
    /// Replace the encoded parser arguments
    SetParserArguments(String),
}

impl ProjectChange {
    /// Short name of the change, used in error messages
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AddValidCharacters(_) => "add valid characters",
            Self::RemoveValidCharacters(_) => "remove valid characters",
            Self::AddDictionaryWord(_) => "add dictionary word",
            Self::RemoveDictionaryWord(_) => "remove dictionary word",
            Self::AddBanword(_) => "add banword",
            Self::RemoveBanword(_) => "remove banword",
            Self::AddIgnoredCode { .. } => "add ignored code",
            Self::RemoveIgnoredCode { .. } => "remove ignored code",
            Self::AddIgnoredSubstring { .. } => "add ignored substring",
            Self::RemoveIgnoredSubstring { .. } => "remove ignored substring",
            Self::AddIgnoredRule(_) => "add ignored rule",
            Self::RemoveIgnoredRule(_) => "remove ignored rule",
            Self::SetLanguage(_) => "set language",
            Self::SetParser(_) => "set parser",
            Self::SetParserArguments(_) => "set parser arguments",
        }
    }
}

fn non_empty(value: &str, label: &'static str) -> Result<(), ProjectError> {
    if value.is_empty() {
        Err(ProjectError::EmptyValue(label))
    } else {
        Ok(())
    }
}

impl Project {
    /// Create a project, rejecting empty name, language or parser
    pub fn new(name: &str, language: &str, parser: &str) -> Result<Self, ProjectError> {
        let name = name.trim();
        let language = language.trim();
        let parser = parser.trim();
        if name.is_empty() {
            return Err(ProjectError::EmptyField("name"));
        }
        if language.is_empty() {
            return Err(ProjectError::EmptyField("language"));
        }
        if parser.is_empty() {
            return Err(ProjectError::EmptyField("parser"));
        }
        Ok(Self {
            name: name.to_string(),
            language: language.to_string(),
            parser: parser.to_string(),
            ..Self::default()
        })
    }

    /// Decoded parser arguments
    #[must_use]
    pub fn arguments(&self) -> Arguments {
        Arguments::parse(&self.arg_parser)
    }

    /// Codes set for a replacement kind
    #[must_use]
    pub const fn ignored_codes(&self, target: Replacement) -> &BTreeSet<String> {
        match target {
            Replacement::Space => &self.ignored_codes_into_space,
            Replacement::Nothing => &self.ignored_codes_into_nothing,
        }
    }

    /// Substring map for a replacement kind
    #[must_use]
    pub const fn ignored_substrings(&self, target: Replacement) -> &SubstringRules {
        match target {
            Replacement::Space => &self.ignored_substrings_into_space,
            Replacement::Nothing => &self.ignored_substrings_into_nothing,
        }
    }

    const fn codes_mut(&mut self, target: Replacement) -> &mut BTreeSet<String> {
        match target {
            Replacement::Space => &mut self.ignored_codes_into_space,
            Replacement::Nothing => &mut self.ignored_codes_into_nothing,
        }
    }

    const fn substrings_mut(&mut self, target: Replacement) -> &mut SubstringRules {
        match target {
            Replacement::Space => &mut self.ignored_substrings_into_space,
            Replacement::Nothing => &mut self.ignored_substrings_into_nothing,
        }
    }

    /// Apply a change, returning whether the project was modified
    ///
    /// Every change except [`ProjectChange::SetParserArguments`] rejects an
    /// empty value.
    pub fn apply(&mut self, change: ProjectChange) -> Result<bool, ProjectError> {
        let label = change.label();
        match change {
            ProjectChange::AddValidCharacters(chars) => {
                non_empty(&chars, label)?;
                let mut changed = false;
                for c in chars.chars() {
                    if !self.valid_characters.contains(c) {
                        self.valid_characters.push(c);
                        changed = true;
                    }
                }
                Ok(changed)
            }
            ProjectChange::RemoveValidCharacters(chars) => {
                non_empty(&chars, label)?;
                let before = self.valid_characters.chars().count();
                self.valid_characters.retain(|c| !chars.contains(c));
                Ok(before != self.valid_characters.chars().count())
            }
            ProjectChange::AddDictionaryWord(word) => {
                non_empty(&word, label)?;
                Ok(self.dictionary.insert(word))
            }
            ProjectChange::RemoveDictionaryWord(word) => {
                non_empty(&word, label)?;
                Ok(self.dictionary.remove(&word))
            }
            ProjectChange::AddBanword(word) => {
                non_empty(&word, label)?;
                Ok(self.banwords.insert(word))
            }
            ProjectChange::RemoveBanword(word) => {
                non_empty(&word, label)?;
                Ok(self.banwords.remove(&word))
            }
            ProjectChange::AddIgnoredCode { target, code } => {
                non_empty(&code, label)?;
                Ok(self.codes_mut(target).insert(code))
            }
            ProjectChange::RemoveIgnoredCode { target, code } => {
                non_empty(&code, label)?;
                Ok(self.codes_mut(target).remove(&code))
            }
            ProjectChange::AddIgnoredSubstring { target, start, end } => {
                non_empty(&start, label)?;
                non_empty(&end, label)?;
                Ok(self.substrings_mut(target).entry(start).or_default().insert(end))
            }
            ProjectChange::RemoveIgnoredSubstring { target, start, end } => {
                non_empty(&start, label)?;
                non_empty(&end, label)?;
                let map = self.substrings_mut(target);
                let Some(ends) = map.get_mut(&start) else {
                    return Ok(false);
                };
                let removed = ends.remove(&end);
                if ends.is_empty() {
                    map.remove(&start);
                }
                Ok(removed)
            }
            ProjectChange::AddIgnoredRule(rule) => {
                non_empty(&rule, label)?;
                Ok(self.ignored_rules.insert(rule))
            }
            ProjectChange::RemoveIgnoredRule(rule) => {
                non_empty(&rule, label)?;
                Ok(self.ignored_rules.remove(&rule))
            }
            ProjectChange::SetLanguage(language) => {
                non_empty(&language, label)?;
                let changed = self.language != language;
                self.language = language;
                Ok(changed)
            }
            ProjectChange::SetParser(parser) => {
                non_empty(&parser, label)?;
                let changed = self.parser != parser;
                self.parser = parser;
                Ok(changed)
            }
            ProjectChange::SetParserArguments(encoded) => {
                let changed = self.arg_parser != encoded;
                self.arg_parser = encoded;
                Ok(changed)
            }
        }
    }
}
