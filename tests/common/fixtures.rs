//! Test fixtures and builders
//!
//! Provides convenient builders for creating test data.

use std::fs;
use std::path::{Path, PathBuf};

use rawtextcheck::core::models::{ErrorRecord, ParsedLine, Project, ProjectChange, Replacement};

/// Builder for creating test projects
pub struct ProjectBuilder {
    project: Project,
}

impl ProjectBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            project: Project::new(name, "en-US", "textfile").unwrap(),
        }
    }

    pub fn parser(mut self, parser: &str) -> Self {
        self.apply(ProjectChange::SetParser(parser.into()));
        self
    }

    pub fn args(mut self, args: &str) -> Self {
        self.apply(ProjectChange::SetParserArguments(args.into()));
        self
    }

    pub fn valid_characters(mut self, chars: &str) -> Self {
        self.apply(ProjectChange::AddValidCharacters(chars.into()));
        self
    }

    pub fn banword(mut self, word: &str) -> Self {
        self.apply(ProjectChange::AddBanword(word.into()));
        self
    }

    pub fn dictionary_word(mut self, word: &str) -> Self {
        self.apply(ProjectChange::AddDictionaryWord(word.into()));
        self
    }

    pub fn ignored_rule(mut self, rule: &str) -> Self {
        self.apply(ProjectChange::AddIgnoredRule(rule.into()));
        self
    }

    pub fn code(mut self, target: Replacement, code: &str) -> Self {
        self.apply(ProjectChange::AddIgnoredCode {
            target,
            code: code.into(),
        });
        self
    }

    pub fn span(mut self, target: Replacement, start: &str, end: &str) -> Self {
        self.apply(ProjectChange::AddIgnoredSubstring {
            target,
            start: start.into(),
            end: end.into(),
        });
        self
    }

    fn apply(&mut self, change: ProjectChange) {
        self.project.apply(change).unwrap();
    }

    pub fn build(self) -> Project {
        self.project
    }
}

/// Upper-case letters and space
pub const UPPER_AND_SPACE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ ";

/// The project used by the end-to-end scenario
pub fn shouting_project(name: &str) -> Project {
    ProjectBuilder::new(name)
        .valid_characters(UPPER_AND_SPACE)
        .banword("BAD")
        .build()
}

/// Write a file and return its path
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Parsed lines numbered from 1
pub fn lines(texts: &[&str]) -> Vec<ParsedLine> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| ParsedLine::new((i + 1).to_string(), *text))
        .collect()
}

/// Banword record on a row
pub fn banword_record(row: &str, word: &str) -> ErrorRecord {
    ErrorRecord::banword(row, &format!("{word} here"), word)
}
