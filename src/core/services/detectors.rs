//! Detectors
//!
//! Three independent detectors run over cleaned lines. They only read their
//! inputs, so they can run concurrently.

use std::collections::{BTreeSet, HashSet};

use crate::core::models::{ErrorRecord, ParsedLine};
use crate::core::ports::{GrammarChecker, GrammarError, GrammarMatch};

/// Separator placed between lines when sent to the grammar tool
pub const LINE_SEPARATOR: char = '\n';

/// One record per character not in `valid_characters`, per occurrence
#[must_use]
pub fn invalid_characters(lines: &[ParsedLine], valid_characters: &str) -> Vec<ErrorRecord> {
    let valid: HashSet<char> = valid_characters.chars().collect();
    lines
        .iter()
        .flat_map(|line| {
            line.text
                .chars()
                .filter(|c| !valid.contains(c))
                .map(|c| ErrorRecord::invalid_character(&line.row_id, &line.text, c))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// One record per whitespace-separated token that exactly matches a banword
#[must_use]
pub fn banwords(lines: &[ParsedLine], banwords: &BTreeSet<String>) -> Vec<ErrorRecord> {
    if banwords.is_empty() {
        return Vec::new();
    }
    let banned: HashSet<&str> = banwords.iter().map(String::as_str).collect();
    lines
        .iter()
        .flat_map(|line| {
            line.text
                .split_whitespace()
                .filter(|word| banned.contains(word))
                .map(|word| ErrorRecord::banword(&line.row_id, &line.text, word))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Character offset at which each line starts in the joined text
#[must_use]
pub fn line_offsets(lines: &[ParsedLine]) -> Vec<usize> {
    lines
        .iter()
        .scan(0, |next, line| {
            let start = *next;
            *next += line.text.chars().count() + 1;
            Some(start)
        })
        .collect()
}

/// Index of the line containing a character offset of the joined text
///
/// Picks the greatest line start not exceeding `offset`.
#[must_use]
pub fn line_index(offsets: &[usize], offset: usize) -> usize {
    offsets.partition_point(|&start| start <= offset).saturating_sub(1)
}

/// Lines joined with [`LINE_SEPARATOR`]
#[must_use]
pub fn joined_text(lines: &[ParsedLine]) -> String {
    let mut text = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            text.push(LINE_SEPARATOR);
        }
        text.push_str(&line.text);
    }
    text
}

/// Grammar findings, with all lines checked in one call
///
/// Matches whose text is in `dictionary` or whose rule is in `ignored_rules`
/// are discarded. The tool's category is kept as is.
pub fn grammar(
    lines: &[ParsedLine],
    checker: &dyn GrammarChecker,
    dictionary: &BTreeSet<String>,
    ignored_rules: &BTreeSet<String>,
) -> Result<Vec<ErrorRecord>, GrammarError> {
    if lines.is_empty() {
        return Ok(Vec::new());
    }
    let matches = checker.check(&joined_text(lines))?;
    let offsets = line_offsets(lines);
    Ok(matches
        .into_iter()
        .filter(|m| !dictionary.contains(&m.matched_text) && !ignored_rules.contains(&m.rule_id))
        .map(|m| {
            let line = &lines[line_index(&offsets, m.offset)];
            grammar_record(line, m)
        })
        .collect())
}

fn grammar_record(line: &ParsedLine, m: GrammarMatch) -> ErrorRecord {
    ErrorRecord {
        row_id: line.row_id.clone(),
        line_text: line.text.clone(),
        error_token: m.matched_text,
        error_type: m.rule_id,
        error_category: m.category,
        explanation: m.message,
        suggestion: m.replacements.join(", "),
    }
}
