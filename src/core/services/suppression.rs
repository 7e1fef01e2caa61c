//! Suppression engine
//!
//! Removes project-specific markup from lines before analysis. Each line is
//! processed on its own, so surviving lines keep their row identifiers and
//! their relative order, and two lines are never merged.
//!
//! Per line, in order:
//!
//! 1. literal codes replaced by a space, then literal codes removed;
//! 2. delimited spans replaced by a space, then delimited spans removed.
//!
//! Lines left empty are dropped.

use std::collections::BTreeSet;

use crate::core::models::{ParsedLine, Project, Replacement, SubstringRules};

/// Codes and delimited spans to strip, taken from a project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionRules {
    /// Literal codes replaced by a space
    pub codes_into_space: BTreeSet<String>,
    /// Literal codes removed
    pub codes_into_nothing: BTreeSet<String>,
    /// Spans replaced by a space
    pub substrings_into_space: SubstringRules,
    /// Spans removed
    pub substrings_into_nothing: SubstringRules,
}

impl SuppressionRules {
    /// Snapshot the rules of a project
    #[must_use]
    pub fn from_project(project: &Project) -> Self {
        Self {
            codes_into_space: project.ignored_codes_into_space.clone(),
            codes_into_nothing: project.ignored_codes_into_nothing.clone(),
            substrings_into_space: project.ignored_substrings_into_space.clone(),
            substrings_into_nothing: project.ignored_substrings_into_nothing.clone(),
        }
    }

    /// Whether no rule is configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes_into_space.is_empty()
            && self.codes_into_nothing.is_empty()
            && self.substrings_into_space.is_empty()
            && self.substrings_into_nothing.is_empty()
    }
}

/// Clean every line, dropping the ones left empty
#[must_use]
pub fn clean(lines: &[ParsedLine], rules: &SuppressionRules) -> Vec<ParsedLine> {
    if rules.is_empty() {
        return lines.to_vec();
    }
    lines
        .iter()
        .filter_map(|line| {
            let text = clean_text(&line.text, rules);
            if text.is_empty() {
                log::debug!("Row {} is empty after suppression, dropped", line.row_id);
                None
            } else {
                Some(ParsedLine::new(line.row_id.clone(), text))
            }
        })
        .collect()
}

/// Clean a single text
#[must_use]
pub fn clean_text(text: &str, rules: &SuppressionRules) -> String {
    let mut text = text.to_string();
    text = replace_codes(&text, &rules.codes_into_space, Replacement::Space);
    text = replace_codes(&text, &rules.codes_into_nothing, Replacement::Nothing);
    text = strip_spans(&text, &rules.substrings_into_space, Replacement::Space);
    strip_spans(&text, &rules.substrings_into_nothing, Replacement::Nothing)
}

const fn replacement_text(replacement: Replacement) -> &'static str {
    match replacement {
        Replacement::Space => " ",
        Replacement::Nothing => "",
    }
}

fn replace_codes(text: &str, codes: &BTreeSet<String>, replacement: Replacement) -> String {
    codes
        .iter()
        .filter(|code| !code.is_empty())
        .fold(text.to_string(), |acc, code| {
            acc.replace(code.as_str(), replacement_text(replacement))
        })
}

/// Longest start delimiter matching at the head of `rest`
fn match_start<'a>(rest: &str, rules: &'a SubstringRules) -> Option<(&'a str, &'a BTreeSet<String>)> {
    rules
        .iter()
        .filter(|(start, _)| !start.is_empty() && rest.starts_with(start.as_str()))
        .max_by_key(|(start, _)| start.len())
        .map(|(start, ends)| (start.as_str(), ends))
}

/// Byte offset just past the earliest end delimiter in `rest`
///
/// At equal positions the longest delimiter wins.
fn match_end(rest: &str, ends: &BTreeSet<String>) -> Option<usize> {
    ends.iter()
        .filter(|end| !end.is_empty())
        .filter_map(|end| rest.find(end.as_str()).map(|pos| (pos, end.len())))
        .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
        .map(|(pos, len)| pos + len)
}

fn strip_spans(text: &str, rules: &SubstringRules, replacement: Replacement) -> String {
    if rules.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        if let Some((start, ends)) = match_start(rest, rules) {
            let after_start = &rest[start.len()..];
            // An unterminated span runs to the end of the line.
            let span_end = match_end(after_start, ends).map_or(rest.len(), |end| start.len() + end);
            out.push_str(replacement_text(replacement));
            pos += span_end;
        } else if let Some(c) = rest.chars().next() {
            out.push(c);
            pos += c.len_utf8();
        }
    }
    out
}
