//! Plain text parser
//!
//! One line per non-blank source line, identified by its 1-based line number.

use std::fs;

use crate::core::models::{ArgumentError, Arguments, ParsedLine, ParserArgument};
use crate::core::ports::{ParseError, ParserCapability};

const BEGIN_TEXT: &str = "beginText";
const END_TEXT: &str = "endText";
const BEGIN_LINE_NUMBER: &str = "beginLineNumber";
const END_LINE_NUMBER: &str = "endLineNumber";
const CONTAINS: &str = "contains";
const NOT_CONTAINS: &str = "notContains";

/// Plain text file parser
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFileParser;

fn line_number(arguments: &Arguments, name: &str) -> Result<Option<usize>, ArgumentError> {
    arguments
        .get(name)
        .map(|value| {
            value
                .trim()
                .parse::<usize>()
                .map_err(|_| ArgumentError::invalid(name, value, "expected a line number"))
        })
        .transpose()
}

/// Filter lines of a text according to the textfile arguments
pub fn select_lines(content: &str, arguments: &Arguments) -> Result<Vec<ParsedLine>, ArgumentError> {
    let begin_line = line_number(arguments, BEGIN_LINE_NUMBER)?;
    let end_line = line_number(arguments, END_LINE_NUMBER)?;
    let begin_text = arguments.get(BEGIN_TEXT);
    let end_text = arguments.get(END_TEXT);
    let contains = arguments.get(CONTAINS);
    let not_contains = arguments.get(NOT_CONTAINS);

    let mut begin_found = false;
    let mut lines = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let number = i + 1;
        let trimmed = line.trim();

        if let Some(begin) = begin_line {
            if number < begin {
                continue;
            }
        } else if let Some(begin) = begin_text {
            if trimmed == begin {
                begin_found = true;
            } else if !begin_found {
                continue;
            }
        }

        if let Some(end) = end_line {
            if number >= end {
                break;
            }
        } else if end_text.is_some_and(|end| trimmed == end) {
            break;
        }

        if contains.is_some_and(|needle| !line.contains(needle)) {
            continue;
        }
        if not_contains.is_some_and(|needle| line.contains(needle)) {
            continue;
        }
        if !trimmed.is_empty() {
            lines.push(ParsedLine::new(number.to_string(), trimmed));
        }
    }
    Ok(lines)
}

impl ParserCapability for TextFileParser {
    fn name(&self) -> &'static str {
        "textfile"
    }

    fn arguments(&self) -> Vec<ParserArgument> {
        [BEGIN_TEXT, END_TEXT, BEGIN_LINE_NUMBER, END_LINE_NUMBER, CONTAINS, NOT_CONTAINS]
            .into_iter()
            .map(ParserArgument::optional)
            .collect()
    }

    fn parse(&self, resource: &str, arguments: &Arguments) -> Result<Vec<ParsedLine>, ParseError> {
        let content = fs::read_to_string(resource).map_err(|e| ParseError::resource(resource, e))?;
        Ok(select_lines(&content, arguments)?)
    }
}
