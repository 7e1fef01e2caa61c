//! PO translation file parser
//!
//! Emits every non-blank translation. The optional `id` argument chooses the
//! row identifier: `msgid` for the source string, anything else (default
//! `line`) for the 1-based line number of the `msgstr` keyword. The header
//! entry and obsolete (`#~`) entries are never emitted.

use std::fs;
use std::path::Path;

use crate::core::models::{ArgumentError, Arguments, ParsedLine, ParserArgument};
use crate::core::ports::{ParseError, ParserCapability};

const ID: &str = "id";

/// One translation string and the line of its keyword
#[derive(Debug, Clone, PartialEq, Eq)]
struct Translation {
    line: usize,
    text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Entry {
    msgid: Option<String>,
    msgstr: Vec<Translation>,
    obsolete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Context,
    Id,
    IdPlural,
    Str,
}

/// Decode the body of a quoted PO string
fn unquote(raw: &str) -> Option<String> {
    let inner = raw.trim().strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Some(out)
}

struct PoReader {
    entries: Vec<Entry>,
    current: Entry,
    field: Option<Field>,
}

impl PoReader {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            current: Entry::default(),
            field: None,
        }
    }

    fn finish_entry(&mut self) {
        let entry = std::mem::take(&mut self.current);
        if entry.msgid.is_some() {
            self.entries.push(entry);
        }
        self.field = None;
    }

    fn append(&mut self, text: &str) {
        match self.field {
            Some(Field::Id) => {
                if let Some(id) = self.current.msgid.as_mut() {
                    id.push_str(text);
                }
            }
            Some(Field::Str) => {
                if let Some(last) = self.current.msgstr.last_mut() {
                    last.text.push_str(text);
                }
            }
            Some(Field::Context | Field::IdPlural) | None => {}
        }
    }

    fn keyword(&mut self, keyword: &str, value: String, line: usize, obsolete: bool) {
        match keyword {
            "msgctxt" | "msgid" => {
                if self.current.msgid.is_some() {
                    self.finish_entry();
                }
                self.current.obsolete |= obsolete;
                if keyword == "msgid" {
                    self.current.msgid = Some(value);
                    self.field = Some(Field::Id);
                } else {
                    self.field = Some(Field::Context);
                }
            }
            "msgid_plural" => self.field = Some(Field::IdPlural),
            k if k == "msgstr" || k.starts_with("msgstr[") => {
                self.current.msgstr.push(Translation { line, text: value });
                self.field = Some(Field::Str);
            }
            other => log::debug!("Unknown PO keyword '{other}' on line {line}"),
        }
    }

    fn read_line(&mut self, number: usize, raw: &str) {
        let mut line = raw.trim();
        let obsolete = line.starts_with("#~");
        if obsolete {
            line = line.trim_start_matches("#~").trim_start();
        } else if line.starts_with('#') {
            if self.field == Some(Field::Str) {
                self.finish_entry();
            }
            return;
        }
        if line.is_empty() {
            self.finish_entry();
            return;
        }
        if line.starts_with('"') {
            match unquote(line) {
                Some(text) => self.append(&text),
                None => log::debug!("Malformed PO string on line {number}"),
            }
            return;
        }
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match unquote(rest) {
            Some(value) => self.keyword(keyword, value, number, obsolete),
            None => log::debug!("Malformed PO line {number}"),
        }
    }
}

/// Extract translations from PO content
pub fn read_po(content: &str, arguments: &Arguments) -> Result<Vec<ParsedLine>, ArgumentError> {
    let use_msgid = arguments.get(ID).is_some_and(|id| id.trim() == "msgid");
    let mut reader = PoReader::new();
    for (i, line) in content.lines().enumerate() {
        reader.read_line(i + 1, line);
    }
    reader.finish_entry();

    Ok(reader
        .entries
        .into_iter()
        .filter(|entry| !entry.obsolete)
        .filter_map(|entry| entry.msgid.filter(|id| !id.is_empty()).map(|id| (id, entry.msgstr)))
        .flat_map(|(msgid, translations)| {
            translations
                .into_iter()
                .filter(|t| !t.text.trim().is_empty())
                .map(|t| {
                    let row_id = if use_msgid { msgid.clone() } else { t.line.to_string() };
                    ParsedLine::new(row_id, t.text)
                })
                .collect::<Vec<_>>()
        })
        .collect())
}

/// PO file parser
#[derive(Debug, Clone, Copy, Default)]
pub struct PoParser;

impl ParserCapability for PoParser {
    fn name(&self) -> &'static str {
        "po"
    }

    fn arguments(&self) -> Vec<ParserArgument> {
        vec![ParserArgument::optional(ID)]
    }

    fn parse(&self, resource: &str, arguments: &Arguments) -> Result<Vec<ParsedLine>, ParseError> {
        let content = fs::read_to_string(resource).map_err(|e| ParseError::resource(resource, e))?;
        Ok(read_po(&content, arguments)?)
    }

    fn validate_resource(&self, resource: &str) -> Option<bool> {
        Some(Path::new(resource).extension().is_some_and(|ext| {
            ext.eq_ignore_ascii_case("po") || ext.eq_ignore_ascii_case("pot")
        }))
    }
}
