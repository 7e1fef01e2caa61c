//! Remote spreadsheet parser
//!
//! The resource is a spreadsheet URL or bare identifier. `col` holds the
//! content column letter, optionally followed by the identifier column
//! (`E` or `E,A`); `colID` may also name the identifier column.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::core::models::{Arguments, ParsedLine, ParserArgument};
use crate::core::ports::{ParseError, ParserCapability, SpreadsheetAccess, SpreadsheetError};
use crate::parsers::columns::letter_index;

const COL: &str = "col";
const COL_ID: &str = "colID";

static URL_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/spreadsheets/d/([a-zA-Z0-9_-]+)").expect("spreadsheet url pattern is valid")
});

static BARE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{10,}$").expect("spreadsheet id pattern is valid"));

/// Spreadsheet identifier from a URL or a bare identifier
pub fn extract_id(resource: &str) -> Result<String, SpreadsheetError> {
    let resource = resource.trim();
    if let Some(caps) = URL_ID_RE.captures(resource) {
        return Ok(caps[1].to_string());
    }
    if BARE_ID_RE.is_match(resource) {
        return Ok(resource.to_string());
    }
    Err(SpreadsheetError::InvalidId(resource.to_string()))
}

/// Remote spreadsheet parser
pub struct GoogleSheetParser {
    access: Option<Arc<dyn SpreadsheetAccess>>,
}

impl std::fmt::Debug for GoogleSheetParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetParser")
            .field("configured", &self.access.is_some())
            .finish()
    }
}

impl GoogleSheetParser {
    /// Parser using an access capability, or none when remote access is not configured
    #[must_use]
    pub fn new(access: Option<Arc<dyn SpreadsheetAccess>>) -> Self {
        Self { access }
    }

    fn access(&self, resource: &str) -> Result<&dyn SpreadsheetAccess, ParseError> {
        self.access
            .as_deref()
            .ok_or_else(|| ParseError::resource(resource, "remote spreadsheet access is not configured"))
    }

    fn columns(arguments: &Arguments) -> Result<(usize, Option<usize>), ParseError> {
        let col = arguments.require(COL)?;
        let mut parts = col.split(',').map(str::trim);
        let value = letter_index(COL, parts.next().unwrap_or_default())?;
        let id = match (parts.next(), arguments.get(COL_ID)) {
            (Some(letters), _) | (None, Some(letters)) => Some(letter_index(COL_ID, letters)?),
            (None, None) => None,
        };
        Ok((value, id))
    }
}

/// Extract lines from fetched rows
///
/// Rows too short for the content column count as blank.
#[must_use]
pub fn read_rows(rows: &[Vec<String>], value_col: usize, id_col: Option<usize>) -> Vec<ParsedLine> {
    rows.iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let value = row.get(value_col)?;
            if value.trim().is_empty() {
                return None;
            }
            let row_id = id_col
                .and_then(|col| row.get(col))
                .filter(|id| !id.trim().is_empty())
                .map_or_else(|| (i + 1).to_string(), Clone::clone);
            Some(ParsedLine::new(row_id, value.clone()))
        })
        .collect()
}

impl ParserCapability for GoogleSheetParser {
    fn name(&self) -> &'static str {
        "google sheet"
    }

    fn arguments(&self) -> Vec<ParserArgument> {
        vec![ParserArgument::required(COL), ParserArgument::optional(COL_ID)]
    }

    fn parse(&self, resource: &str, arguments: &Arguments) -> Result<Vec<ParsedLine>, ParseError> {
        let (value_col, id_col) = Self::columns(arguments)?;
        let access = self.access(resource)?;
        let fetch = || -> Result<Vec<Vec<String>>, SpreadsheetError> {
            let id = extract_id(resource)?;
            let spreadsheet = access.open_spreadsheet(&id)?;
            let worksheet = access.open_worksheet(&spreadsheet, 0)?;
            access.get_all_values(&worksheet)
        };
        let rows = fetch().map_err(|e| ParseError::resource(resource, e))?;
        Ok(read_rows(&rows, value_col, id_col))
    }

    fn validate_resource(&self, resource: &str) -> Option<bool> {
        let Some(access) = self.access.as_deref() else {
            return Some(false);
        };
        if !access.has_credentials() {
            return Some(false);
        }
        Some(extract_id(resource).is_ok_and(|id| access.open_spreadsheet(&id).is_ok()))
    }

    fn display_name(&self, resource: &str) -> Option<String> {
        let access = self.access.as_deref()?;
        let title = extract_id(resource)
            .and_then(|id| access.open_spreadsheet(&id))
            .map(|s| s.title)
            .unwrap_or_default();
        Some(title)
    }
}
