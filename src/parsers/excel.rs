//! Spreadsheet workbook parser
//!
//! Reads the first worksheet of an `.xlsx`, `.xlsm`, `.xls` or `.ods`
//! workbook. `col` and `colID` are column letters.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};

use crate::core::models::{Arguments, ParsedLine, ParserArgument};
use crate::core::ports::{ParseError, ParserCapability};
use crate::parsers::columns::letter_index;

const COL: &str = "col";
const COL_ID: &str = "colID";
const EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Workbook parser
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelParser;

fn cell(range: &Range<Data>, row: u32, col: usize) -> Option<String> {
    let col = u32::try_from(col).ok()?;
    match range.get_value((row, col))? {
        Data::Empty => None,
        value => Some(value.to_string()),
    }
}

/// Extract lines from a worksheet range
///
/// Row identifiers default to the 1-based sheet row.
pub fn read_range(range: &Range<Data>, arguments: &Arguments) -> Result<Vec<ParsedLine>, ParseError> {
    let value_col = letter_index(COL, arguments.require(COL)?)?;
    let id_col = arguments.get(COL_ID).map(|c| letter_index(COL_ID, c)).transpose()?;

    let (Some((first_row, _)), Some((last_row, _))) = (range.start(), range.end()) else {
        return Ok(Vec::new());
    };
    let mut lines = Vec::new();
    for row in first_row..=last_row {
        let Some(value) = cell(range, row, value_col) else {
            continue;
        };
        if value.trim().is_empty() {
            continue;
        }
        let row_id = id_col
            .and_then(|col| cell(range, row, col))
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| (row + 1).to_string());
        lines.push(ParsedLine::new(row_id, value));
    }
    Ok(lines)
}

impl ParserCapability for ExcelParser {
    fn name(&self) -> &'static str {
        "excel"
    }

    fn arguments(&self) -> Vec<ParserArgument> {
        vec![ParserArgument::required(COL), ParserArgument::optional(COL_ID)]
    }

    fn parse(&self, resource: &str, arguments: &Arguments) -> Result<Vec<ParsedLine>, ParseError> {
        letter_index(COL, arguments.require(COL)?)?;
        let mut workbook = open_workbook_auto(resource).map_err(|e| ParseError::resource(resource, e))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ParseError::resource(resource, "workbook has no worksheet"))?
            .map_err(|e| ParseError::resource(resource, e))?;
        read_range(&range, arguments)
    }

    fn validate_resource(&self, resource: &str) -> Option<bool> {
        Some(Path::new(resource).extension().is_some_and(|ext| {
            EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        }))
    }
}
