//! CSV parser
//!
//! `col` is the 1-based content column; `colID` optionally names the
//! identifier column, the record number standing in when that cell is blank.

use std::io::Read;

use crate::core::models::{Arguments, ParsedLine, ParserArgument};
use crate::core::ports::{ParseError, ParserCapability};
use crate::parsers::columns::number_index;

const COL: &str = "col";
const COL_ID: &str = "colID";

/// CSV file parser
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvParser;

/// Extract lines from CSV data
pub fn read_records<R: Read>(reader: R, arguments: &Arguments) -> Result<Vec<ParsedLine>, ParseError> {
    let value_col = number_index(COL, arguments.require(COL)?)?;
    let id_col = arguments.get(COL_ID).map(|c| number_index(COL_ID, c)).transpose()?;

    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut lines = Vec::new();
    for (i, record) in csv.records().enumerate() {
        let number = i + 1;
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                log::debug!("Skipping CSV record {number}: {err}");
                continue;
            }
        };
        let Some(value) = record.get(value_col).map(str::trim) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        let row_id = id_col
            .and_then(|col| record.get(col))
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map_or_else(|| number.to_string(), str::to_string);
        lines.push(ParsedLine::new(row_id, value));
    }
    Ok(lines)
}

impl ParserCapability for CsvParser {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn arguments(&self) -> Vec<ParserArgument> {
        vec![ParserArgument::required(COL), ParserArgument::optional(COL_ID)]
    }

    fn parse(&self, resource: &str, arguments: &Arguments) -> Result<Vec<ParsedLine>, ParseError> {
        // Arguments are checked before the file is touched.
        number_index(COL, arguments.require(COL)?)?;
        let file = std::fs::File::open(resource).map_err(|e| ParseError::resource(resource, e))?;
        read_records(file, arguments)
    }

    fn validate_resource(&self, resource: &str) -> Option<bool> {
        Some(
            std::path::Path::new(resource)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv")),
        )
    }
}
