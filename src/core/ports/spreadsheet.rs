//! Remote spreadsheet port
//!
//! Access to spreadsheets hosted by an online service.

use serde::Deserialize;
use thiserror::Error;

/// HTTP status codes treated as transient
pub const TRANSIENT_STATUS_CODES: [u16; 3] = [429, 500, 503];

/// Errors raised by spreadsheet access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpreadsheetError {
    /// The service answered with an error status
    #[error("spreadsheet service returned HTTP {code}: {message}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Body or reason phrase
        message: String,
    },

    /// No credentials were set
    #[error("no spreadsheet credentials configured")]
    NoCredentials,

    /// The URL or identifier does not name a spreadsheet
    #[error("invalid spreadsheet identifier '{0}'")]
    InvalidId(String),

    /// The spreadsheet or worksheet does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// The request did not reach the service
    #[error("transport error: {0}")]
    Transport(String),

    /// Transient failures persisted through every attempt
    #[error("{operation} failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Operation name
        operation: String,
        /// Attempts made
        attempts: u32,
        /// Last failure
        last: Box<Self>,
    },
}

impl SpreadsheetError {
    /// Whether retrying may succeed (rate limiting or server errors)
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Status { code, .. } if TRANSIENT_STATUS_CODES.contains(code))
    }
}

/// Credentials for the spreadsheet service
///
/// Read from a JSON file such as `{"api_key": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credentials {
    /// API key, for publicly shared spreadsheets
    ApiKey(String),
    /// OAuth access token
    AccessToken(String),
}

/// An opened spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetHandle {
    /// Spreadsheet identifier
    pub id: String,
    /// Document title
    pub title: String,
    /// Worksheet titles, in order
    pub sheets: Vec<String>,
}

/// An opened worksheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetHandle {
    /// Owning spreadsheet identifier
    pub spreadsheet_id: String,
    /// Zero-based index
    pub index: usize,
    /// Worksheet title
    pub title: String,
}

/// Remote spreadsheet capability
///
/// Credentials are held by the implementation, so they can be set through a
/// shared reference.
pub trait SpreadsheetAccess: Send + Sync {
    /// Install credentials for later calls
    fn set_credentials(&self, credentials: Credentials);

    /// Whether credentials were set
    fn has_credentials(&self) -> bool;

    /// Open a spreadsheet by identifier
    fn open_spreadsheet(&self, id: &str) -> Result<SpreadsheetHandle, SpreadsheetError>;

    /// Open a worksheet of an opened spreadsheet
    fn open_worksheet(
        &self,
        spreadsheet: &SpreadsheetHandle,
        index: usize,
    ) -> Result<WorksheetHandle, SpreadsheetError>;

    /// Fetch every cell of a worksheet as strings, row by row
    fn get_all_values(&self, worksheet: &WorksheetHandle) -> Result<Vec<Vec<String>>, SpreadsheetError>;
}
