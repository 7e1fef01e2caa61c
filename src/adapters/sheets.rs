//! Google Sheets HTTP client
//!
//! Implements `SpreadsheetAccess` with the Sheets API v4. Retries are not
//! handled here; wrap the client in `RetryingSpreadsheet`.

use std::sync::RwLock;
use std::time::Duration;

use serde::Deserialize;

use crate::core::ports::{
    Credentials, SpreadsheetAccess, SpreadsheetError, SpreadsheetHandle, WorksheetHandle,
};

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct SpreadsheetResponse {
    properties: SheetTitle,
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetTitle,
}

#[derive(Debug, Deserialize)]
struct SheetTitle {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Sheets API client
#[derive(Debug)]
pub struct GoogleSheetsClient {
    http: reqwest::blocking::Client,
    base: String,
    credentials: RwLock<Option<Credentials>>,
}

impl GoogleSheetsClient {
    /// Client for the public Sheets API
    pub fn new() -> Result<Self, SpreadsheetError> {
        Self::with_base(API_BASE)
    }

    /// Client for another endpoint with the same API shape
    pub fn with_base(base: &str) -> Result<Self, SpreadsheetError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| SpreadsheetError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
            credentials: RwLock::new(None),
        })
    }

    fn get<T: serde::de::DeserializeOwned>(&self, url: &str, what: &str) -> Result<T, SpreadsheetError> {
        let credentials = self
            .credentials
            .read()
            .map_err(|_| SpreadsheetError::Transport("credentials lock poisoned".to_string()))?
            .clone()
            .ok_or(SpreadsheetError::NoCredentials)?;
        let request = self.http.get(url);
        let request = match &credentials {
            Credentials::ApiKey(key) => request.query(&[("key", key)]),
            Credentials::AccessToken(token) => request.bearer_auth(token),
        };
        let response = request
            .send()
            .map_err(|e| SpreadsheetError::Transport(e.to_string()))?;
        let status = response.status();
        if status.as_u16() == 404 {
            return Err(SpreadsheetError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(SpreadsheetError::Status {
                code: status.as_u16(),
                message,
            });
        }
        response
            .json()
            .map_err(|e| SpreadsheetError::Transport(e.to_string()))
    }
}

impl SpreadsheetAccess for GoogleSheetsClient {
    fn set_credentials(&self, credentials: Credentials) {
        if let Ok(mut slot) = self.credentials.write() {
            *slot = Some(credentials);
        }
    }

    fn has_credentials(&self) -> bool {
        self.credentials.read().is_ok_and(|slot| slot.is_some())
    }

    fn open_spreadsheet(&self, id: &str) -> Result<SpreadsheetHandle, SpreadsheetError> {
        if id.is_empty() {
            return Err(SpreadsheetError::InvalidId(id.to_string()));
        }
        let url = format!(
            "{}/{id}?fields=properties.title,sheets.properties.title",
            self.base
        );
        let body: SpreadsheetResponse = self.get(&url, &format!("spreadsheet {id}"))?;
        Ok(SpreadsheetHandle {
            id: id.to_string(),
            title: body.properties.title,
            sheets: body.sheets.into_iter().map(|s| s.properties.title).collect(),
        })
    }

    fn open_worksheet(
        &self,
        spreadsheet: &SpreadsheetHandle,
        index: usize,
    ) -> Result<WorksheetHandle, SpreadsheetError> {
        let title = spreadsheet.sheets.get(index).ok_or_else(|| {
            SpreadsheetError::NotFound(format!("worksheet {index} of {}", spreadsheet.id))
        })?;
        Ok(WorksheetHandle {
            spreadsheet_id: spreadsheet.id.clone(),
            index,
            title: title.clone(),
        })
    }

    fn get_all_values(&self, worksheet: &WorksheetHandle) -> Result<Vec<Vec<String>>, SpreadsheetError> {
        let range = worksheet.title.replace('\'', "''");
        let url = format!(
            "{}/{}/values/'{}'?majorDimension=ROWS",
            self.base, worksheet.spreadsheet_id, range
        );
        let body: ValuesResponse = self.get(&url, &format!("worksheet {}", worksheet.title))?;
        Ok(body.values)
    }
}
