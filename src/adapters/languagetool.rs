//! LanguageTool HTTP client
//!
//! Implements `GrammarChecker` against a LanguageTool server (`/v2/check`).
//! LanguageTool counts offsets in UTF-16 code units; they are converted to
//! character offsets before leaving this module.

use std::time::Duration;

use serde::Deserialize;

use crate::core::ports::{GrammarChecker, GrammarError, GrammarMatch};

/// Default public server
pub const DEFAULT_SERVER: &str = "https://api.languagetool.org";

const TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct CheckResponse {
    matches: Vec<ApiMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMatch {
    message: String,
    offset: usize,
    length: usize,
    #[serde(default)]
    replacements: Vec<ApiReplacement>,
    rule: ApiRule,
}

#[derive(Debug, Deserialize)]
struct ApiReplacement {
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRule {
    id: String,
    #[serde(default)]
    issue_type: String,
}

/// Grammar checker backed by a LanguageTool server
#[derive(Debug)]
pub struct LanguageToolChecker {
    server: String,
    http: reqwest::blocking::Client,
    language: Option<String>,
}

impl LanguageToolChecker {
    /// Client for a server base URL, e.g. `http://localhost:8081`
    pub fn new(server: &str) -> Result<Self, GrammarError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| GrammarError::Backend(e.to_string()))?;
        Ok(Self {
            server: server.trim_end_matches('/').to_string(),
            http,
            language: None,
        })
    }
}

impl GrammarChecker for LanguageToolChecker {
    fn initialize(&mut self, language: &str) -> Result<(), GrammarError> {
        if language.trim().is_empty() {
            return Err(GrammarError::Unavailable("no language configured".to_string()));
        }
        log::info!("LanguageTool at {} checking {language}", self.server);
        self.language = Some(language.to_string());
        Ok(())
    }

    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    fn check(&self, text: &str) -> Result<Vec<GrammarMatch>, GrammarError> {
        let language = self.language.as_deref().ok_or(GrammarError::NotInitialized)?;
        let response = self
            .http
            .post(format!("{}/v2/check", self.server))
            .form(&[("language", language), ("text", text)])
            .send()
            .map_err(|e| GrammarError::Backend(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GrammarError::Backend(format!("HTTP {}: {body}", status.as_u16())));
        }
        let body: CheckResponse = response
            .json()
            .map_err(|e| GrammarError::Backend(e.to_string()))?;
        Ok(convert_matches(text, body.matches))
    }

    fn close(&mut self) {
        self.language = None;
    }
}

/// Character index of every UTF-16 offset, plus one past the end
fn utf16_to_char_index(text: &str) -> Vec<usize> {
    let mut index = Vec::with_capacity(text.len() + 1);
    for (i, c) in text.chars().enumerate() {
        for _ in 0..c.len_utf16() {
            index.push(i);
        }
    }
    index.push(text.chars().count());
    index
}

fn convert_matches(text: &str, matches: Vec<ApiMatch>) -> Vec<GrammarMatch> {
    let index = utf16_to_char_index(text);
    let last = index.len() - 1;
    let chars: Vec<char> = text.chars().collect();
    matches
        .into_iter()
        .map(|m| {
            let start = index[m.offset.min(last)];
            let end = index[(m.offset + m.length).min(last)];
            GrammarMatch {
                offset: start,
                length: end - start,
                matched_text: chars[start..end].iter().collect(),
                rule_id: m.rule.id,
                message: m.message,
                replacements: m.replacements.into_iter().map(|r| r.value).collect(),
                category: m.rule.issue_type,
            }
        })
        .collect()
}
