//! Wiring of the configured backends into a workbench

use std::path::Path;
use std::sync::Arc;

use rawtextcheck::adapters::DisabledGrammarChecker;
use rawtextcheck::config::AppConfig;
use rawtextcheck::core::ports::{GrammarChecker, SpreadsheetAccess};
use rawtextcheck::core::services::GrammarSession;
use rawtextcheck::worker::Workbench;

#[cfg(feature = "languagetool")]
fn grammar_checker(config: &AppConfig) -> Box<dyn GrammarChecker> {
    use rawtextcheck::adapters::LanguageToolChecker;

    let Some(server) = &config.grammar.server else {
        return Box::new(DisabledGrammarChecker::new("no grammar server configured"));
    };
    match LanguageToolChecker::new(server) {
        Ok(checker) => Box::new(checker),
        Err(err) => {
            log::warn!("Grammar checking disabled: {err}");
            Box::new(DisabledGrammarChecker::new(err.to_string()))
        }
    }
}

#[cfg(not(feature = "languagetool"))]
fn grammar_checker(config: &AppConfig) -> Box<dyn GrammarChecker> {
    if config.grammar.server.is_some() {
        log::warn!("A grammar server is configured but this build has no LanguageTool support");
    }
    Box::new(DisabledGrammarChecker::new("built without LanguageTool support"))
}

#[cfg(feature = "sheets")]
fn spreadsheet_access(config: &AppConfig) -> Option<Arc<dyn SpreadsheetAccess>> {
    use rawtextcheck::adapters::GoogleSheetsClient;
    use rawtextcheck::core::ports::Credentials;
    use rawtextcheck::retry::RetryingSpreadsheet;

    let client = match GoogleSheetsClient::new() {
        Ok(client) => client,
        Err(err) => {
            log::warn!("Remote spreadsheets disabled: {err}");
            return None;
        }
    };
    if let Some(path) = &config.sheets.credentials_file {
        let credentials = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str::<Credentials>(&content).map_err(|e| e.to_string()));
        match credentials {
            Ok(credentials) => client.set_credentials(credentials),
            Err(err) => log::warn!("Cannot load credentials from {}: {err}", path.display()),
        }
    }
    Some(Arc::new(RetryingSpreadsheet::new(client, config.sheets.retry_policy())))
}

#[cfg(not(feature = "sheets"))]
fn spreadsheet_access(_config: &AppConfig) -> Option<Arc<dyn SpreadsheetAccess>> {
    None
}

/// Workbench over a data directory, with its configuration loaded
pub fn open(home: &Path) -> Workbench {
    let config = AppConfig::load_from(home);
    let grammar = GrammarSession::new(grammar_checker(&config));
    let spreadsheet = spreadsheet_access(&config);
    Workbench::new(home, config, grammar, spreadsheet)
}
