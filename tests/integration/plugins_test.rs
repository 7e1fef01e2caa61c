//! Integration tests for parser listing and plugin manifests
//!
//! Tests the plugin flow:
//! - Built-in parsers are always listed
//! - Manifests dropped in the parsers directory are picked up on the next run
//! - Broken manifests are reported without failing the command
//! - A project can analyse files with a plugin parser

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a rawtextcheck command in a data directory
fn rawtextcheck_in(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("rawtextcheck"));
    cmd.arg("--home").arg(home).env("NO_COLOR", "1").env_remove("RAWTEXTCHECK_HOME");
    cmd
}

/// Helper to write a manifest into the default plugin directory
fn add_manifest(home: &Path, file: &str, content: &str) {
    let dir = home.join("parsers");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), content).unwrap();
}

fn parsers_json(home: &Path) -> serde_json::Value {
    let output = rawtextcheck_in(home)
        .args(["parsers", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).unwrap()
}

// =============================================================================
// LISTING TESTS
// =============================================================================

/// Test that the built-in parsers are listed with their arguments
#[test]
fn test_builtin_parsers_listed() {
    let home = TempDir::new().unwrap();

    let listing = parsers_json(home.path());
    let names: Vec<&str> = listing["parsers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["csv", "excel", "google sheet", "po", "textfile", "xml"]);
    assert_eq!(listing["parsers"][0]["origin"], "builtin");
    assert_eq!(listing["parsers"][0]["arguments"][0]["name"], "col");
    assert_eq!(listing["parsers"][0]["arguments"][0]["optional"], false);
    assert!(listing["failures"].as_array().unwrap().is_empty());
}

/// Test human listing marks optional arguments
#[test]
fn test_human_listing() {
    let home = TempDir::new().unwrap();

    rawtextcheck_in(home.path())
        .arg("parsers")
        .assert()
        .success()
        .stdout(predicate::str::contains("csv col [colID]"))
        .stdout(predicate::str::contains("xml"));
}

// =============================================================================
// PLUGIN TESTS
// =============================================================================

/// Test a manifest is picked up and a broken one is reported
#[test]
fn test_manifests_are_loaded_and_failures_reported() {
    let home = TempDir::new().unwrap();
    add_manifest(
        home.path(),
        "subtitles.toml",
        "name = \"subtitles\"\nbase = \"textfile\"\nextensions = [\"srt\"]\n\n[defaults]\nnotContains = \"-->\"\n",
    );
    add_manifest(home.path(), "broken.toml", "name = \"broken\"\nbase = \"word\"\n");

    let listing = parsers_json(home.path());
    let plugin = listing["parsers"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == "subtitles")
        .unwrap();
    assert_eq!(plugin["origin"], "plugin");
    assert_eq!(listing["failures"].as_array().unwrap().len(), 1);
    assert!(
        listing["failures"][0]["reason"]
            .as_str()
            .unwrap()
            .contains("unknown base parser")
    );

    rawtextcheck_in(home.path())
        .arg("parsers")
        .assert()
        .success()
        .stdout(predicate::str::contains("subtitles (plugin)"))
        .stdout(predicate::str::contains("skipped"));
}

/// Test analysing with a plugin parser applies its defaults
#[test]
fn test_analyze_with_plugin_parser() {
    let home = TempDir::new().unwrap();
    let files = TempDir::new().unwrap();
    add_manifest(
        home.path(),
        "subtitles.toml",
        "name = \"subtitles\"\nbase = \"textfile\"\ndisplay = \"Subtitles {stem}\"\n\n[defaults]\nnotContains = \"-->\"\n",
    );
    rawtextcheck_in(home.path())
        .args(["project", "create", "Show", "en-US", "subtitles"])
        .assert()
        .success();
    rawtextcheck_in(home.path())
        .args(["project", "edit", "Show", "--add-chars", "0123456789 HELO"])
        .assert()
        .success();
    let episode = files.path().join("ep1.srt");
    fs::write(&episode, "1\n00:00:01,000 --> 00:00:02,000\nHELLO\n").unwrap();

    rawtextcheck_in(home.path())
        .args(["analyze", "Show"])
        .arg(&episode)
        .assert()
        .success()
        .stdout(predicate::str::contains("Subtitles ep1"))
        .stdout(predicate::str::contains("2 lines, 0 findings"));

    rawtextcheck_in(home.path())
        .args(["results", "list", "Show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subtitles ep1"));
}

/// Test a plugin with a built-in name is refused unless plugins win
#[test]
fn test_precedence_setting() {
    let home = TempDir::new().unwrap();
    add_manifest(home.path(), "csv.toml", "name = \"csv\"\nbase = \"textfile\"\n");

    let listing = parsers_json(home.path());
    let csv = listing["parsers"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == "csv")
        .unwrap()
        .clone();
    assert_eq!(csv["origin"], "builtin");

    fs::write(home.path().join("config.toml"), "[parsers]\nprecedence = \"plugins_win\"\n").unwrap();
    let listing = parsers_json(home.path());
    let csv = listing["parsers"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == "csv")
        .unwrap()
        .clone();
    assert_eq!(csv["origin"], "plugin");
    assert!(listing["failures"].as_array().unwrap().is_empty());
}
