//! Integration tests for the rawtextcheck CLI
//!
//! These tests drive the binary against a temporary data directory,
//! covering the full cycle of: project create → edit → analyze → results → triage

// Include plugin tests from the same directory
mod plugins_test;

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper function to create a rawtextcheck command using `home` as data directory
fn rawtextcheck(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("rawtextcheck"));
    cmd.arg("--home").arg(home).env("NO_COLOR", "1").env_remove("RAWTEXTCHECK_HOME");
    cmd
}

/// Helper to create the shouting project: upper-case letters and space, BAD banned
fn create_shouting_project(home: &Path, name: &str) {
    rawtextcheck(home)
        .args(["project", "create", name, "en-US", "textfile"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Created project {name}")));

    rawtextcheck(home)
        .args(["project", "edit", name])
        .args(["--add-chars", "ABCDEFGHIJKLMNOPQRSTUVWXYZ ", "--add-banword", "BAD"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 of 2 change(s) applied"));
}

/// Helper to write a text file
fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Helper to run a command with --json and parse its output
fn json(cmd: &mut assert_cmd::Command) -> serde_json::Value {
    let output = cmd.arg("--json").assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

// =============================================================================
// END-TO-END WORKFLOW TESTS
// =============================================================================

/// Test complete workflow: create → edit → analyze → results → triage
#[test]
fn test_e2e_complete_workflow() {
    let home = TempDir::new().unwrap();
    let files = TempDir::new().unwrap();
    create_shouting_project(home.path(), "Game");
    let script = write(files.path(), "script.txt", "HELLO WORLD\nTHIS IS BAD !\n");

    // Analysis reports the invalid character and the banword on line 2
    rawtextcheck(home.path())
        .args(["analyze", "Game"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("script.txt"))
        .stdout(predicate::str::contains("2 findings"))
        .stdout(predicate::str::contains("[2a] INVALID_CHARACTER '!'"))
        .stdout(predicate::str::contains("[2b] BANWORD 'BAD'"));

    // Results are stored under the file name
    rawtextcheck(home.path())
        .args(["results", "list", "Game"])
        .assert()
        .success()
        .stdout(predicate::str::contains("script.txt"));

    // Accepting the character clears its finding and updates the project
    rawtextcheck(home.path())
        .args(["triage", "Game", "script.txt", "--char", "!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project updated, 1 finding(s) cleared"));

    let project = json(rawtextcheck(home.path()).args(["project", "show", "Game"]));
    assert!(project["valid_characters"].as_str().unwrap().contains('!'));

    let shown = json(rawtextcheck(home.path()).args(["results", "show", "Game", "script.txt"]));
    let ids: Vec<&str> = shown["results"].as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["2b"]);

    // Accepting the banword empties the results
    rawtextcheck(home.path())
        .args(["triage", "Game", "script.txt", "--banword", "BAD"])
        .assert()
        .success();

    rawtextcheck(home.path())
        .args(["results", "show", "Game", "script.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No findings for Game/script.txt."));

    // A new analysis no longer finds anything
    rawtextcheck(home.path())
        .args(["analyze", "Game"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 findings"));
}

/// Test JSON analysis output
#[test]
fn test_analyze_json_output() {
    let home = TempDir::new().unwrap();
    let files = TempDir::new().unwrap();
    create_shouting_project(home.path(), "Game");
    let script = write(files.path(), "script.txt", "HELLO WORLD\nTHIS IS BAD !\n");

    let analysis = json(rawtextcheck(home.path()).args(["analyze", "Game"]).arg(&script));

    assert_eq!(analysis["file_name"], "script.txt");
    assert_eq!(analysis["lines_analyzed"], 2);
    assert_eq!(analysis["results"]["2a"]["error_token"], "!");
    assert_eq!(analysis["results"]["2b"]["error_type"], "BANWORD");
    // No grammar server is configured
    assert_eq!(analysis["status"]["status"], "partial");
}

/// Test analysing every file of a folder
#[test]
fn test_analyze_folder() {
    let home = TempDir::new().unwrap();
    let files = TempDir::new().unwrap();
    create_shouting_project(home.path(), "Game");
    write(files.path(), "a.txt", "GOOD\n");
    write(files.path(), "b.txt", "BAD\n");
    fs::create_dir(files.path().join("nested")).unwrap();
    write(&files.path().join("nested"), "c.txt", "BAD\n");

    rawtextcheck(home.path())
        .args(["analyze", "Game"])
        .arg(files.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("b.txt"))
        .stdout(predicate::str::contains("2 file(s) analysed"));

    let listed = json(rawtextcheck(home.path()).args(["results", "list", "Game"]));
    assert_eq!(listed["files"], serde_json::json!(["a.txt", "b.txt"]));
}

/// Test deleting stored findings by id and by type
#[test]
fn test_results_delete() {
    let home = TempDir::new().unwrap();
    let files = TempDir::new().unwrap();
    create_shouting_project(home.path(), "Game");
    let script = write(files.path(), "s.txt", "BAD ? BAD\n");
    rawtextcheck(home.path()).args(["analyze", "Game"]).arg(&script).assert().success();

    rawtextcheck(home.path())
        .args(["results", "delete", "Game", "s.txt", "--id", "1a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 finding(s) from Game/s.txt"));

    rawtextcheck(home.path())
        .args(["results", "delete", "Game", "s.txt", "--type", "BANWORD", "--token", "BAD"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 finding(s)"));

    rawtextcheck(home.path())
        .args(["results", "delete", "Game", "s.txt", "--type", "BANWORD"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 0 finding(s)"));
}

// =============================================================================
// PROJECT LIFECYCLE TESTS
// =============================================================================

/// Test rename moves results and delete can remove them
#[test]
fn test_project_rename_and_delete() {
    let home = TempDir::new().unwrap();
    let files = TempDir::new().unwrap();
    create_shouting_project(home.path(), "Old");
    let script = write(files.path(), "s.txt", "BAD\n");
    rawtextcheck(home.path()).args(["analyze", "Old"]).arg(&script).assert().success();

    rawtextcheck(home.path())
        .args(["project", "rename", "Old", "New"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed Old to New"));

    rawtextcheck(home.path())
        .args(["results", "list", "New"])
        .assert()
        .success()
        .stdout(predicate::str::contains("s.txt"));

    rawtextcheck(home.path())
        .args(["project", "delete", "New", "--results", "remove"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted project New and its results"));

    rawtextcheck(home.path())
        .args(["results", "list", "New"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results stored for New."));

    rawtextcheck(home.path())
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects."));
}

/// Test editing with spans and codes
#[test]
fn test_project_edit_suppression() {
    let home = TempDir::new().unwrap();
    let files = TempDir::new().unwrap();
    create_shouting_project(home.path(), "Game");
    rawtextcheck(home.path())
        .args(["project", "edit", "Game", "--add-span", "<", ">", "--add-code", "{N}", "--into", "nothing"])
        .assert()
        .success();

    let project = json(rawtextcheck(home.path()).args(["project", "show", "Game"]));
    assert_eq!(project["ignored_substrings_into_nothing"]["<"], serde_json::json!([">"]));
    assert_eq!(project["ignored_codes_into_nothing"], serde_json::json!(["{N}"]));

    let script = write(files.path(), "s.txt", "HI<color=red>{N}THERE\n");
    rawtextcheck(home.path())
        .args(["analyze", "Game"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 findings"));
}

/// Test an edit that changes nothing is reported as such
#[test]
fn test_project_edit_unchanged() {
    let home = TempDir::new().unwrap();
    create_shouting_project(home.path(), "Game");

    rawtextcheck(home.path())
        .args(["project", "edit", "Game", "--add-banword", "BAD"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 of 1 change(s) applied"));
}

// =============================================================================
// ERROR HANDLING TESTS
// =============================================================================

/// Test analysing for an unknown project fails
#[test]
fn test_unknown_project_fails() {
    let home = TempDir::new().unwrap();
    rawtextcheck(home.path())
        .args(["analyze", "Ghost", "file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown project 'Ghost'"));
}

/// Test an unknown parser is a configuration error
#[test]
fn test_unknown_parser_fails() {
    let home = TempDir::new().unwrap();
    let files = TempDir::new().unwrap();
    rawtextcheck(home.path())
        .args(["project", "create", "Game", "en-US", "docx"])
        .assert()
        .success();
    let script = write(files.path(), "s.txt", "text\n");

    rawtextcheck(home.path())
        .args(["analyze", "Game"])
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown parser 'docx'"));
}

/// Test an unreadable file produces no results without failing
#[test]
fn test_missing_file_reports_no_results() {
    let home = TempDir::new().unwrap();
    create_shouting_project(home.path(), "Game");

    rawtextcheck(home.path())
        .args(["analyze", "Game", "/definitely/not/here.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no results"));

    rawtextcheck(home.path())
        .args(["results", "list", "Game"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results stored for Game."));
}

/// Test duplicate and incomplete projects are refused
#[test]
fn test_create_validation() {
    let home = TempDir::new().unwrap();
    create_shouting_project(home.path(), "Game");

    rawtextcheck(home.path())
        .args(["project", "create", "Game", "fr", "textfile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    rawtextcheck(home.path())
        .args(["project", "create", "Other", " ", "textfile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("language"));
}

/// Test triage needs exactly one decision
#[test]
fn test_triage_requires_one_decision() {
    let home = TempDir::new().unwrap();
    create_shouting_project(home.path(), "Game");

    rawtextcheck(home.path()).args(["triage", "Game", "s.txt"]).assert().failure();
    rawtextcheck(home.path())
        .args(["triage", "Game", "s.txt", "--char", "!", "--rule", "X"])
        .assert()
        .failure();
}

/// Test version output
#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    rawtextcheck(home.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rawtextcheck v"));
}
