//! Tests for the JSON project and result stores

use std::fs;

use rawtextcheck::adapters::{JsonProjectStore, JsonResultStore};
use rawtextcheck::core::models::{ErrorRecord, Project, ProjectChange, ProjectError, ResultSet};
use rawtextcheck::core::ports::{ProjectStore, ResultStore, StoreError};
use rawtextcheck::core::services::{ResultFolderPolicy, delete_project, rename_project};
use tempfile::TempDir;

fn project(name: &str) -> Project {
    Project::new(name, "en-US", "textfile").unwrap()
}

fn results(tokens: &[&str]) -> ResultSet {
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| (format!("{}a", i + 1), ErrorRecord::banword(&(i + 1).to_string(), token, token)))
        .collect()
}

// =============================================================================
// PROJECT STORE
// =============================================================================

#[test]
fn test_empty_store_lists_nothing() {
    let temp = TempDir::new().unwrap();
    let store = JsonProjectStore::new(temp.path());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_create_and_get() {
    let temp = TempDir::new().unwrap();
    let store = JsonProjectStore::new(temp.path());

    store.create(project("Game")).unwrap();

    let loaded = store.get("Game").unwrap();
    assert_eq!(loaded.name, "Game");
    assert_eq!(loaded.language, "en-US");
    assert!(temp.path().join("projects.json").exists());
}

#[test]
fn test_create_duplicate_is_refused() {
    let temp = TempDir::new().unwrap();
    let store = JsonProjectStore::new(temp.path());
    store.create(project("Game")).unwrap();

    let err = store.create(project("Game")).unwrap_err();
    assert!(matches!(err, StoreError::Project(ProjectError::DuplicateName(_))));
}

#[test]
fn test_projects_file_is_keyed_by_name() {
    let temp = TempDir::new().unwrap();
    let store = JsonProjectStore::new(temp.path());
    let mut game = project("Game");
    game.apply(ProjectChange::AddBanword("BAD".into())).unwrap();
    store.create(game).unwrap();

    let content = fs::read_to_string(store.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["Game"]["parser"], "textfile");
    assert_eq!(json["Game"]["banwords"][0], "BAD");
    assert!(json["Game"].get("name").is_none());
}

#[test]
fn test_apply_persists_only_changes() {
    let temp = TempDir::new().unwrap();
    let store = JsonProjectStore::new(temp.path());
    store.create(project("Game")).unwrap();

    assert!(store.apply("Game", ProjectChange::AddDictionaryWord("Zorg".into())).unwrap());
    assert!(!store.apply("Game", ProjectChange::AddDictionaryWord("Zorg".into())).unwrap());
    assert!(store.get("Game").unwrap().dictionary.contains("Zorg"));
}

#[test]
fn test_rename_and_delete() {
    let temp = TempDir::new().unwrap();
    let store = JsonProjectStore::new(temp.path());
    store.create(project("Old")).unwrap();
    store.create(project("Other")).unwrap();

    assert!(matches!(
        store.rename("Old", "Other").unwrap_err(),
        StoreError::Project(ProjectError::DuplicateName(_))
    ));
    store.rename("Old", "New").unwrap();
    assert_eq!(store.names().unwrap(), vec!["New", "Other"]);

    let deleted = store.delete("New").unwrap();
    assert_eq!(deleted.name, "New");
    assert!(matches!(
        store.get("New").unwrap_err(),
        StoreError::Project(ProjectError::NotFound(_))
    ));
}

#[test]
fn test_malformed_projects_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("projects.json"), "{ not json").unwrap();
    let store = JsonProjectStore::new(temp.path());

    assert!(matches!(store.list().unwrap_err(), StoreError::Format { .. }));
}

// =============================================================================
// RESULT STORE
// =============================================================================

#[test]
fn test_results_round_trip_keeps_order() {
    let temp = TempDir::new().unwrap();
    let store = JsonResultStore::new(temp.path());
    let set = results(&["zeta", "alpha", "mid"]);

    store.save("Game", "dialog.csv", &set).unwrap();

    let loaded = store.load("Game", "dialog.csv").unwrap();
    assert_eq!(loaded, set);
    assert_eq!(loaded.keys().collect::<Vec<_>>(), vec!["1a", "2a", "3a"]);
    assert!(store.file_path("Game", "dialog.csv").ends_with("results/Game/dialog.csv.json"));
}

#[test]
fn test_missing_results_load_empty() {
    let temp = TempDir::new().unwrap();
    let store = JsonResultStore::new(temp.path());
    assert!(store.load("Game", "never.txt").unwrap().is_empty());
    assert!(store.list_files("Game").unwrap().is_empty());
}

#[test]
fn test_list_files_sorted() {
    let temp = TempDir::new().unwrap();
    let store = JsonResultStore::new(temp.path());
    store.save("Game", "b.txt", &results(&["x"])).unwrap();
    store.save("Game", "a.po", &results(&["y"])).unwrap();
    store.save("Other", "c.txt", &results(&["z"])).unwrap();

    assert_eq!(store.list_files("Game").unwrap(), vec!["a.po", "b.txt"]);
}

#[test]
fn test_delete_helpers_rewrite_the_file() {
    let temp = TempDir::new().unwrap();
    let store = JsonResultStore::new(temp.path());
    store.save("Game", "a.txt", &results(&["BAD", "BAD", "FOO"])).unwrap();

    assert!(store.delete_entry("Game", "a.txt", "3a").unwrap());
    assert!(!store.delete_entry("Game", "a.txt", "3a").unwrap());
    assert_eq!(store.delete_by_type_and_token("Game", "a.txt", "BANWORD", "BAD").unwrap(), 2);
    assert!(store.load("Game", "a.txt").unwrap().is_empty());
}

#[test]
fn test_names_are_sanitized_into_folders() {
    let temp = TempDir::new().unwrap();
    let store = JsonResultStore::new(temp.path());
    store.save("Act 1: Intro", "a.txt", &results(&["x"])).unwrap();

    assert!(temp.path().join("results").join("Act 1_ Intro").join("a.txt.json").exists());
    assert_eq!(store.folder_key("Act 1: Intro"), store.folder_key("Act 1/ Intro"));
}

// =============================================================================
// LIFECYCLE ACROSS BOTH STORES
// =============================================================================

#[test]
fn test_rename_project_moves_result_folder() {
    let temp = TempDir::new().unwrap();
    let projects = JsonProjectStore::new(temp.path());
    let store = JsonResultStore::new(temp.path());
    projects.create(project("Old")).unwrap();
    store.save("Old", "a.txt", &results(&["x"])).unwrap();

    rename_project(&projects, &store, "Old", "New").unwrap();

    assert!(!temp.path().join("results").join("Old").exists());
    assert_eq!(store.list_files("New").unwrap(), vec!["a.txt"]);
}

#[test]
fn test_rename_merges_into_leftover_folder() {
    let temp = TempDir::new().unwrap();
    let projects = JsonProjectStore::new(temp.path());
    let store = JsonResultStore::new(temp.path());
    projects.create(project("Old")).unwrap();
    store.save("Old", "a.txt", &results(&["fresh"])).unwrap();
    store.save("New", "a.txt", &results(&["stale"])).unwrap();
    store.save("New", "b.txt", &results(&["kept"])).unwrap();

    rename_project(&projects, &store, "Old", "New").unwrap();

    assert_eq!(store.list_files("New").unwrap(), vec!["a.txt", "b.txt"]);
    assert_eq!(store.load("New", "a.txt").unwrap(), results(&["fresh"]));
}

#[test]
fn test_delete_with_results_removed() {
    let temp = TempDir::new().unwrap();
    let projects = JsonProjectStore::new(temp.path());
    let store = JsonResultStore::new(temp.path());
    projects.create(project("Game")).unwrap();
    store.save("Game", "a.txt", &results(&["x"])).unwrap();

    assert!(delete_project(&projects, &store, "Game", ResultFolderPolicy::Remove).unwrap());
    assert!(!temp.path().join("results").join("Game").exists());
}

#[test]
fn test_delete_refuses_shared_sanitized_folder() {
    let temp = TempDir::new().unwrap();
    let projects = JsonProjectStore::new(temp.path());
    let store = JsonResultStore::new(temp.path());
    projects.create(project("A:B")).unwrap();
    projects.create(project("A/B")).unwrap();
    store.save("A:B", "a.txt", &results(&["x"])).unwrap();

    let err = delete_project(&projects, &store, "A:B", ResultFolderPolicy::Remove).unwrap_err();
    assert!(matches!(err, StoreError::Project(ProjectError::SharedResultFolder { .. })));
    assert_eq!(projects.names().unwrap().len(), 2);
    assert_eq!(store.list_files("A/B").unwrap(), vec!["a.txt"]);
}
