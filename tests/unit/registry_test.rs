//! Tests for plugin discovery in the parser registry

use rawtextcheck::core::models::Arguments;
use rawtextcheck::core::ports::ParserLookup;
use rawtextcheck::parsers::{ParserOrigin, ParserRegistry, PluginPrecedence};
use tempfile::TempDir;

use crate::common::fixtures::write_file;

const SUBTITLES: &str = r#"
name = "subtitles"
base = "textfile"
display = "Subtitles {stem}"
extensions = ["srt"]

[defaults]
notContains = "-->"
"#;

const CSV_OVERRIDE: &str = r#"
name = "csv"
base = "textfile"
"#;

fn plugin_dir(manifests: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (file, content) in manifests {
        write_file(dir.path(), file, content);
    }
    dir
}

#[test]
fn test_plugin_is_registered_next_to_builtins() {
    let dir = plugin_dir(&[("subtitles.toml", SUBTITLES)]);

    let registry = ParserRegistry::build(Some(dir.path()), PluginPrecedence::BuiltinsWin, None);

    assert!(registry.names().contains(&"subtitles".to_string()));
    assert_eq!(registry.origin("subtitles"), Some(ParserOrigin::Plugin));
    assert_eq!(registry.origin("textfile"), Some(ParserOrigin::Builtin));
    assert!(registry.load_failures().is_empty());
    assert_eq!(registry.parsers_for("episode1.srt"), vec!["subtitles"]);
}

#[test]
fn test_plugin_parses_with_its_defaults() {
    let dir = plugin_dir(&[("subtitles.toml", SUBTITLES)]);
    let file = write_file(dir.path(), "ep1.srt", "1\n00:00:01 --> 00:00:02\nHello there\n");
    let registry = ParserRegistry::build(Some(dir.path()), PluginPrecedence::BuiltinsWin, None);
    let parser = registry.resolve("subtitles").unwrap();

    let lines = parser.parse(file.to_str().unwrap(), &Arguments::new()).unwrap();
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["1", "Hello there"]);
    assert_eq!(lines[1].row_id, "3");
    assert_eq!(
        parser.display_name(file.to_str().unwrap()).as_deref(),
        Some("Subtitles ep1")
    );
}

#[test]
fn test_builtin_wins_name_collision_by_default() {
    let dir = plugin_dir(&[("csv.toml", CSV_OVERRIDE)]);

    let registry = ParserRegistry::build(Some(dir.path()), PluginPrecedence::BuiltinsWin, None);

    assert_eq!(registry.origin("csv"), Some(ParserOrigin::Builtin));
    assert_eq!(registry.load_failures().len(), 1);
    assert!(registry.load_failures()[0].reason.contains("built-in"));
}

#[test]
fn test_plugin_can_replace_builtin() {
    let dir = plugin_dir(&[("csv.toml", CSV_OVERRIDE)]);

    let registry = ParserRegistry::build(Some(dir.path()), PluginPrecedence::PluginsWin, None);

    assert_eq!(registry.origin("csv"), Some(ParserOrigin::Plugin));
    assert!(registry.load_failures().is_empty());
    assert!(registry.arguments_of("csv").unwrap().iter().all(|a| a.optional));
}

#[test]
fn test_bad_manifests_are_reported_and_skipped() {
    let dir = plugin_dir(&[
        ("a_unknown_base.toml", "name = \"docx\"\nbase = \"word\"\n"),
        ("b_broken.toml", "name = \"broken\"\nbase = "),
        ("c_first.toml", "name = \"lines\"\nbase = \"textfile\"\n"),
        ("d_second.toml", "name = \"lines\"\nbase = \"csv\"\n"),
        ("e_good.toml", SUBTITLES),
        ("notes.txt", "not a manifest"),
    ]);

    let registry = ParserRegistry::build(Some(dir.path()), PluginPrecedence::BuiltinsWin, None);

    let failed: Vec<String> = registry
        .load_failures()
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(failed, vec!["a_unknown_base.toml", "b_broken.toml", "d_second.toml"]);
    assert_eq!(registry.arguments_of("lines").unwrap().len(), 6);
    assert!(registry.resolve("subtitles").is_ok());
    assert!(registry.resolve("docx").is_err());
}

#[test]
fn test_missing_plugin_directory_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let registry = ParserRegistry::build(
        Some(&dir.path().join("absent")),
        PluginPrecedence::BuiltinsWin,
        None,
    );
    assert_eq!(registry.names().len(), 6);
    assert!(registry.load_failures().is_empty());
}

#[test]
fn test_rebuild_picks_up_new_manifests() {
    let dir = TempDir::new().unwrap();
    let before = ParserRegistry::build(Some(dir.path()), PluginPrecedence::BuiltinsWin, None);
    assert!(before.resolve("subtitles").is_err());

    write_file(dir.path(), "subtitles.toml", SUBTITLES);
    let after = ParserRegistry::build(Some(dir.path()), PluginPrecedence::BuiltinsWin, None);
    assert!(after.resolve("subtitles").is_ok());
}
