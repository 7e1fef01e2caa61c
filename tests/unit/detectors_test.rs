//! Tests for the detectors, grammar mapping in particular

use std::collections::BTreeSet;

use rawtextcheck::core::models::{ParsedLine, SPELLING_CATEGORY};
use rawtextcheck::core::ports::{GrammarChecker, GrammarError};
use rawtextcheck::core::services::detectors::{banwords, grammar, invalid_characters};

use crate::common::fixtures::lines;
use crate::common::mocks::MockGrammar;

fn ready(checker: MockGrammar) -> MockGrammar {
    let mut checker = checker;
    checker.initialize("en-US").unwrap();
    checker
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn test_invalid_and_banword_on_same_lines() {
    let input = lines(&["HELLO WORLD", "THIS IS BAD!"]);

    let invalid = invalid_characters(&input, "ABCDEFGHIJKLMNOPQRSTUVWXYZ ");
    assert_eq!(invalid.len(), 1);
    assert_eq!(invalid[0].row_id, "2");
    assert_eq!(invalid[0].error_token, "!");

    let banned = banwords(&input, &set(&["BAD"]));
    assert!(banned.is_empty(), "BAD! is not the token BAD");
}

#[test]
fn test_grammar_matches_map_back_to_their_lines() {
    let checker = ready(MockGrammar::new().flag("teh", "MORFOLOGIK_RULE_EN_US", SPELLING_CATEGORY, "the"));
    let input = vec![
        ParsedLine::new("a", "teh first"),
        ParsedLine::new("b", "fine"),
        ParsedLine::new("c", "and teh last"),
    ];

    let records = grammar(&input, &checker, &BTreeSet::new(), &BTreeSet::new()).unwrap();
    let rows: Vec<&str> = records.iter().map(|r| r.row_id.as_str()).collect();
    assert_eq!(rows, vec!["a", "c"]);
    assert!(records.iter().all(|r| r.is_spelling()));
    assert_eq!(records[1].line_text, "and teh last");
    assert_eq!(records[1].suggestion, "the");
    assert_eq!(records[1].error_type, "MORFOLOGIK_RULE_EN_US");
}

#[test]
fn test_grammar_offsets_count_characters() {
    let checker = ready(MockGrammar::new().flag("oops", "R", "grammar", "ok"));
    let input = lines(&["déjà vu", "oops"]);

    let records = grammar(&input, &checker, &BTreeSet::new(), &BTreeSet::new()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].row_id, "2");
}

#[test]
fn test_grammar_checks_all_lines_in_one_call() {
    let checker = ready(MockGrammar::new());
    let checks = checker.checks.clone();
    let input = lines(&["one", "two", "three"]);

    grammar(&input, &checker, &BTreeSet::new(), &BTreeSet::new()).unwrap();
    assert_eq!(checks.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn test_grammar_filters_dictionary_and_ignored_rules() {
    let checker = ready(
        MockGrammar::new()
            .flag("Zorg", "SPELL", SPELLING_CATEGORY, "Zorro")
            .flag("alot", "A_LOT", "typos", "a lot")
            .flag("wierd", "SPELL", SPELLING_CATEGORY, "weird"),
    );
    let input = lines(&["Zorg says alot", "so wierd"]);

    let records = grammar(&input, &checker, &set(&["Zorg"]), &set(&["A_LOT"])).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].error_token, "wierd");
}

#[test]
fn test_grammar_skips_empty_input() {
    let checker = MockGrammar::new();
    let checks = checker.checks.clone();
    let records = grammar(&[], &checker, &BTreeSet::new(), &BTreeSet::new()).unwrap();
    assert!(records.is_empty());
    assert_eq!(checks.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[test]
fn test_grammar_propagates_backend_error() {
    let checker = ready(MockGrammar::new().failing(GrammarError::Backend("down".into())));
    let err = grammar(&lines(&["x"]), &checker, &BTreeSet::new(), &BTreeSet::new()).unwrap_err();
    assert_eq!(err, GrammarError::Backend("down".into()));
}

#[test]
fn test_grammar_requires_initialization() {
    let checker = MockGrammar::new();
    let err = grammar(&lines(&["x"]), &checker, &BTreeSet::new(), &BTreeSet::new()).unwrap_err();
    assert_eq!(err, GrammarError::NotInitialized);
}
