//! Tests for the suppression engine

use rawtextcheck::core::models::{ParsedLine, Replacement};
use rawtextcheck::core::services::suppression::{SuppressionRules, clean, clean_text};

use crate::common::fixtures::{ProjectBuilder, lines};

fn rules_for(builder: ProjectBuilder) -> SuppressionRules {
    SuppressionRules::from_project(&builder.build())
}

// =============================================================================
// CODES
// =============================================================================

#[test]
fn test_codes_into_space_then_nothing() {
    let rules = rules_for(
        ProjectBuilder::new("p")
            .code(Replacement::Space, "\\n")
            .code(Replacement::Nothing, "[b]"),
    );
    assert_eq!(clean_text("Hello\\n[b]World", &rules), "Hello World");
}

#[test]
fn test_code_removed_everywhere() {
    let rules = rules_for(ProjectBuilder::new("p").code(Replacement::Nothing, "%s"));
    assert_eq!(clean_text("%s and %s", &rules), " and ");
}

// =============================================================================
// SPANS
// =============================================================================

#[test]
fn test_span_into_space() {
    let rules = rules_for(ProjectBuilder::new("p").span(Replacement::Space, "<", ">"));
    assert_eq!(clean_text("Hi<color=red>there", &rules), "Hi there");
}

#[test]
fn test_span_into_nothing_repeated() {
    let rules = rules_for(ProjectBuilder::new("p").span(Replacement::Nothing, "{", "}"));
    assert_eq!(clean_text("a{x}b{y}c", &rules), "abc");
}

#[test]
fn test_first_end_after_start_wins() {
    let rules = rules_for(
        ProjectBuilder::new("p")
            .span(Replacement::Nothing, "[", "]")
            .span(Replacement::Nothing, "[", "|"),
    );
    assert_eq!(clean_text("a[b|c]d", &rules), "ac]d");
}

#[test]
fn test_unterminated_span_runs_to_end_of_line() {
    let rules = rules_for(ProjectBuilder::new("p").span(Replacement::Nothing, "<", ">"));
    assert_eq!(clean_text("keep<lost", &rules), "keep");
}

#[test]
fn test_longest_start_wins() {
    let rules = rules_for(
        ProjectBuilder::new("p")
            .span(Replacement::Nothing, "<", ">")
            .span(Replacement::Nothing, "<<", ">>"),
    );
    assert_eq!(clean_text("a<<b>c>>d", &rules), "ad");
}

// =============================================================================
// LINES
// =============================================================================

#[test]
fn test_lines_left_empty_are_dropped() {
    let rules = rules_for(ProjectBuilder::new("p").code(Replacement::Nothing, "<br>"));
    let cleaned = clean(&lines(&["one", "<br>", "three"]), &rules);
    assert_eq!(
        cleaned,
        vec![ParsedLine::new("1", "one"), ParsedLine::new("3", "three")]
    );
}

#[test]
fn test_space_only_line_is_kept() {
    let rules = rules_for(ProjectBuilder::new("p").code(Replacement::Space, "<br>"));
    let cleaned = clean(&lines(&["<br>"]), &rules);
    assert_eq!(cleaned, vec![ParsedLine::new("1", " ")]);
}

#[test]
fn test_empty_rules_return_input_unchanged() {
    let input = lines(&["a<b>", "  c  "]);
    assert_eq!(clean(&input, &SuppressionRules::default()), input);
}

#[test]
fn test_lines_are_never_merged() {
    let rules = rules_for(ProjectBuilder::new("p").span(Replacement::Nothing, "<", ">"));
    let cleaned = clean(&lines(&["open <", "close > done"]), &rules);
    assert_eq!(
        cleaned,
        vec![ParsedLine::new("1", "open "), ParsedLine::new("2", "close > done")]
    );
}
