//! Output formatting for human and JSON modes
//!
//! Every command result can be rendered either as coloured human-readable
//! text or as pretty-printed JSON.

use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::core::models::{BANWORD, ErrorRecord, INVALID_CHARACTER, ParserArgument, Project, ResultSet};
use crate::core::services::{Analysis, AnalysisStatus, TriageOutcome};
use crate::parsers::{ParserOrigin, PluginLoadFailure};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// GENERIC
// =============================================================================

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Successful operation
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Operation that changed nothing
    #[must_use]
    pub fn unchanged(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human if self.success => println!("{}", self.message.green()),
            OutputMode::Human => println!("{}", self.message.yellow()),
            OutputMode::Json => print_json(self),
        }
    }
}

// =============================================================================
// ANALYSIS AND RESULTS
// =============================================================================

fn status_label(status: &AnalysisStatus) -> ColoredString {
    match status {
        AnalysisStatus::Complete => status.to_string().green(),
        AnalysisStatus::Partial { .. } => status.to_string().yellow(),
        AnalysisStatus::NoResults { .. } => status.to_string().red(),
    }
}

fn type_label(record: &ErrorRecord) -> ColoredString {
    if record.is_spelling() {
        record.error_type.magenta()
    } else if record.error_type == INVALID_CHARACTER || record.error_type == BANWORD {
        record.error_type.red()
    } else {
        record.error_type.yellow()
    }
}

fn print_records(results: &ResultSet) {
    for (id, record) in results.iter() {
        println!(
            "  {} {} {}",
            format!("[{id}]").bold(),
            type_label(record),
            format!("'{}'", record.error_token).cyan()
        );
        println!("      {}", record.line_text);
        println!("      {}", record.explanation.dimmed());
        if !record.suggestion.is_empty() {
            println!("      {} {}", "=>".green(), record.suggestion.green());
        }
    }
}

/// Render one analysis
pub fn render_analysis(analysis: &Analysis, mode: OutputMode) {
    if mode == OutputMode::Json {
        print_json(analysis);
        return;
    }
    println!(
        "{} ({} lines, {} findings, {})",
        analysis.file_name.bold(),
        analysis.lines_analyzed,
        analysis.results.len(),
        status_label(&analysis.status)
    );
    print_records(&analysis.results);
}

/// Stored results of one file
#[derive(Debug, Serialize)]
pub struct ResultsView<'a> {
    /// Project name
    pub project: &'a str,
    /// File name
    pub file: &'a str,
    /// Findings
    pub results: &'a ResultSet,
}

impl ResultsView<'_> {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if self.results.is_empty() {
                    println!("No findings for {}/{}.", self.project, self.file);
                    return;
                }
                println!("{}/{}: {} finding(s)", self.project, self.file.bold(), self.results.len());
                print_records(self.results);
            }
            OutputMode::Json => print_json(self),
        }
    }
}

/// Render the analysed files of a project
pub fn render_files(project: &str, files: &[String], mode: OutputMode) {
    if mode == OutputMode::Json {
        print_json(&serde_json::json!({ "project": project, "files": files }));
        return;
    }
    if files.is_empty() {
        println!("No results stored for {project}.");
        return;
    }
    for file in files {
        println!("  {file}");
    }
}

/// Render a triage outcome
pub fn render_triage(outcome: &TriageOutcome, mode: OutputMode) {
    match mode {
        OutputMode::Human => {
            let project = if outcome.project_changed {
                "project updated".green()
            } else {
                "project unchanged".dimmed()
            };
            println!("{project}, {} finding(s) cleared", outcome.records_removed);
        }
        OutputMode::Json => print_json(outcome),
    }
}

// =============================================================================
// PROJECTS
// =============================================================================

/// A project with its name, which the stored form keeps as a key
#[derive(Debug, Serialize)]
pub struct ProjectView<'a> {
    /// Project name
    pub name: &'a str,
    /// Configuration
    #[serde(flatten)]
    pub project: &'a Project,
}

impl<'a> From<&'a Project> for ProjectView<'a> {
    fn from(project: &'a Project) -> Self {
        Self {
            name: &project.name,
            project,
        }
    }
}

fn join<'a>(values: impl IntoIterator<Item = &'a String>) -> String {
    values.into_iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Render a project list
pub fn render_projects(projects: &[Project], mode: OutputMode) {
    if mode == OutputMode::Json {
        let views: Vec<ProjectView<'_>> = projects.iter().map(ProjectView::from).collect();
        print_json(&views);
        return;
    }
    if projects.is_empty() {
        println!("No projects.");
        println!("Create one with: rawtextcheck project create <name> <language> <parser>");
        return;
    }
    for project in projects {
        println!("  {} [{}] {}", project.name.bold(), project.language, project.parser.cyan());
    }
}

/// Render one project in full
pub fn render_project(project: &Project, mode: OutputMode) {
    if mode == OutputMode::Json {
        print_json(&ProjectView::from(project));
        return;
    }
    println!("{}", project.name.bold());
    println!("  language: {}", project.language);
    println!("  parser: {} {}", project.parser.cyan(), project.arg_parser);
    println!("  valid characters: {}", project.valid_characters);
    println!("  dictionary: {}", join(&project.dictionary));
    println!("  banwords: {}", join(&project.banwords));
    println!("  codes into space: {}", join(&project.ignored_codes_into_space));
    println!("  codes into nothing: {}", join(&project.ignored_codes_into_nothing));
    for (label, rules) in [
        ("substrings into space", &project.ignored_substrings_into_space),
        ("substrings into nothing", &project.ignored_substrings_into_nothing),
    ] {
        println!("  {label}:");
        for (start, ends) in rules {
            println!("    {start} .. {}", join(ends));
        }
    }
    println!("  ignored rules: {}", join(&project.ignored_rules));
}

// =============================================================================
// PARSERS
// =============================================================================

/// A registered parser
#[derive(Debug, Serialize)]
pub struct ParserInfo {
    /// Registry name
    pub name: String,
    /// Built-in or plugin
    pub origin: Option<ParserOrigin>,
    /// Argument signature
    pub arguments: Vec<ParserArgument>,
}

/// Registry listing
#[derive(Debug, Serialize)]
pub struct ParserListResult<'a> {
    /// Registered parsers
    pub parsers: Vec<ParserInfo>,
    /// Manifests that were skipped
    pub failures: &'a [PluginLoadFailure],
}

impl ParserListResult<'_> {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        if mode == OutputMode::Json {
            print_json(self);
            return;
        }
        for parser in &self.parsers {
            let args: Vec<String> = parser
                .arguments
                .iter()
                .map(|a| if a.optional { format!("[{}]", a.name) } else { a.name.clone() })
                .collect();
            let origin = match parser.origin {
                Some(ParserOrigin::Plugin) => " (plugin)".cyan(),
                _ => "".normal(),
            };
            println!("  {}{origin} {}", parser.name.bold(), args.join(" "));
        }
        for failure in self.failures {
            println!(
                "  {} {}: {}",
                "skipped".yellow(),
                failure.path.display(),
                failure.reason
            );
        }
    }
}
