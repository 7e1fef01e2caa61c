//! Analysis pipeline
//!
//! Parse, clean, detect, aggregate. One invocation analyses one resource
//! for one project; every collaborator comes in through an
//! [`AnalysisContext`].
//!
//! Configuration problems are returned as [`AnalysisError`]. Resource
//! problems are logged and reported through [`AnalysisStatus`], so a bad
//! file never aborts a batch.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use super::aggregator::aggregate;
use super::detectors;
use super::grammar_session::GrammarSession;
use super::suppression::{SuppressionRules, clean};
use crate::core::models::{ArgumentError, Project, ProjectError, ResultSet};
use crate::core::ports::{
    GrammarError, ParseError, ParserLookup, ProjectStore, RegistryError, ResultStore, StoreError,
};

/// Errors that stop an analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No project with this name
    #[error("unknown project '{0}'")]
    UnknownProject(String),

    /// The project's parser is not registered
    #[error(transparent)]
    Parser(#[from] RegistryError),

    /// The project's parser arguments are missing or invalid
    #[error(transparent)]
    Arguments(#[from] ArgumentError),

    /// The grammar checker was used before initialization
    #[error(transparent)]
    Grammar(GrammarError),

    /// Loading the project or saving results failed
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AnalysisError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Project(ProjectError::NotFound(name)) => Self::UnknownProject(name),
            other => Self::Store(other),
        }
    }
}

impl AnalysisError {
    /// Whether the error comes from project configuration
    #[must_use]
    pub const fn is_config(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

/// How complete an analysis is
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisStatus {
    /// Every detector ran
    Complete,
    /// Some detector could not run; results hold the others' findings
    Partial {
        /// What was skipped and why
        reason: String,
    },
    /// The resource could not be read; nothing was produced
    NoResults {
        /// Cause
        reason: String,
    },
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Partial { reason } => write!(f, "partial ({reason})"),
            Self::NoResults { reason } => write!(f, "no results ({reason})"),
        }
    }
}

/// Outcome of one analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Name the results are stored and displayed under
    pub file_name: String,
    /// Findings
    pub results: ResultSet,
    /// Completeness
    pub status: AnalysisStatus,
    /// Lines left after suppression
    pub lines_analyzed: usize,
}

impl Analysis {
    fn no_results(file_name: String, reason: String) -> Self {
        Self {
            file_name,
            results: ResultSet::new(),
            status: AnalysisStatus::NoResults { reason },
            lines_analyzed: 0,
        }
    }
}

/// Collaborators of one analysis run
///
/// The grammar session outlives the run so its language initialization is
/// reused by the next one.
pub struct AnalysisContext<'a> {
    /// Parser lookup
    pub parsers: &'a dyn ParserLookup,
    /// Grammar checker session
    pub grammar: &'a mut GrammarSession,
}

impl fmt::Debug for AnalysisContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisContext")
            .field("parsers", &self.parsers.names())
            .field("grammar", &self.grammar)
            .finish()
    }
}

/// Base name of a resource path, or the resource itself
#[must_use]
pub fn base_name(resource: &str) -> String {
    Path::new(resource)
        .file_name()
        .map_or_else(|| resource.to_string(), |n| n.to_string_lossy().into_owned())
}

/// Analyse one resource with a project's configuration
pub fn analyze(
    ctx: &mut AnalysisContext<'_>,
    project: &Project,
    resource: &str,
) -> Result<Analysis, AnalysisError> {
    let parser = ctx.parsers.resolve(&project.parser)?;
    let arguments = project.arguments();
    arguments.check_signature(&parser.arguments())?;

    let file_name = parser
        .display_name(resource)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| base_name(resource));

    let mut skipped = Vec::new();
    let grammar_ready = match ctx.grammar.prepare(&project.language) {
        Ok(()) => true,
        Err(GrammarError::NotInitialized) => {
            return Err(AnalysisError::Grammar(GrammarError::NotInitialized));
        }
        Err(err) => {
            log::warn!("Grammar check skipped for {file_name}: {err}");
            skipped.push(format!("grammar: {err}"));
            false
        }
    };

    let lines = match parser.parse(resource, &arguments) {
        Ok(lines) => lines,
        Err(ParseError::Config(err)) => return Err(err.into()),
        Err(err @ ParseError::Resource { .. }) => {
            log::warn!("{err}");
            return Ok(Analysis::no_results(file_name, err.to_string()));
        }
    };
    log::debug!("{} produced {} lines from {resource}", parser.name(), lines.len());

    let cleaned = clean(&lines, &SuppressionRules::from_project(project));
    let grammar = if grammar_ready {
        Some(ctx.grammar.checker())
    } else {
        None
    };

    let ((invalid, banned), grammar_found) = rayon::join(
        || {
            rayon::join(
                || detectors::invalid_characters(&cleaned, &project.valid_characters),
                || detectors::banwords(&cleaned, &project.banwords),
            )
        },
        || {
            grammar.map(|checker| {
                detectors::grammar(&cleaned, checker, &project.dictionary, &project.ignored_rules)
            })
        },
    );

    let grammar_records = match grammar_found {
        None => Vec::new(),
        Some(Ok(records)) => records,
        Some(Err(GrammarError::NotInitialized)) => {
            return Err(AnalysisError::Grammar(GrammarError::NotInitialized));
        }
        Some(Err(err)) => {
            log::warn!("Grammar check failed for {file_name}: {err}");
            skipped.push(format!("grammar: {err}"));
            Vec::new()
        }
    };

    let results = aggregate(vec![invalid, banned, grammar_records], &lines);
    let status = if skipped.is_empty() {
        AnalysisStatus::Complete
    } else {
        AnalysisStatus::Partial {
            reason: skipped.join("; "),
        }
    };
    Ok(Analysis {
        file_name,
        results,
        status,
        lines_analyzed: cleaned.len(),
    })
}

/// Analyse a resource for a stored project and persist its results
///
/// Results are saved unless nothing could be produced.
pub fn analyze_and_store(
    ctx: &mut AnalysisContext<'_>,
    projects: &dyn ProjectStore,
    results: &dyn ResultStore,
    project_name: &str,
    resource: &str,
) -> Result<Analysis, AnalysisError> {
    let project = projects.get(project_name)?;
    let analysis = analyze(ctx, &project, resource)?;
    if matches!(analysis.status, AnalysisStatus::NoResults { .. }) {
        return Ok(analysis);
    }
    results.save(&project.name, &analysis.file_name, &analysis.results)?;
    log::info!(
        "Saved {} findings for {}/{}",
        analysis.results.len(),
        project.name,
        analysis.file_name
    );
    Ok(analysis)
}
