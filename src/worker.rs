//! Background analysis
//!
//! A [`Workbench`] owns everything one analysis needs: the stores, the
//! grammar session and the parser registry settings. The registry is rebuilt
//! for every call so plugin manifests added in the meantime are picked up.
//!
//! A [`Worker`] moves a workbench onto its own thread and drives it with
//! [`Job`] messages, reporting [`WorkerEvent`]s back. Only one analysis runs
//! at a time; folders are processed one file after the other and can be
//! cancelled between files.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use walkdir::WalkDir;

use crate::adapters::{JsonProjectStore, JsonResultStore};
use crate::config::AppConfig;
use crate::core::ports::SpreadsheetAccess;
use crate::core::services::{Analysis, AnalysisContext, AnalysisError, GrammarSession, analyze_and_store};
use crate::parsers::ParserRegistry;

// =============================================================================
// CANCELLATION
// =============================================================================

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Fresh, not cancelled token
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear a previous request
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// =============================================================================
// WORKBENCH
// =============================================================================

/// Outcome of a folder run
#[derive(Debug, Default)]
pub struct FolderReport {
    /// Analyses in processing order
    pub analyses: Vec<Analysis>,
    /// Whether the run stopped early
    pub cancelled: bool,
}

/// Stores, grammar session and registry settings of one data directory
pub struct Workbench {
    root: PathBuf,
    config: AppConfig,
    projects: JsonProjectStore,
    results: JsonResultStore,
    grammar: GrammarSession,
    spreadsheet: Option<Arc<dyn SpreadsheetAccess>>,
}

impl fmt::Debug for Workbench {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workbench")
            .field("root", &self.root)
            .field("grammar", &self.grammar)
            .field("spreadsheet", &self.spreadsheet.is_some())
            .finish_non_exhaustive()
    }
}

/// Regular files directly inside a folder, sorted by name
#[must_use]
pub fn folder_files(folder: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    files
}

impl Workbench {
    /// Workbench over a data directory
    #[must_use]
    pub fn new(
        root: &Path,
        config: AppConfig,
        grammar: GrammarSession,
        spreadsheet: Option<Arc<dyn SpreadsheetAccess>>,
    ) -> Self {
        Self {
            root: root.to_path_buf(),
            projects: JsonProjectStore::new(root),
            results: JsonResultStore::new(root),
            config,
            grammar,
            spreadsheet,
        }
    }

    /// Data directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Configuration in effect
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Project store
    #[must_use]
    pub const fn projects(&self) -> &JsonProjectStore {
        &self.projects
    }

    /// Result store
    #[must_use]
    pub const fn results(&self) -> &JsonResultStore {
        &self.results
    }

    /// Registry with a fresh plugin scan
    #[must_use]
    pub fn registry(&self) -> ParserRegistry {
        let plugin_dir = self.config.plugin_dir(&self.root);
        ParserRegistry::build(
            Some(&plugin_dir),
            self.config.parsers.precedence,
            self.spreadsheet.clone(),
        )
    }

    /// Analyse one resource and store its results
    pub fn analyze_file(&mut self, project: &str, resource: &str) -> Result<Analysis, AnalysisError> {
        let registry = self.registry();
        let mut ctx = AnalysisContext {
            parsers: &registry,
            grammar: &mut self.grammar,
        };
        analyze_and_store(&mut ctx, &self.projects, &self.results, project, resource)
    }

    /// Analyse every regular file of a folder, one at a time
    ///
    /// `on_file` sees each analysis as soon as it is stored. Cancellation is
    /// checked before each file; a configuration error stops the run.
    pub fn process_folder(
        &mut self,
        project: &str,
        folder: &Path,
        cancel: &CancelToken,
        on_file: &mut dyn FnMut(&Analysis),
    ) -> Result<FolderReport, AnalysisError> {
        let registry = self.registry();
        let mut report = FolderReport::default();
        for file in folder_files(folder) {
            if cancel.is_cancelled() {
                log::info!("Folder analysis cancelled after {} files", report.analyses.len());
                report.cancelled = true;
                break;
            }
            let resource = file.to_string_lossy();
            let mut ctx = AnalysisContext {
                parsers: &registry,
                grammar: &mut self.grammar,
            };
            let analysis = analyze_and_store(&mut ctx, &self.projects, &self.results, project, &resource)?;
            on_file(&analysis);
            report.analyses.push(analysis);
        }
        Ok(report)
    }
}

// =============================================================================
// WORKER THREAD
// =============================================================================

/// Work for the background thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    /// Analyse one resource
    AnalyzeFile {
        /// Project name
        project: String,
        /// File path or remote identifier
        resource: String,
    },
    /// Analyse a folder
    ProcessFolder {
        /// Project name
        project: String,
        /// Folder path
        folder: PathBuf,
    },
}

/// Progress reported by the background thread
#[derive(Debug)]
pub enum WorkerEvent {
    /// One resource was analysed
    Analyzed(Box<Analysis>),
    /// A job stopped on an error
    Failed {
        /// Project or resource involved
        target: String,
        /// Error message
        error: String,
    },
    /// A folder run ended
    FolderDone {
        /// Files analysed
        processed: usize,
        /// Whether it was cancelled
        cancelled: bool,
    },
}

/// Handle to the background analysis thread
#[derive(Debug)]
pub struct Worker {
    jobs: Option<Sender<Job>>,
    events: Receiver<WorkerEvent>,
    cancel: CancelToken,
    handle: Option<JoinHandle<()>>,
}

fn run_job(bench: &mut Workbench, job: Job, cancel: &CancelToken, events: &Sender<WorkerEvent>) {
    match job {
        Job::AnalyzeFile { project, resource } => {
            let event = match bench.analyze_file(&project, &resource) {
                Ok(analysis) => WorkerEvent::Analyzed(Box::new(analysis)),
                Err(err) => WorkerEvent::Failed {
                    target: resource,
                    error: err.to_string(),
                },
            };
            let _ = events.send(event);
        }
        Job::ProcessFolder { project, folder } => {
            let mut forward = |analysis: &Analysis| {
                let _ = events.send(WorkerEvent::Analyzed(Box::new(analysis.clone())));
            };
            let event = match bench.process_folder(&project, &folder, cancel, &mut forward) {
                Ok(report) => WorkerEvent::FolderDone {
                    processed: report.analyses.len(),
                    cancelled: report.cancelled,
                },
                Err(err) => WorkerEvent::Failed {
                    target: folder.display().to_string(),
                    error: err.to_string(),
                },
            };
            // A request made while the job was queued applies to it, so the
            // flag is only cleared once the run is over.
            cancel.reset();
            let _ = events.send(event);
        }
    }
}

impl Worker {
    /// Move a workbench onto a new thread
    #[must_use]
    pub fn spawn(mut bench: Workbench) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (event_tx, event_rx) = mpsc::channel();
        let cancel = CancelToken::new();
        let thread_cancel = cancel.clone();
        let handle = thread::spawn(move || {
            for job in job_rx {
                log::debug!("Worker picked up {job:?}");
                run_job(&mut bench, job, &thread_cancel, &event_tx);
            }
            log::debug!("Worker stopping");
        });
        Self {
            jobs: Some(job_tx),
            events: event_rx,
            cancel,
            handle: Some(handle),
        }
    }

    /// Queue a job; false when the thread is gone
    pub fn submit(&self, job: Job) -> bool {
        self.jobs.as_ref().is_some_and(|jobs| jobs.send(job).is_ok())
    }

    /// Stop the running or next queued folder job before its next file
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Progress events
    #[must_use]
    pub const fn events(&self) -> &Receiver<WorkerEvent> {
        &self.events
    }

    /// Finish queued jobs and join the thread
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.jobs.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            log::error!("Worker thread panicked");
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.stop();
    }
}
