//! Analysis command

use std::path::Path;

use rawtextcheck::output::{self, OutputMode};
use rawtextcheck::worker::{Job, Worker, WorkerEvent};

use super::session;

/// Analyse a file, a remote spreadsheet, or every file of a folder
pub fn analyze(home: &Path, project: &str, resource: &str, mode: OutputMode) -> anyhow::Result<()> {
    let mut bench = session::open(home);

    let mut config = bench.config().clone();
    if config.ui.last_project.as_deref() != Some(project) {
        config.ui.last_project = Some(project.to_string());
        if let Err(err) = config.save_to(home) {
            log::warn!("Cannot save config: {err}");
        }
    }

    let folder = Path::new(resource);
    if !folder.is_dir() {
        let analysis = bench.analyze_file(project, resource)?;
        output::render_analysis(&analysis, mode);
        return Ok(());
    }

    let worker = Worker::spawn(bench);
    let submitted = worker.submit(Job::ProcessFolder {
        project: project.to_string(),
        folder: folder.to_path_buf(),
    });
    if !submitted {
        anyhow::bail!("Analysis worker is not running");
    }

    for event in worker.events() {
        match event {
            WorkerEvent::Analyzed(analysis) => output::render_analysis(&analysis, mode),
            WorkerEvent::FolderDone { processed, cancelled } => {
                if mode == OutputMode::Human {
                    let suffix = if cancelled { " (cancelled)" } else { "" };
                    println!("\n{processed} file(s) analysed{suffix}");
                }
                break;
            }
            WorkerEvent::Failed { target, error } => {
                anyhow::bail!("Analysis of {target} failed: {error}");
            }
        }
    }
    worker.shutdown();
    Ok(())
}
