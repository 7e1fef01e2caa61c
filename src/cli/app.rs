//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use super::commands;
use rawtextcheck::core::models::Replacement;
use rawtextcheck::core::services::ResultFolderPolicy;
use rawtextcheck::output::OutputMode;
use rawtextcheck::paths;

/// rawtextcheck - Proofread the text inside game and localization files
#[derive(Parser, Debug)]
#[command(
    name = "rawtextcheck",
    version,
    about = "Proofread the text inside game and localization files",
    long_about = "Extract text lines from text, CSV, spreadsheet, PO and XML files and check them\n\
                  for invalid characters, banned words and grammar mistakes.\n\n\
                  Projects hold the per-game configuration; results are stored per analysed file."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Data directory (default: $RAWTEXTCHECK_HOME or ~/.rawtextcheck)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the available parsers and their arguments
    Parsers,

    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Analyse a file, a folder of files, or a remote spreadsheet
    Analyze {
        /// Project name
        project: String,

        /// File, folder, spreadsheet URL or identifier
        resource: String,
    },

    /// Inspect and clean stored results
    Results {
        #[command(subcommand)]
        action: ResultsAction,
    },

    /// Accept a finding: update the project and clear matching results
    #[command(group(ArgGroup::new("decision").required(true).multiple(false)))]
    Triage {
        /// Project name
        project: String,

        /// Analysed file name
        file: String,

        /// Accept a character as valid
        #[arg(long = "char", group = "decision")]
        character: Option<char>,

        /// Stop banning a word
        #[arg(long, group = "decision")]
        banword: Option<String>,

        /// Add a word to the dictionary
        #[arg(long, group = "decision")]
        spelling: Option<String>,

        /// Ignore a grammar rule
        #[arg(long, group = "decision")]
        rule: Option<String>,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ProjectAction {
    /// List projects
    List,

    /// Show a project's configuration
    Show {
        /// Project name
        name: String,
    },

    /// Create a project
    Create {
        /// Project name
        name: String,

        /// Grammar language code, e.g. en-US
        language: String,

        /// Parser name
        parser: String,

        /// Parser arguments, e.g. 'col="C" colID="A"'
        #[arg(short, long)]
        args: Option<String>,
    },

    /// Rename a project and move its results
    Rename {
        /// Current name
        old: String,

        /// New name
        new: String,
    },

    /// Delete a project
    Delete {
        /// Project name
        name: String,

        /// What to do with its results: keep, remove
        #[arg(long, default_value_t = ResultFolderPolicy::Keep)]
        results: ResultFolderPolicy,
    },

    /// Change a project's configuration
    Edit(EditArgs),
}

/// Targeted project changes; every flag may be repeated
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Project name
    pub name: String,

    /// Set the grammar language
    #[arg(long)]
    pub language: Option<String>,

    /// Set the parser
    #[arg(long)]
    pub parser: Option<String>,

    /// Set the parser arguments
    #[arg(long)]
    pub args: Option<String>,

    /// Add valid characters
    #[arg(long)]
    pub add_chars: Vec<String>,

    /// Remove valid characters
    #[arg(long)]
    pub remove_chars: Vec<String>,

    /// Add a dictionary word
    #[arg(long)]
    pub add_word: Vec<String>,

    /// Remove a dictionary word
    #[arg(long)]
    pub remove_word: Vec<String>,

    /// Add a banned word
    #[arg(long)]
    pub add_banword: Vec<String>,

    /// Remove a banned word
    #[arg(long)]
    pub remove_banword: Vec<String>,

    /// Add an ignored code
    #[arg(long)]
    pub add_code: Vec<String>,

    /// Remove an ignored code
    #[arg(long)]
    pub remove_code: Vec<String>,

    /// Add an ignored span
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    pub add_span: Vec<String>,

    /// Remove an ignored span
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    pub remove_span: Vec<String>,

    /// Replacement for the codes and spans given: space, nothing
    #[arg(long, default_value_t = Replacement::Space)]
    pub into: Replacement,

    /// Ignore a grammar rule
    #[arg(long)]
    pub add_rule: Vec<String>,

    /// Stop ignoring a grammar rule
    #[arg(long)]
    pub remove_rule: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum ResultsAction {
    /// List the analysed files of a project
    List {
        /// Project name
        project: String,
    },

    /// Show the stored findings of a file
    Show {
        /// Project name
        project: String,

        /// Analysed file name
        file: String,
    },

    /// Delete findings
    #[command(group(ArgGroup::new("selector").required(true).multiple(false).args(["id", "error_type", "category"])))]
    Delete {
        /// Project name
        project: String,

        /// Analysed file name
        file: String,

        /// One finding by identifier
        #[arg(long)]
        id: Option<String>,

        /// Every finding of a type
        #[arg(long = "type")]
        error_type: Option<String>,

        /// Every finding of a category (requires --token)
        #[arg(long, requires = "token")]
        category: Option<String>,

        /// Restrict --type or --category to a token
        #[arg(long)]
        token: Option<String>,
    },
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let home = cli.home.unwrap_or_else(paths::data_dir);

    match cli.command {
        Some(Command::Parsers) => commands::parsers(&home, output_mode),
        Some(Command::Project { action }) => commands::project(&home, action, output_mode),
        Some(Command::Analyze { project, resource }) => {
            commands::analyze(&home, &project, &resource, output_mode)
        }
        Some(Command::Results { action }) => commands::results(&home, action, output_mode),
        Some(Command::Triage {
            project,
            file,
            character,
            banword,
            spelling,
            rule,
        }) => {
            let action = commands::triage_action(character, banword, spelling, rule)?;
            commands::triage(&home, &project, &file, &action, output_mode)
        }
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!("{}", serde_json::json!({ "version": rawtextcheck::VERSION }));
            } else {
                println!("rawtextcheck v{}", rawtextcheck::VERSION);
            }
            Ok(())
        }
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": rawtextcheck::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("rawtextcheck v{}", rawtextcheck::VERSION);
                println!("\nRun 'rawtextcheck --help' for usage");
                println!("Run 'rawtextcheck project create <name> <language> <parser>' to get started");
            }
            Ok(())
        }
    }
}
