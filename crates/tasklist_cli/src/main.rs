//! `tasklist` command-line view.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open durable storage.
//! - Forward one user intent per invocation to the task list controller.

mod commands;
mod config;
mod render;

use clap::{Parser, Subcommand};
use commands::{execute, CommandError, Intent};
use config::CliConfig;
use log::{info, warn};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tasklist_core::{init_logging, SqliteTaskStore, TaskFilter, TaskListController, TaskStatus};

#[derive(Debug, Parser)]
#[command(name = "tasklist", version, about = "Single-list task editor")]
struct Cli {
    /// SQLite database file holding the task list.
    #[arg(long, env = "TASKLIST_DB", global = true)]
    db: Option<PathBuf>,

    /// Directory for rolling log files.
    #[arg(long, env = "TASKLIST_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "TASKLIST_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a new undone task.
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Show the board.
    List {
        /// all|completed|pending|undone
        #[arg(long, short, default_value = "all")]
        filter: TaskFilter,
    },
    /// Replace a task's text.
    Edit {
        id: String,
        #[arg(num_args = 0..)]
        text: Vec<String>,
    },
    /// Move a task to undone|inProgress|done.
    Status { id: String, status: TaskStatus },
    /// Delete a task permanently.
    Rm {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Print version information.
    Version,
}

impl Command {
    fn into_intent(self) -> Option<Intent> {
        let intent = match self {
            Self::Add { text } => Intent::Add {
                text: text.join(" "),
            },
            Self::List { filter } => Intent::List { filter },
            Self::Edit { id, text } => Intent::Edit {
                id,
                text: text.join(" "),
            },
            Self::Status { id, status } => Intent::SetStatus { id, status },
            Self::Rm { id, yes } => Intent::Remove {
                id,
                assume_yes: yes,
            },
            Self::Version => return None,
        };
        Some(intent)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(intent) = cli.command.into_intent() else {
        println!("tasklist {}", tasklist_core::core_version());
        return ExitCode::SUCCESS;
    };

    let config = match CliConfig::resolve(cli.db, cli.log_dir, cli.log_level) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    // Logging is best-effort; the editor still works without it.
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    if let Err(err) = config.ensure_db_parent() {
        eprintln!("error: {err}");
        return ExitCode::from(2);
    }
    let store = match SqliteTaskStore::open(&config.db_path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("error: cannot open `{}`: {err}", config.db_path.display());
            return ExitCode::from(2);
        }
    };

    let mut controller = TaskListController::initialize(store);
    info!(
        "event=cli_command module=cli status=start intent={}",
        intent.kind()
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();
    match execute(&mut controller, intent, &mut input, &mut output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ CommandError::Validation(_)) => {
            eprintln!("{err}");
            ExitCode::from(1)
        }
        Err(err) => {
            warn!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}
