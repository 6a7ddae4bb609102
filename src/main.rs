//! CLI entry point for versefetch.

use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::Parser;
use tracing::debug;

mod app_config;
mod cli;
mod commands;
mod terminal;

use cli::{Cli, Command};
use commands::{PassageQuery, Settings};

/// Process outcome mapped to the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// Everything requested was produced.
    Success,
    /// Some books were saved and some were not.
    Partial,
    /// Nothing was produced.
    Failure,
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        match exit {
            ProcessExit::Success => ExitCode::SUCCESS,
            ProcessExit::Partial => ExitCode::from(2),
            ProcessExit::Failure => ExitCode::FAILURE,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    terminal::init_tracing(terminal::default_log_level(cli.quiet, cli.verbose));
    debug!(?cli, "CLI arguments parsed");

    match run(&cli).await {
        Ok(exit) => exit.into(),
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<ProcessExit> {
    match &cli.command {
        Command::Translations => {
            commands::run_translations_command(cli.json)?;
            return Ok(ProcessExit::Success);
        }
        Command::Books { apocrypha } => {
            commands::run_books_command(*apocrypha, cli.json)?;
            return Ok(ProcessExit::Success);
        }
        _ => {}
    }

    let loaded = app_config::load_config(cli.config.as_deref())?;
    if loaded.loaded_from_file {
        debug!(path = ?loaded.path, "Loaded config file");
    }
    let settings = Settings::resolve(cli, &loaded.config);
    debug!(?settings, "Effective settings");

    let query = match &cli.command {
        Command::Verse {
            book,
            chapter,
            verse,
        } => PassageQuery::Verse {
            book,
            chapter: *chapter,
            verse: *verse,
        },
        Command::Range(range) => {
            if let Err(message) = range.validate() {
                bail!(message);
            }
            PassageQuery::Range {
                book: &range.book,
                chapter: range.chapter,
                start: range.start,
                end: range.end,
            }
        }
        Command::Chapter { book, chapter } => PassageQuery::Chapter {
            book,
            chapter: *chapter,
        },
        Command::Book { book } => PassageQuery::Book { book },
        Command::Batch(args) => return commands::run_batch_command(args, &settings).await,
        Command::Translations | Command::Books { .. } => return Ok(ProcessExit::Success),
    };

    commands::run_passage_command(query, &settings).await?;
    Ok(ProcessExit::Success)
}
