//! `batch` handler: progress bar, Ctrl-C, and stdin pause/resume/cancel.

use std::io::{self, BufRead, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};
use versefetch_core::batch::{BatchControl, BatchDownloader, BatchEvent, BatchReport};
use versefetch_core::catalog::batch_books;
use versefetch_core::fetch::Fetcher;

use super::{Settings, resolve_book};
use crate::cli::BatchArgs;
use crate::{ProcessExit, terminal};

/// A line typed on stdin while a batch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlCommand {
    Pause,
    Resume,
    Cancel,
}

fn parse_control_command(line: &str) -> Option<ControlCommand> {
    match line.trim().to_ascii_lowercase().as_str() {
        "pause" | "p" => Some(ControlCommand::Pause),
        "resume" | "r" => Some(ControlCommand::Resume),
        "cancel" | "c" | "quit" | "q" => Some(ControlCommand::Cancel),
        _ => None,
    }
}

/// Exports each requested book to `<out_dir>/<Book>_<translation>.json`.
pub(crate) async fn run_batch_command(
    args: &BatchArgs,
    settings: &Settings,
) -> Result<ProcessExit> {
    let mut requested = Vec::with_capacity(args.books.len());
    for input in &args.books {
        requested.push(resolve_book(input)?.to_string());
    }

    let translation = settings.translation.as_str();
    let books = batch_books(&requested, translation);
    for skipped in requested.iter().filter(|book| !books.contains(&book.as_str())) {
        warn!(book = %skipped, translation, "Translation has no deuterocanonical books; skipping");
    }
    if books.is_empty() {
        println!("No books to download.");
        return Ok(ProcessExit::Success);
    }

    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| settings.output_dir.clone());
    let fetcher =
        Fetcher::new(settings.fetcher.clone()).context("Failed to initialize passage fetcher")?;

    let control = BatchControl::new();
    spawn_interrupt_listener(control.clone());
    spawn_stdin_listener(control.clone());

    let progress = progress_bar(books.len(), settings.quiet);
    info!(books = books.len(), translation, out_dir = %out_dir.display(), "Starting batch");

    let report = BatchDownloader::new(fetcher)
        .run(&books, translation, &out_dir, &control, |event| {
            show_event(&progress, event);
        })
        .await;
    progress.finish_and_clear();

    print_summary(&report, &out_dir);
    Ok(exit_outcome(&report))
}

fn spawn_interrupt_listener(control: BatchControl) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received; stopping after the current book");
            control.cancel();
        }
    });
}

/// Reads control lines on a detached thread so a blocked read never holds up exit.
fn spawn_stdin_listener(control: BatchControl) {
    let spawned = std::thread::Builder::new()
        .name("batch-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                match parse_control_command(&line) {
                    Some(ControlCommand::Pause) => control.pause(),
                    Some(ControlCommand::Resume) => control.resume(),
                    Some(ControlCommand::Cancel) => {
                        control.cancel();
                        break;
                    }
                    None => debug!(line = %line, "Ignoring unknown batch control input"),
                }
            }
        });
    if let Err(error) = spawned {
        warn!(error = %error, "Could not start stdin control listener");
    }
}

fn progress_bar(total: usize, quiet: bool) -> ProgressBar {
    if !terminal::should_show_progress(
        io::stderr().is_terminal(),
        quiet,
        terminal::is_dumb_terminal(),
    ) {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX));
    bar.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

fn show_event(progress: &ProgressBar, event: &BatchEvent) {
    match event {
        BatchEvent::Started { book, index, total } => {
            progress.set_message(format!("Fetching {book} ({}/{total})", index + 1));
        }
        BatchEvent::Paused { book } => {
            progress.set_message(format!("Paused before {book}; type 'resume' to continue"));
        }
        BatchEvent::Saved { path, items, .. } => {
            progress.inc(1);
            progress.suspend(|| println!("Saved {} ({items} items)", path.display()));
        }
        BatchEvent::Failed { book, error } => {
            progress.inc(1);
            progress.suspend(|| eprintln!("Failed {book}: {error}"));
        }
        BatchEvent::Cancelled => progress.set_message("Cancelled"),
    }
}

fn print_summary(report: &BatchReport, out_dir: &Path) {
    let status = if report.cancelled { "cancelled" } else { "complete" };
    println!(
        "Batch {status}: {} saved, {} failed (output: {})",
        report.saved.len(),
        report.failed.len(),
        out_dir.display()
    );
}

/// Success when nothing failed; partial when something was saved.
fn exit_outcome(report: &BatchReport) -> ProcessExit {
    let saved = report.saved.len();
    if report.failed.is_empty() && !report.cancelled {
        ProcessExit::Success
    } else if saved > 0 {
        ProcessExit::Partial
    } else {
        ProcessExit::Failure
    }
}
