//! `verse`, `range`, `chapter`, and `book` handlers.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use versefetch_core::export::{render_text, to_json_string, write_json};
use versefetch_core::fetch::{FetchError, Fetcher};
use versefetch_core::passage::ContentItem;

use super::{Settings, resolve_book, translation_for_book};
use crate::terminal;

/// Page markup of the most recent extraction failure, kept for inspection.
pub(crate) const FAILED_PASSAGE_FILE: &str = "last_failed_passage.html";

/// A single-page or whole-book lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PassageQuery<'a> {
    Verse {
        book: &'a str,
        chapter: u32,
        verse: u32,
    },
    Range {
        book: &'a str,
        chapter: u32,
        start: u32,
        end: u32,
    },
    Chapter {
        book: &'a str,
        chapter: u32,
    },
    Book {
        book: &'a str,
    },
}

impl PassageQuery<'_> {
    fn book(&self) -> &str {
        match self {
            Self::Verse { book, .. }
            | Self::Range { book, .. }
            | Self::Chapter { book, .. }
            | Self::Book { book } => *book,
        }
    }
}

/// Fetches the passage and prints or saves the items.
pub(crate) async fn run_passage_command(
    query: PassageQuery<'_>,
    settings: &Settings,
) -> Result<()> {
    let book = resolve_book(query.book())?;
    let translation = translation_for_book(book, &settings.translation);
    let fetcher =
        Fetcher::new(settings.fetcher.clone()).context("Failed to initialize passage fetcher")?;

    let result = match query {
        PassageQuery::Verse { chapter, verse, .. } => {
            fetcher.fetch_verse(book, chapter, verse, &translation).await
        }
        PassageQuery::Range {
            chapter, start, end, ..
        } => {
            fetcher
                .fetch_verse_range(book, chapter, start, end, &translation)
                .await
        }
        PassageQuery::Chapter { chapter, .. } => {
            fetcher.fetch_chapter(book, chapter, &translation).await
        }
        PassageQuery::Book { .. } => {
            Ok(fetch_book_with_spinner(&fetcher, book, &translation, settings.quiet).await)
        }
    };

    let items = settle(result, &settings.output_dir)?;
    emit(&items, settings)
}

async fn fetch_book_with_spinner(
    fetcher: &Fetcher,
    book: &str,
    translation: &str,
    quiet: bool,
) -> Vec<ContentItem> {
    let spinner = if terminal::should_show_progress(
        io::stderr().is_terminal(),
        quiet,
        terminal::is_dumb_terminal(),
    ) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    } else {
        ProgressBar::hidden()
    };
    spinner.set_message(format!("Fetching {book} ({translation})..."));

    let aggregate = fetcher.fetch_book(book, translation).await;
    spinner.finish_and_clear();
    info!(book, chapters = aggregate.chapters().len(), "Book fetched");
    aggregate.into_items()
}

/// Keeps the markup of an extraction failure before surfacing the error.
fn settle(
    result: Result<Vec<ContentItem>, FetchError>,
    dump_dir: &Path,
) -> Result<Vec<ContentItem>> {
    let error = match result {
        Ok(items) => return Ok(items),
        Err(error) => error,
    };
    let Some(markup) = error.failed_markup() else {
        return Err(anyhow::Error::new(error).context("Passage fetch failed"));
    };

    let path = dump_dir.join(FAILED_PASSAGE_FILE);
    match save_failed_markup(&path, markup) {
        Ok(()) => {
            let context = format!("Passage fetch failed; page saved to {}", path.display());
            Err(anyhow::Error::new(error).context(context))
        }
        Err(save_error) => {
            warn!(path = %path.display(), error = %save_error, "Could not save failed page markup");
            Err(anyhow::Error::new(error).context("Passage fetch failed"))
        }
    }
}

fn save_failed_markup(path: &Path, markup: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, markup)
}

fn emit(items: &[ContentItem], settings: &Settings) -> Result<()> {
    if items.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    if let Some(path) = &settings.output {
        write_json(path, items)?;
        println!("Saved {} items to {}", items.len(), path.display());
        return Ok(());
    }

    let mut stdout = io::stdout().lock();
    if settings.json {
        writeln!(stdout, "{}", to_json_string(items)?)?;
    } else {
        write!(stdout, "{}", render_text(items))?;
    }
    stdout.flush()?;
    Ok(())
}
