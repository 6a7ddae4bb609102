//! Subcommand handlers and the settings they share.

mod batch;
mod listing;
mod passage;

pub(crate) use batch::run_batch_command;
pub(crate) use listing::{run_books_command, run_translations_command};
pub(crate) use passage::{PassageQuery, run_passage_command};

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use tracing::warn;
use versefetch_core::catalog::{
    apocrypha_translation, canonical_book_name, find_translation, is_deuterocanonical,
    suggest_book, supports_apocrypha,
};
use versefetch_core::fetch::{FetcherConfig, HttpSettings};
use versefetch_core::passage::DEFAULT_TRANSLATION;

use crate::app_config::FileConfig;
use crate::cli::Cli;

/// Effective settings after merging flags, config file, and defaults.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub translation: String,
    pub fetcher: FetcherConfig,
    pub output_dir: PathBuf,
    pub json: bool,
    pub output: Option<PathBuf>,
    pub quiet: bool,
}

impl Settings {
    /// Flag > config file > built-in default.
    pub(crate) fn resolve(cli: &Cli, file: &FileConfig) -> Self {
        let translation = cli
            .translation
            .clone()
            .or_else(|| file.translation.clone())
            .map_or_else(
                || DEFAULT_TRANSLATION.to_string(),
                |code| code.trim().to_ascii_uppercase(),
            );
        if find_translation(&translation).is_none() {
            warn!(translation = %translation, "Unknown translation code; passing it through");
        }

        let mut fetcher = FetcherConfig::default();
        if let Some(base_url) = &file.base_url {
            fetcher.base_url.clone_from(base_url);
        }
        if let Some(delay_ms) = cli.delay_ms.or(file.delay_ms) {
            fetcher.request_delay = Duration::from_millis(delay_ms);
        }
        let defaults = HttpSettings::default();
        fetcher.http = HttpSettings {
            user_agent: file.user_agent.clone().unwrap_or(defaults.user_agent),
            connect_timeout: file
                .connect_timeout_secs
                .map_or(defaults.connect_timeout, Duration::from_secs),
            read_timeout: file
                .read_timeout_secs
                .map_or(defaults.read_timeout, Duration::from_secs),
        };

        Self {
            translation,
            fetcher,
            output_dir: file
                .output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
            json: cli.json,
            output: cli.output.clone(),
            quiet: cli.quiet,
        }
    }
}

/// Catalog spelling of a book name, or an error with a suggestion.
pub(crate) fn resolve_book(input: &str) -> Result<&'static str> {
    if let Some(book) = canonical_book_name(input) {
        return Ok(book);
    }
    match suggest_book(input) {
        Some(suggestion) => bail!("Unknown book '{}'. Did you mean '{suggestion}'?", input.trim()),
        None => bail!(
            "Unknown book '{}'. Run `versefetch books --apocrypha` for the list",
            input.trim()
        ),
    }
}

/// Translation to use for `book`, switching when the book needs the apocrypha.
pub(crate) fn translation_for_book(book: &str, translation: &str) -> String {
    if is_deuterocanonical(book) && !supports_apocrypha(translation) {
        let fallback = apocrypha_translation().code;
        warn!(
            book,
            requested = translation,
            using = fallback,
            "Translation has no deuterocanonical books; switching"
        );
        return fallback.to_string();
    }
    translation.to_string()
}
