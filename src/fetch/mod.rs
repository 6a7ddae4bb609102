//! Passage fetch operations: verse, range, chapter, and whole book.
//!
//! Each operation builds one [`PassageRequest`] URL per page, retrieves it
//! through a [`PageSource`], and runs [`extract`] over the markup. Verse and
//! range fetches filter the extracted items; the book fetch walks chapters
//! until the book runs out.
//!
//! # Example
//!
//! ```no_run
//! use versefetch_core::fetch::{Fetcher, FetcherConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Fetcher::new(FetcherConfig::default())?;
//! for item in fetcher.fetch_verse("John", 3, 16, "KJV").await? {
//!     println!("{item}");
//! }
//! # Ok(())
//! # }
//! ```

mod book;
mod client;
mod error;

pub use book::{BookAggregate, EMPTY_CHAPTER_LIMIT, MAX_CHAPTERS};
pub use client::{
    CONNECT_TIMEOUT_SECS, DEFAULT_USER_AGENT, HttpPageSource, HttpSettings, PageSource,
    READ_TIMEOUT_SECS, build_http_client,
};
pub use error::FetchError;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use self::book::EmptyChapterStreak;
use crate::passage::{ContentItem, DEFAULT_BASE_URL, PassageRequest, count_verses, extract};

/// Default pause between consecutive chapter requests (1.5 seconds).
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(1500);

/// Configuration for a [`Fetcher`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Passage lookup endpoint.
    pub base_url: String,
    /// HTTP client settings.
    pub http: HttpSettings,
    /// Fixed pause between chapter requests in a book fetch.
    pub request_delay: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http: HttpSettings::default(),
            request_delay: DEFAULT_REQUEST_DELAY,
        }
    }
}

/// Runs passage fetch operations against one page source.
///
/// Holds only immutable configuration; calls are independent of each other.
#[derive(Clone)]
pub struct Fetcher {
    source: Arc<dyn PageSource>,
    base_url: String,
    request_delay: Duration,
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("base_url", &self.base_url)
            .field("request_delay", &self.request_delay)
            .finish_non_exhaustive()
    }
}

impl Fetcher {
    /// Creates a fetcher that retrieves pages over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let source = HttpPageSource::new(&config.base_url, &config.http)?;
        Ok(Self::with_source(
            Arc::new(source),
            config.base_url,
            config.request_delay,
        ))
    }

    /// Creates a fetcher over an arbitrary page source.
    #[must_use]
    pub fn with_source(
        source: Arc<dyn PageSource>,
        base_url: impl Into<String>,
        request_delay: Duration,
    ) -> Self {
        Self {
            source,
            base_url: base_url.into(),
            request_delay,
        }
    }

    /// Builds the lookup URL for a request against this fetcher's endpoint.
    #[must_use]
    pub fn url_for(&self, request: &PassageRequest) -> String {
        request.to_url(&self.base_url)
    }

    async fn fetch_items(
        &self,
        request: &PassageRequest,
        chapter: u32,
    ) -> Result<Vec<ContentItem>, FetchError> {
        let url = self.url_for(request);
        let html = self.source.retrieve(&url).await?;
        Ok(extract(&html, request.book(), chapter)?)
    }

    /// Fetches a single verse.
    ///
    /// Returns at most one item: the verse whose number equals `verse`.
    ///
    /// # Errors
    ///
    /// Propagates retrieval and extraction failures.
    #[instrument(skip(self))]
    pub async fn fetch_verse(
        &self,
        book: &str,
        chapter: u32,
        verse: u32,
        translation: &str,
    ) -> Result<Vec<ContentItem>, FetchError> {
        let request = PassageRequest::verse(book, chapter, verse).with_translation(translation);
        let items = self.fetch_items(&request, chapter).await?;
        Ok(items
            .into_iter()
            .filter(|item| item.verse_number() == Some(verse))
            .take(1)
            .collect())
    }

    /// Fetches an inclusive verse range.
    ///
    /// Verses outside `start..=end` are removed; headings, notes and other
    /// context items are kept.
    ///
    /// # Errors
    ///
    /// Propagates retrieval and extraction failures.
    #[instrument(skip(self))]
    pub async fn fetch_verse_range(
        &self,
        book: &str,
        chapter: u32,
        start: u32,
        end: u32,
        translation: &str,
    ) -> Result<Vec<ContentItem>, FetchError> {
        let request =
            PassageRequest::range(book, chapter, start, end).with_translation(translation);
        let items = self.fetch_items(&request, chapter).await?;
        Ok(items
            .into_iter()
            .filter(|item| {
                item.verse_number()
                    .is_none_or(|number| (start..=end).contains(&number))
            })
            .collect())
    }

    /// Fetches a whole chapter, unfiltered.
    ///
    /// # Errors
    ///
    /// Propagates retrieval and extraction failures.
    #[instrument(skip(self))]
    pub async fn fetch_chapter(
        &self,
        book: &str,
        chapter: u32,
        translation: &str,
    ) -> Result<Vec<ContentItem>, FetchError> {
        let request = PassageRequest::chapter(book, chapter).with_translation(translation);
        self.fetch_items(&request, chapter).await
    }

    /// Fetches every chapter of a book.
    ///
    /// Chapters are requested from 1 upward (at most [`MAX_CHAPTERS`]) with a
    /// fixed delay between requests. A chapter that fails or has no verses
    /// counts as empty; [`EMPTY_CHAPTER_LIMIT`] empties in a row end the
    /// book. Only chapters with verses contribute items.
    ///
    /// Per-chapter errors are logged, never returned.
    #[instrument(skip(self))]
    pub async fn fetch_book(&self, book: &str, translation: &str) -> BookAggregate {
        let mut aggregate = BookAggregate::new();
        let mut streak = EmptyChapterStreak::new(EMPTY_CHAPTER_LIMIT);

        for chapter in 1..=MAX_CHAPTERS {
            if chapter > 1 && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }

            let verse_count = match self.fetch_chapter(book, chapter, translation).await {
                Ok(items) => {
                    let verses = count_verses(&items);
                    if verses > 0 {
                        aggregate.push_chapter(chapter, items);
                    }
                    verses
                }
                Err(error) => {
                    warn!(
                        book,
                        chapter,
                        error = %error,
                        "Failed to fetch chapter; counting as empty"
                    );
                    0
                }
            };
            debug!(chapter, verses = verse_count, "Chapter fetched");

            if streak.record(verse_count) {
                debug!(
                    chapter,
                    empty_streak = streak.current(),
                    "Consecutive empty chapters; book finished"
                );
                break;
            }
        }

        info!(
            book,
            translation,
            chapters = aggregate.chapters().len(),
            items = aggregate.items().len(),
            "Book fetch complete"
        );
        aggregate
    }
}
