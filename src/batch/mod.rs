//! Multi-book export with cooperative pause, resume, and cancel.
//!
//! Books are fetched one after another. Before each book the runner checks
//! its [`BatchControl`]: a paused batch waits, a cancelled batch stops. A book
//! already being fetched always runs to completion.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use versefetch_core::batch::{BatchControl, BatchDownloader};
//! use versefetch_core::fetch::{Fetcher, FetcherConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Fetcher::new(FetcherConfig::default())?;
//! let control = BatchControl::new();
//! let report = BatchDownloader::new(fetcher)
//!     .run(&["Ruth", "Jonah"], "KJV", Path::new("./out"), &control, |event| {
//!         println!("{event:?}");
//!     })
//!     .await;
//! println!("saved {} books", report.saved.len());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, instrument, warn};

use crate::export::{book_file_name, write_json};
use crate::fetch::Fetcher;

/// Default pause between books (500 ms).
pub const DEFAULT_BOOK_DELAY: Duration = Duration::from_millis(500);

/// Run state requested by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// Keep going.
    Running,
    /// Wait before starting the next book.
    Paused,
    /// Stop before the next book.
    Cancelled,
}

/// Shared handle for steering a running batch from another task.
#[derive(Debug, Clone)]
pub struct BatchControl {
    state: Arc<watch::Sender<BatchState>>,
}

impl Default for BatchControl {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchControl {
    /// Creates a control in the running state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(watch::Sender::new(BatchState::Running)),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> BatchState {
        *self.state.borrow()
    }

    /// Requests a pause; ignored once cancelled.
    pub fn pause(&self) {
        self.transition(BatchState::Running, BatchState::Paused);
    }

    /// Resumes a paused batch; ignored once cancelled.
    pub fn resume(&self) {
        self.transition(BatchState::Paused, BatchState::Running);
    }

    /// Cancels the batch, including one that is paused.
    pub fn cancel(&self) {
        self.state.send_replace(BatchState::Cancelled);
    }

    fn transition(&self, from: BatchState, to: BatchState) {
        self.state.send_if_modified(|state| {
            if *state == from {
                *state = to;
                true
            } else {
                false
            }
        });
    }

    /// Waits while paused; returns false if the batch should stop.
    async fn proceed(&self) -> bool {
        let mut rx = self.state.subscribe();
        loop {
            match *rx.borrow_and_update() {
                BatchState::Running => return true,
                BatchState::Cancelled => return false,
                BatchState::Paused => {}
            }
            if rx.changed().await.is_err() {
                return false;
            }
        }
    }
}

/// Progress notifications emitted by [`BatchDownloader::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// A book is about to be fetched (`index` is zero-based).
    Started {
        /// Book name.
        book: String,
        /// Position in the batch.
        index: usize,
        /// Number of books in the batch.
        total: usize,
    },
    /// The batch is paused before `book`.
    Paused {
        /// Next book to fetch.
        book: String,
    },
    /// A book was written.
    Saved {
        /// Book name.
        book: String,
        /// Output file.
        path: PathBuf,
        /// Number of items written.
        items: usize,
    },
    /// A book could not be written.
    Failed {
        /// Book name.
        book: String,
        /// Error description.
        error: String,
    },
    /// The batch stopped early.
    Cancelled,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Files written, in batch order.
    pub saved: Vec<PathBuf>,
    /// Books that failed, with the error text.
    pub failed: Vec<(String, String)>,
    /// Whether the batch was cancelled before finishing.
    pub cancelled: bool,
}

/// Downloads whole books to JSON files, one at a time.
#[derive(Debug, Clone)]
pub struct BatchDownloader {
    fetcher: Fetcher,
    book_delay: Duration,
}

impl BatchDownloader {
    /// Creates a downloader with the default inter-book delay.
    #[must_use]
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            book_delay: DEFAULT_BOOK_DELAY,
        }
    }

    /// Overrides the pause between books.
    #[must_use]
    pub fn with_book_delay(mut self, book_delay: Duration) -> Self {
        self.book_delay = book_delay;
        self
    }

    /// Fetches each book and writes `<Book>_<translation>.json` into `out_dir`.
    ///
    /// A failing book is reported and the batch moves on. Pause and cancel
    /// requests take effect between books.
    #[instrument(skip(self, books, control, on_event), fields(books = books.len()))]
    pub async fn run(
        &self,
        books: &[&str],
        translation: &str,
        out_dir: &Path,
        control: &BatchControl,
        mut on_event: impl FnMut(&BatchEvent),
    ) -> BatchReport {
        let mut report = BatchReport::default();
        let total = books.len();

        for (index, book) in books.iter().copied().enumerate() {
            if control.state() == BatchState::Paused {
                info!(book, "Batch paused");
                on_event(&BatchEvent::Paused {
                    book: book.to_string(),
                });
            }
            if !control.proceed().await {
                info!(book, "Batch cancelled");
                report.cancelled = true;
                on_event(&BatchEvent::Cancelled);
                return report;
            }

            on_event(&BatchEvent::Started {
                book: book.to_string(),
                index,
                total,
            });

            let aggregate = self.fetcher.fetch_book(book, translation).await;
            if aggregate.is_empty() {
                warn!(book, translation, "No verses found; writing empty book");
            }

            let path = out_dir.join(book_file_name(book, translation));
            match write_json(&path, aggregate.items()) {
                Ok(()) => {
                    info!(book, path = %path.display(), "Saved book");
                    on_event(&BatchEvent::Saved {
                        book: book.to_string(),
                        path: path.clone(),
                        items: aggregate.items().len(),
                    });
                    report.saved.push(path);
                }
                Err(error) => {
                    warn!(book, error = %error, "Failed to save book");
                    on_event(&BatchEvent::Failed {
                        book: book.to_string(),
                        error: error.to_string(),
                    });
                    report.failed.push((book.to_string(), error.to_string()));
                }
            }

            if index + 1 < total && !self.book_delay.is_zero() {
                tokio::time::sleep(self.book_delay).await;
            }
        }

        if control.state() == BatchState::Cancelled {
            report.cancelled = true;
            on_event(&BatchEvent::Cancelled);
        }
        report
    }
}
