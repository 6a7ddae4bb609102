//! Versefetch Core Library
//!
//! Fetches Bible passages from a passage-lookup site and turns the returned
//! pages into ordered, typed content items (headings, verses, notes).
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`passage`] - Request URLs, content items, and page extraction
//! - [`fetch`] - Page retrieval and the verse/range/chapter/book operations
//! - [`catalog`] - Static book and translation tables
//! - [`export`] - JSON files and plain-text rendering
//! - [`batch`] - Multi-book export with pause, resume, and cancel

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod catalog;
pub mod export;
pub mod fetch;
pub mod passage;

// Re-export commonly used types
pub use batch::{BatchControl, BatchDownloader, BatchEvent, BatchReport, BatchState};
pub use export::{ExportError, write_json};
pub use fetch::{BookAggregate, FetchError, Fetcher, FetcherConfig, HttpPageSource, PageSource};
pub use passage::{ContentItem, ExtractError, PassageRequest, extract};
