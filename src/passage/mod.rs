//! Passage requests, content items, and page extraction.
//!
//! # Architecture
//!
//! - [`PassageRequest`] - Builds the search-query URL for one lookup
//! - [`ContentItem`] - Tagged content records (heading, verse, footnote, ...)
//! - [`extract`] - Turns a passage page into ordered, deduplicated items

mod extract;
mod item;
mod request;

pub use extract::{
    ExtractError, dedup_items, extract, first_search_result_link, has_passage_container,
};
pub use item::{ContentItem, ItemKind, count_verses};
pub use request::{DEFAULT_BASE_URL, DEFAULT_TRANSLATION, PassageRequest};
