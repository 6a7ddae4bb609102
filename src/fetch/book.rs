//! Whole-book accumulation and the end-of-book detection policy.
//!
//! Books have no chapter count the site will tell us, so chapters are
//! requested in order until several in a row come back without verses.

use serde::Serialize;

use crate::passage::ContentItem;

/// Highest chapter number ever requested for one book.
pub const MAX_CHAPTERS: u32 = 150;

/// Consecutive verse-less chapters that end a book.
pub const EMPTY_CHAPTER_LIMIT: u32 = 3;

/// Items gathered across a whole-book fetch, in chapter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BookAggregate {
    items: Vec<ContentItem>,
    #[serde(skip)]
    chapters: Vec<u32>,
}

impl BookAggregate {
    /// Creates an empty aggregate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one chapter's items.
    pub fn push_chapter(&mut self, chapter: u32, items: Vec<ContentItem>) {
        self.chapters.push(chapter);
        self.items.extend(items);
    }

    /// All items in chapter order.
    #[must_use]
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Chapters that contributed items, ascending.
    #[must_use]
    pub fn chapters(&self) -> &[u32] {
        &self.chapters
    }

    /// Returns true if no chapter contributed items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the aggregate, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<ContentItem> {
        self.items
    }
}

/// Counts consecutive verse-less chapters.
///
/// A failed chapter and a genuinely empty one count the same.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EmptyChapterStreak {
    current: u32,
    limit: u32,
}

impl EmptyChapterStreak {
    pub(crate) fn new(limit: u32) -> Self {
        Self { current: 0, limit }
    }

    /// Records a chapter's verse count; returns true once the book is over.
    pub(crate) fn record(&mut self, verse_count: usize) -> bool {
        if verse_count == 0 {
            self.current += 1;
        } else {
            self.current = 0;
        }
        self.current >= self.limit
    }

    pub(crate) fn current(&self) -> u32 {
        self.current
    }
}
