//! Post-processing of extracted items: verse cleanup and deduplication.

use std::collections::HashSet;

use crate::passage::item::{ContentItem, ItemKind};

/// Verse text starting with this marks an administrative note, not scripture.
const BRACKET_MARKER: char = '[';

/// Returns true if a verse's text should be kept.
pub(crate) fn is_keepable_verse_text(text: &str) -> bool {
    !text.trim().is_empty() && !text.starts_with(BRACKET_MARKER)
}

/// Removes repeated `(kind, text, number)` signatures, keeping the first
/// occurrence of each in its original position.
#[must_use]
pub fn dedup_items(items: Vec<ContentItem>) -> Vec<ContentItem> {
    let mut seen: HashSet<(ItemKind, String, Option<u32>)> = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| {
            let (kind, text, number) = item.signature();
            seen.insert((kind, text.to_string(), number))
        })
        .collect()
}
