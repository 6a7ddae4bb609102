//! Visible-text helpers over element subtrees.

use scraper::ElementRef;

/// Text fragments with surrounding whitespace removed, concatenated.
pub(crate) fn stripped_text(element: ElementRef<'_>) -> String {
    joined_text(element, "")
}

/// Text fragments with surrounding whitespace removed, joined by single spaces.
pub(crate) fn spaced_text(element: ElementRef<'_>) -> String {
    joined_text(element, " ")
}

fn joined_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
