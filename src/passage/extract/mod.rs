//! Passage page extraction into ordered [`ContentItem`]s.
//!
//! The page is parsed into a DOM, the passage container is located, and every
//! element below it is visited depth-first in document order. Each element is
//! classified (see [`NodeKind`](classify::NodeKind)) into at most one item.
//! Verse numbers are recovered through a chain of fallbacks, and the result
//! is cleaned and deduplicated.
//!
//! # Example
//!
//! ```
//! use versefetch_core::passage::{ContentItem, extract};
//!
//! let html = r#"<div class="passage-content">
//!     <span class="text Gen-1-1">In the beginning...</span>
//! </div>"#;
//! let items = extract(html, "Genesis", 1).unwrap();
//! assert_eq!(
//!     items,
//!     vec![ContentItem::Verse {
//!         book: "Genesis".to_string(),
//!         chapter: 1,
//!         number: 1,
//!         text: "In the beginning...".to_string(),
//!     }]
//! );
//! ```

mod classify;
mod dedup;
mod error;
mod text;
mod verse_number;

pub use dedup::dedup_items;
pub use error::ExtractError;

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use self::classify::{NodeKind, classify};
use self::dedup::is_keepable_verse_text;
use self::text::{spaced_text, stripped_text};
use self::verse_number::resolve_verse_number;
use super::item::{ContentItem, count_verses};

/// Attribute carrying a footnote or cross-reference marker.
const SYMBOL_ATTR: &str = "data-symbol";

/// Compiles a CSS selector at static init; panics on invalid selector.
fn compile_static_selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid static selector '{css}': {e:?}"))
}

/// Passage containers in lookup order.
static PASSAGE_CONTAINERS: LazyLock<[Selector; 2]> = LazyLock::new(|| {
    [
        compile_static_selector("div.passage-content"),
        compile_static_selector("div.passage-text"),
    ]
});

static SEARCH_RESULT_LIST: LazyLock<Selector> =
    LazyLock::new(|| compile_static_selector("div.search-result-list"));

static LINK_WITH_HREF: LazyLock<Selector> = LazyLock::new(|| compile_static_selector("a[href]"));

static NOTE_TEXT: LazyLock<Selector> =
    LazyLock::new(|| compile_static_selector("div.footnote-text"));

/// Item as first seen in the tree, before verse cleanup.
enum Candidate {
    Item(ContentItem),
    Verse { number: Option<u32>, text: String },
}

impl Candidate {
    fn from_element(kind: NodeKind, element: ElementRef<'_>) -> Self {
        match kind {
            NodeKind::Heading => Self::Item(ContentItem::Heading {
                text: stripped_text(element),
            }),
            NodeKind::Section => Self::Item(ContentItem::Section {
                text: stripped_text(element),
            }),
            NodeKind::Verse => Self::Verse {
                number: resolve_verse_number(element),
                text: spaced_text(element),
            },
            NodeKind::Footnote => {
                let (symbol, text) = note_parts(element);
                Self::Item(ContentItem::Footnote { symbol, text })
            }
            NodeKind::Paragraph => Self::Item(ContentItem::Paragraph {
                text: spaced_text(element),
            }),
            NodeKind::CrossReference => {
                let (symbol, text) = note_parts(element);
                Self::Item(ContentItem::CrossReference { symbol, text })
            }
        }
    }

    /// Verses without usable text or number are dropped here.
    fn finish(self, book: &str, chapter: u32) -> Option<ContentItem> {
        match self {
            Self::Item(item) => Some(item),
            Self::Verse { number, text } => {
                let number = number?;
                is_keepable_verse_text(&text).then(|| ContentItem::Verse {
                    book: book.to_string(),
                    chapter,
                    number,
                    text,
                })
            }
        }
    }
}

/// Marker and body of a footnote or cross-reference.
///
/// Expandable notes nest the body in `div.footnote-text`; inline notes carry
/// it as their own text.
fn note_parts(element: ElementRef<'_>) -> (String, String) {
    let symbol = element
        .value()
        .attr(SYMBOL_ATTR)
        .filter(|symbol| !symbol.is_empty())
        .map_or_else(|| stripped_text(element), str::to_string);
    let text = element
        .select(&NOTE_TEXT)
        .next()
        .map_or_else(|| spaced_text(element), spaced_text);
    (symbol, text)
}

fn find_container(document: &Html) -> Option<ElementRef<'_>> {
    PASSAGE_CONTAINERS
        .iter()
        .find_map(|selector| document.select(selector).next())
}

/// Extracts the ordered, deduplicated content items of a passage page.
///
/// `book` and `chapter` are stamped onto every verse; the page's own
/// labelling is ignored.
///
/// A page with a container but no verses is not an error: it yields a list
/// without verse items.
///
/// # Errors
///
/// Returns [`ExtractError::MissingContainer`] (carrying the markup) when
/// neither `div.passage-content` nor `div.passage-text` is present.
#[tracing::instrument(level = "debug", skip(markup), fields(bytes = markup.len()))]
pub fn extract(markup: &str, book: &str, chapter: u32) -> Result<Vec<ContentItem>, ExtractError> {
    let document = Html::parse_document(markup);
    let Some(container) = find_container(&document) else {
        return Err(ExtractError::missing_container(markup));
    };

    // `descendants` starts with the container itself.
    let candidates: Vec<Candidate> = container
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter_map(|element| {
            classify(element).map(|kind| Candidate::from_element(kind, element))
        })
        .collect();
    let candidate_count = candidates.len();

    let items = dedup_items(
        candidates
            .into_iter()
            .filter_map(|candidate| candidate.finish(book, chapter))
            .collect(),
    );

    debug!(
        candidates = candidate_count,
        items = items.len(),
        verses = count_verses(&items),
        "Extracted passage items"
    );
    Ok(items)
}

/// Returns true if the markup contains a known passage container.
#[must_use]
pub fn has_passage_container(markup: &str) -> bool {
    find_container(&Html::parse_document(markup)).is_some()
}

/// Returns the `href` of the first link in the page's search-result list.
///
/// The site answers ambiguous queries with a result list instead of the
/// passage; the first entry is the best match.
#[must_use]
pub fn first_search_result_link(markup: &str) -> Option<String> {
    let document = Html::parse_document(markup);
    let list = document.select(&SEARCH_RESULT_LIST).next()?;
    list.select(&LINK_WITH_HREF)
        .next()
        .and_then(|link| link.value().attr("href"))
        .map(str::to_string)
}
