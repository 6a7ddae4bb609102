//! Verse number recovery.
//!
//! Pages expose the verse number in several ways depending on the
//! translation and layout. Each way is a [`VerseNumberStrategy`]; they are
//! tried in [`STRATEGIES`] order and the first `Some` wins.

use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;
use tracing::trace;

use super::classify::has_class;
use super::text::stripped_text;

/// Class on the `sup` element carrying a displayed verse number.
pub(crate) const VERSENUM_CLASS: &str = "versenum";

/// Attribute carrying an explicit verse number.
pub(crate) const VERSE_ATTR: &str = "data-verse";

/// Compiles a regex at static init; panics on invalid pattern.
fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// `<bookcode>-<chapter>-<verse>` class tokens such as `Gen-1-1`, `1Cor-13-4`.
static VERSE_CLASS_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r"^([1-3]?[A-Za-z]+(?:-[A-Za-z]+)*)(?:-(\d+))?(?:-(\d+))?")
});

/// One independent way of recovering a verse number from a verse element.
pub(crate) trait VerseNumberStrategy {
    /// Short name used in trace output.
    fn name(&self) -> &'static str;

    /// Returns the verse number if this strategy can determine it.
    fn resolve(&self, element: ElementRef<'_>) -> Option<u32>;
}

/// Reads the verse from a structured class token (`Gen-1-1` → 1).
pub(crate) struct ClassToken;

impl VerseNumberStrategy for ClassToken {
    fn name(&self) -> &'static str {
        "class_token"
    }

    fn resolve(&self, element: ElementRef<'_>) -> Option<u32> {
        element.value().classes().find_map(|class| {
            VERSE_CLASS_TOKEN_RE
                .captures(class)
                .and_then(|caps| caps.get(3))
                .and_then(|verse| verse.as_str().parse().ok())
        })
    }
}

/// Reads the `data-verse` attribute.
pub(crate) struct DataAttribute;

impl VerseNumberStrategy for DataAttribute {
    fn name(&self) -> &'static str {
        "data_attribute"
    }

    fn resolve(&self, element: ElementRef<'_>) -> Option<u32> {
        element.value().attr(VERSE_ATTR)?.trim().parse().ok()
    }
}

/// Reads the nearest preceding `sup.versenum` sibling if its text is numeric.
pub(crate) struct PrecedingVerseNum;

impl VerseNumberStrategy for PrecedingVerseNum {
    fn name(&self) -> &'static str {
        "preceding_versenum"
    }

    fn resolve(&self, element: ElementRef<'_>) -> Option<u32> {
        let sibling = element
            .prev_siblings()
            .filter_map(ElementRef::wrap)
            .find(|sibling| {
                sibling.value().name() == "sup" && has_class(*sibling, VERSENUM_CLASS)
            })?;
        let text = stripped_text(sibling);
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        text.parse().ok()
    }
}

/// Resolution order for verse numbers.
pub(crate) const STRATEGIES: [&dyn VerseNumberStrategy; 3] =
    [&ClassToken, &DataAttribute, &PrecedingVerseNum];

/// Runs the strategy chain, stopping at the first success.
pub(crate) fn resolve_verse_number(element: ElementRef<'_>) -> Option<u32> {
    STRATEGIES.iter().find_map(|strategy| {
        let number = strategy.resolve(element)?;
        trace!(strategy = strategy.name(), number, "Resolved verse number");
        Some(number)
    })
}
