//! Element classification into passage node kinds.
//!
//! An element is tested against each [`NodeKind`] in [`PRECEDENCE`] order and
//! takes the first kind whose predicate matches, so one element never yields
//! two items.

use scraper::ElementRef;

use super::text::stripped_text;

/// Class marking a section title.
pub(crate) const SECTION_CLASS: &str = "section-head";
/// Class marking verse text spans.
pub(crate) const VERSE_CLASS: &str = "text";
/// Class marking footnote spans.
pub(crate) const FOOTNOTE_CLASS: &str = "footnote";
/// Class marking cross-reference spans.
pub(crate) const CROSSREF_CLASS: &str = "crossreference";

/// Kinds of passage nodes recognized during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    Heading,
    Section,
    Verse,
    Footnote,
    Paragraph,
    CrossReference,
}

/// Classification order; the first matching kind wins.
pub(crate) const PRECEDENCE: [NodeKind; 6] = [
    NodeKind::Heading,
    NodeKind::Section,
    NodeKind::Verse,
    NodeKind::Footnote,
    NodeKind::Paragraph,
    NodeKind::CrossReference,
];

impl NodeKind {
    /// Returns true if `element` satisfies this kind's predicate.
    pub(crate) fn matches(self, element: ElementRef<'_>) -> bool {
        let name = element.value().name();
        match self {
            Self::Heading => matches!(name, "h2" | "h3") && !stripped_text(element).is_empty(),
            Self::Section => has_class(element, SECTION_CLASS),
            Self::Verse => name == "span" && has_class(element, VERSE_CLASS),
            Self::Footnote => name == "span" && has_class(element, FOOTNOTE_CLASS),
            Self::Paragraph => name == "p" && !stripped_text(element).is_empty(),
            Self::CrossReference => name == "span" && has_class(element, CROSSREF_CLASS),
        }
    }
}

/// Classifies an element, or returns `None` when it carries no content role.
pub(crate) fn classify(element: ElementRef<'_>) -> Option<NodeKind> {
    PRECEDENCE.into_iter().find(|kind| kind.matches(element))
}

/// Returns true if the element's class list contains `class` exactly.
pub(crate) fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use scraper::{Html, Selector};

    use super::*;

    fn classify_first(fragment: &str, selector: &str) -> Option<NodeKind> {
        let html = Html::parse_fragment(fragment);
        let selector = Selector::parse(selector).unwrap();
        let element = html.select(&selector).next().unwrap();
        classify(element)
    }

    #[test]
    fn test_heading_requires_text() {
        assert_eq!(
            classify_first("<h3>The Beginning</h3>", "h3"),
            Some(NodeKind::Heading)
        );
        assert_eq!(classify_first("<h3>   </h3>", "h3"), None);
        assert_eq!(classify_first("<h1>Title</h1>", "h1"), None);
    }

    #[test]
    fn test_heading_beats_section_class() {
        assert_eq!(
            classify_first(r#"<h3 class="section-head">Creation</h3>"#, "h3"),
            Some(NodeKind::Heading)
        );
    }

    #[test]
    fn test_empty_heading_falls_through_to_section() {
        assert_eq!(
            classify_first(r#"<h3 class="section-head"></h3>"#, "h3"),
            Some(NodeKind::Section)
        );
    }

    #[test]
    fn test_section_class_on_any_tag() {
        assert_eq!(
            classify_first(r#"<div class="section-head">Psalm 1</div>"#, "div"),
            Some(NodeKind::Section)
        );
    }

    #[test]
    fn test_section_beats_verse() {
        assert_eq!(
            classify_first(r#"<span class="text section-head">x</span>"#, "span"),
            Some(NodeKind::Section)
        );
    }

    #[test]
    fn test_verse_beats_footnote() {
        assert_eq!(
            classify_first(r#"<span class="footnote text">x</span>"#, "span"),
            Some(NodeKind::Verse)
        );
    }

    #[test]
    fn test_verse_requires_span() {
        assert_eq!(classify_first(r#"<div class="text">x</div>"#, "div"), None);
    }

    #[test]
    fn test_footnote_beats_crossreference() {
        assert_eq!(
            classify_first(r#"<span class="crossreference footnote">a</span>"#, "span"),
            Some(NodeKind::Footnote)
        );
    }

    #[test]
    fn test_paragraph_and_crossreference() {
        assert_eq!(
            classify_first("<p>Some words</p>", "p"),
            Some(NodeKind::Paragraph)
        );
        assert_eq!(classify_first("<p> </p>", "p"), None);
        assert_eq!(
            classify_first(r#"<span class="crossreference">A</span>"#, "span"),
            Some(NodeKind::CrossReference)
        );
    }

    #[test]
    fn test_class_match_is_whole_token() {
        assert_eq!(
            classify_first(r#"<span class="text-muted">x</span>"#, "span"),
            None
        );
    }
}
