//! Typed content items produced by passage extraction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One piece of structured passage content, in document order.
///
/// Serializes as a JSON object tagged by `type`, e.g.
/// `{"type":"verse","book":"Genesis","chapter":1,"number":1,"text":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    /// Passage heading (`h2`/`h3`).
    Heading {
        /// Heading text.
        text: String,
    },
    /// Section title inside a passage.
    Section {
        /// Section title text.
        text: String,
    },
    /// A single numbered verse.
    Verse {
        /// Book name taken from the request, not the page.
        book: String,
        /// Chapter number taken from the request, not the page.
        chapter: u32,
        /// Resolved verse number.
        number: u32,
        /// Verse text.
        text: String,
    },
    /// Footnote marker and body.
    Footnote {
        /// Displayed marker (e.g. `a`).
        symbol: String,
        /// Footnote body.
        text: String,
    },
    /// Cross-reference marker and body.
    #[serde(rename = "crossref")]
    CrossReference {
        /// Displayed marker (e.g. `A`).
        symbol: String,
        /// Cross-reference body.
        text: String,
    },
    /// Paragraph text.
    Paragraph {
        /// Paragraph text.
        text: String,
    },
}

/// Discriminant of a [`ContentItem`], used for signatures and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// See [`ContentItem::Heading`].
    Heading,
    /// See [`ContentItem::Section`].
    Section,
    /// See [`ContentItem::Verse`].
    Verse,
    /// See [`ContentItem::Footnote`].
    Footnote,
    /// See [`ContentItem::CrossReference`].
    CrossReference,
    /// See [`ContentItem::Paragraph`].
    Paragraph,
}

impl ItemKind {
    /// Returns the stable label used in JSON output and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Section => "section",
            Self::Verse => "verse",
            Self::Footnote => "footnote",
            Self::CrossReference => "crossref",
            Self::Paragraph => "paragraph",
        }
    }
}

impl ContentItem {
    /// Returns the item's kind.
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Heading { .. } => ItemKind::Heading,
            Self::Section { .. } => ItemKind::Section,
            Self::Verse { .. } => ItemKind::Verse,
            Self::Footnote { .. } => ItemKind::Footnote,
            Self::CrossReference { .. } => ItemKind::CrossReference,
            Self::Paragraph { .. } => ItemKind::Paragraph,
        }
    }

    /// Returns the item's text body.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Heading { text }
            | Self::Section { text }
            | Self::Paragraph { text }
            | Self::Verse { text, .. }
            | Self::Footnote { text, .. }
            | Self::CrossReference { text, .. } => text,
        }
    }

    /// Returns the verse number for verse items.
    #[must_use]
    pub fn verse_number(&self) -> Option<u32> {
        match self {
            Self::Verse { number, .. } => Some(*number),
            _ => None,
        }
    }

    /// Returns true for verse items.
    #[must_use]
    pub fn is_verse(&self) -> bool {
        matches!(self, Self::Verse { .. })
    }

    /// Identity used for deduplication: `(kind, text, number)`.
    #[must_use]
    pub fn signature(&self) -> (ItemKind, &str, Option<u32>) {
        (self.kind(), self.text(), self.verse_number())
    }
}

impl fmt::Display for ContentItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heading { text } => write!(f, "[HEADING] {text}"),
            Self::Section { text } => write!(f, "[SECTION] {text}"),
            Self::Verse { number, text, .. } => write!(f, "[VERSE {number}] {text}"),
            Self::Footnote { symbol, text } => write!(f, "[FOOTNOTE {symbol}] {text}"),
            Self::CrossReference { symbol, text } => write!(f, "[CROSSREF {symbol}] {text}"),
            Self::Paragraph { text } => write!(f, "[PARAGRAPH] {text}"),
        }
    }
}

/// Counts verse items in a slice.
#[must_use]
pub fn count_verses(items: &[ContentItem]) -> usize {
    items.iter().filter(|item| item.is_verse()).count()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn genesis_1_1() -> ContentItem {
        ContentItem::Verse {
            book: "Genesis".to_string(),
            chapter: 1,
            number: 1,
            text: "In the beginning".to_string(),
        }
    }

    #[test]
    fn test_verse_serializes_with_type_tag_and_fields() {
        let json = serde_json::to_value(genesis_1_1()).unwrap();
        assert_eq!(json["type"], "verse");
        assert_eq!(json["book"], "Genesis");
        assert_eq!(json["chapter"], 1);
        assert_eq!(json["number"], 1);
        assert_eq!(json["text"], "In the beginning");
    }

    #[test]
    fn test_crossref_uses_short_type_label() {
        let item = ContentItem::CrossReference {
            symbol: "A".to_string(),
            text: "John 1:1".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "crossref");
        assert_eq!(json["symbol"], "A");
        assert_eq!(item.kind().as_str(), "crossref");
    }

    #[test]
    fn test_deserialize_footnote_from_json() {
        let item: ContentItem =
            serde_json::from_str(r#"{"type":"footnote","symbol":"a","text":"Or heavens"}"#)
                .unwrap();
        assert_eq!(
            item,
            ContentItem::Footnote {
                symbol: "a".to_string(),
                text: "Or heavens".to_string(),
            }
        );
    }

    #[test]
    fn test_signature_distinguishes_kind_with_same_text() {
        let heading = ContentItem::Heading {
            text: "Creation".to_string(),
        };
        let section = ContentItem::Section {
            text: "Creation".to_string(),
        };
        assert_ne!(heading.signature(), section.signature());
        assert_eq!(
            genesis_1_1().signature(),
            (ItemKind::Verse, "In the beginning", Some(1))
        );
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(genesis_1_1().to_string(), "[VERSE 1] In the beginning");
        let note = ContentItem::Footnote {
            symbol: "b".to_string(),
            text: "Hebrew".to_string(),
        };
        assert_eq!(note.to_string(), "[FOOTNOTE b] Hebrew");
        let para = ContentItem::Paragraph {
            text: "Text".to_string(),
        };
        assert_eq!(para.to_string(), "[PARAGRAPH] Text");
    }

    #[test]
    fn test_count_verses_ignores_context_items() {
        let items = vec![
            ContentItem::Heading {
                text: "H".to_string(),
            },
            genesis_1_1(),
        ];
        assert_eq!(count_verses(&items), 1);
    }
}
