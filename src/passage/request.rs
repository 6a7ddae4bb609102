//! Passage lookup requests and search-query URL construction.

/// Passage lookup endpoint on BibleGateway.
pub const DEFAULT_BASE_URL: &str = "https://www.biblegateway.com/passage/";

/// Translation used when a request does not name one.
pub const DEFAULT_TRANSLATION: &str = "NIV";

/// A single passage lookup: book, optional chapter, optional verse or range.
///
/// Values are not validated; an unknown book simply produces a URL whose page
/// yields nothing downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassageRequest {
    book: String,
    chapter: Option<u32>,
    verses: Option<String>,
    translation: Option<String>,
}

impl PassageRequest {
    /// Starts a request for a whole book. Surrounding whitespace is dropped.
    #[must_use]
    pub fn new(book: impl Into<String>) -> Self {
        let book: String = book.into();
        Self {
            book: book.trim().to_string(),
            chapter: None,
            verses: None,
            translation: None,
        }
    }

    /// Request for a whole chapter.
    #[must_use]
    pub fn chapter(book: impl Into<String>, chapter: u32) -> Self {
        Self {
            chapter: Some(chapter),
            ..Self::new(book)
        }
    }

    /// Request for a single verse.
    #[must_use]
    pub fn verse(book: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Self::chapter(book, chapter).with_verses(verse.to_string())
    }

    /// Request for an inclusive verse range (`start-end`).
    #[must_use]
    pub fn range(book: impl Into<String>, chapter: u32, start: u32, end: u32) -> Self {
        Self::chapter(book, chapter).with_verses(format!("{start}-{end}"))
    }

    /// Sets the verse-or-range component (`"3"`, `"1-5"`).
    #[must_use]
    pub fn with_verses(mut self, verses: impl Into<String>) -> Self {
        self.verses = Some(verses.into());
        self
    }

    /// Sets the translation code.
    #[must_use]
    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }

    /// Book name, trimmed.
    #[must_use]
    pub fn book(&self) -> &str {
        &self.book
    }

    /// Translation code, falling back to [`DEFAULT_TRANSLATION`].
    #[must_use]
    pub fn translation(&self) -> &str {
        self.translation
            .as_deref()
            .filter(|code| !code.trim().is_empty())
            .unwrap_or(DEFAULT_TRANSLATION)
    }

    /// Search term: `book`, `book chapter`, or `book chapter:verses`.
    ///
    /// The verse component is only used together with a chapter.
    #[must_use]
    pub fn search_term(&self) -> String {
        let mut search = self.book.clone();
        if let Some(chapter) = self.chapter {
            search.push(' ');
            search.push_str(&chapter.to_string());
            if let Some(verses) = self.verses.as_deref().filter(|v| !v.is_empty()) {
                search.push(':');
                search.push_str(verses);
            }
        }
        search
    }

    /// Builds the print-interface query URL against `base_url`.
    ///
    /// Each query value is percent-encoded on its own; spaces become `%20`.
    #[must_use]
    pub fn to_url(&self, base_url: &str) -> String {
        let params = [
            ("search", self.search_term()),
            ("version", self.translation().to_string()),
            ("interface", "print".to_string()),
        ];
        let query = params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{base_url}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_only_url() {
        let url = PassageRequest::new("Genesis").to_url(DEFAULT_BASE_URL);
        assert_eq!(
            url,
            "https://www.biblegateway.com/passage/?search=Genesis&version=NIV&interface=print"
        );
    }

    #[test]
    fn test_chapter_url_uses_encoded_space() {
        let url = PassageRequest::chapter("1 Samuel", 3)
            .with_translation("KJV")
            .to_url(DEFAULT_BASE_URL);
        assert_eq!(
            url,
            "https://www.biblegateway.com/passage/?search=1%20Samuel%203&version=KJV&interface=print"
        );
        assert!(!url.contains('+'));
    }

    #[test]
    fn test_verse_url_encodes_colon() {
        let url = PassageRequest::verse("John", 3, 16)
            .with_translation("ESV")
            .to_url(DEFAULT_BASE_URL);
        assert!(url.contains("search=John%203%3A16"), "{url}");
        assert!(url.contains("version=ESV"));
        assert!(url.ends_with("interface=print"));
    }

    #[test]
    fn test_range_search_term() {
        let request = PassageRequest::range("Psalms", 23, 1, 4);
        assert_eq!(request.search_term(), "Psalms 23:1-4");
    }

    #[test]
    fn test_verses_ignored_without_chapter() {
        let request = PassageRequest::new("Jude").with_verses("3");
        assert_eq!(request.search_term(), "Jude");
    }

    #[test]
    fn test_book_name_is_trimmed() {
        let request = PassageRequest::chapter("  Ruth ", 1);
        assert_eq!(request.search_term(), "Ruth 1");
        assert_eq!(request.book(), "Ruth");
    }

    #[test]
    fn test_missing_or_blank_translation_defaults() {
        assert_eq!(PassageRequest::new("Ruth").translation(), "NIV");
        assert_eq!(
            PassageRequest::new("Ruth").with_translation(" ").translation(),
            "NIV"
        );
    }

    #[test]
    fn test_translation_value_is_encoded_independently() {
        let url = PassageRequest::new("Tobit")
            .with_translation("A&B")
            .to_url("http://localhost/passage/");
        assert!(url.contains("version=A%26B&interface=print"), "{url}");
    }
}
