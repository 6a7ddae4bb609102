//! Static translation and book tables.
//!
//! These are read-only process-wide data. The fetch core only asks one
//! question of them ("does this translation carry the apocrypha?"); the CLI
//! uses the rest for validation and listings.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Minimum Jaro-Winkler similarity for a book name suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.85;

/// Books of the Protestant canon, in canonical order.
pub static CANONICAL_BOOKS: [&str; 66] = [
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Deuterocanonical books, available only in some translations.
pub static DEUTEROCANONICAL_BOOKS: [&str; 15] = [
    "Tobit",
    "Judith",
    "Additions to Esther",
    "Wisdom",
    "Sirach",
    "Baruch",
    "Letter of Jeremiah",
    "Prayer of Azariah",
    "Susanna",
    "Bel and the Dragon",
    "1 Maccabees",
    "2 Maccabees",
    "1 Esdras",
    "2 Esdras",
    "Prayer of Manasseh",
];

/// A translation offered by the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    /// Site version code (e.g. `KJV`).
    pub code: &'static str,
    /// Display name.
    pub label: &'static str,
    /// Whether deuterocanonical books can be fetched.
    pub supports_apocrypha: bool,
    /// Greek or Hebrew source text rather than a translation into English/Spanish.
    pub original_language: bool,
}

const fn translation(
    code: &'static str,
    label: &'static str,
    supports_apocrypha: bool,
) -> Translation {
    Translation {
        code,
        label,
        supports_apocrypha,
        original_language: false,
    }
}

const fn original(
    code: &'static str,
    label: &'static str,
    supports_apocrypha: bool,
) -> Translation {
    Translation {
        code,
        label,
        supports_apocrypha,
        original_language: true,
    }
}

/// Known translations, modern first, then public domain, then original-language texts.
pub static TRANSLATIONS: [Translation; 27] = [
    translation("NIV", "New International Version", false),
    translation("ESV", "English Standard Version", false),
    translation("EXB", "Expanded Bible", false),
    translation("NASB", "New American Standard Bible", false),
    translation("NLT", "New Living Translation", false),
    translation("CSB", "Christian Standard Bible", false),
    translation("NKJV", "New King James Version", false),
    translation("NRSV", "New Revised Standard Version", true),
    translation("RSVCE", "Revised Standard Version Catholic Edition", true),
    translation("CEB", "Common English Bible", true),
    translation("TLA", "Traducción en Lenguaje Actual (Spanish)", false),
    translation("KJV", "King James Version", true),
    translation("ASV", "American Standard Version (1901)", false),
    translation("ERV", "English Revised Version (1885)", false),
    translation("WEB", "World English Bible", false),
    translation("YLT", "Young's Literal Translation", false),
    translation("DBY", "Darby Translation", false),
    translation("JUB", "Jubilee Bible 2000", false),
    translation("DRC", "Douay-Rheims 1899 American Edition", true),
    translation("DRB", "Douay-Rheims Bible (Challoner)", true),
    translation("RVA", "Reina-Valera Antigua (Spanish)", false),
    original("TR1550", "Textus Receptus 1550 (Greek)", false),
    original("SBLGNT", "SBL Greek New Testament", false),
    original("WLC", "Westminster Leningrad Codex (Hebrew)", false),
    original("LXX", "Septuagint (Brenton)", true),
    original("HHH", "Habrit Hakhadasha/Haderekh (Hebrew NT)", false),
    translation("GNV", "Geneva Bible", true),
];

static TRANSLATION_INDEX: LazyLock<HashMap<String, &'static Translation>> = LazyLock::new(|| {
    TRANSLATIONS
        .iter()
        .map(|translation| (translation.code.to_ascii_uppercase(), translation))
        .collect()
});

static BOOK_INDEX: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    all_books()
        .map(|book| (book.to_lowercase(), book))
        .collect()
});

/// Canonical followed by deuterocanonical books.
pub fn all_books() -> impl Iterator<Item = &'static str> {
    CANONICAL_BOOKS
        .iter()
        .chain(DEUTEROCANONICAL_BOOKS.iter())
        .copied()
}

/// Looks up a translation by code, ignoring case.
#[must_use]
pub fn find_translation(code: &str) -> Option<&'static Translation> {
    TRANSLATION_INDEX
        .get(&code.trim().to_ascii_uppercase())
        .copied()
}

/// Returns true if the translation is known and carries the apocrypha.
#[must_use]
pub fn supports_apocrypha(code: &str) -> bool {
    find_translation(code).is_some_and(|translation| translation.supports_apocrypha)
}

/// First listed translation that carries the apocrypha.
#[must_use]
pub fn apocrypha_translation() -> &'static Translation {
    TRANSLATIONS
        .iter()
        .find(|translation| translation.supports_apocrypha)
        .unwrap_or(&TRANSLATIONS[0])
}

/// Returns true for deuterocanonical book names (exact, case-insensitive).
#[must_use]
pub fn is_deuterocanonical(book: &str) -> bool {
    canonical_book_name(book).is_some_and(|name| DEUTEROCANONICAL_BOOKS.contains(&name))
}

/// Returns the catalog spelling of a book name matched case-insensitively.
#[must_use]
pub fn canonical_book_name(input: &str) -> Option<&'static str> {
    BOOK_INDEX.get(&input.trim().to_lowercase()).copied()
}

/// Closest catalog book name to a misspelled input, if any is close enough.
#[must_use]
pub fn suggest_book(input: &str) -> Option<&'static str> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    all_books()
        .map(|book| (book, strsim::jaro_winkler(&needle, &book.to_lowercase())))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|(_, lhs), (_, rhs)| lhs.total_cmp(rhs))
        .map(|(book, _)| book)
}

/// Filters a batch selection for a translation.
///
/// Deuterocanonical books are dropped when the translation lacks them;
/// order is preserved.
#[must_use]
pub fn batch_books<'a>(selected: &'a [String], translation: &str) -> Vec<&'a str> {
    let apocrypha = supports_apocrypha(translation);
    selected
        .iter()
        .map(String::as_str)
        .filter(|book| apocrypha || !is_deuterocanonical(book))
        .collect()
}
