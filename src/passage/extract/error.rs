//! Error types for passage extraction.

use thiserror::Error;

/// Errors that abort extraction of a passage page.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Neither known passage container was found in the markup.
    ///
    /// The raw markup is kept so callers can save it for inspection.
    #[error("could not find passage-content or passage-text block in page ({} bytes)", markup.len())]
    MissingContainer {
        /// The page markup that failed to extract.
        markup: String,
    },
}

impl ExtractError {
    /// Creates a missing-container error retaining the page markup.
    pub fn missing_container(markup: impl Into<String>) -> Self {
        Self::MissingContainer {
            markup: markup.into(),
        }
    }

    /// Returns the raw markup that failed to extract.
    #[must_use]
    pub fn markup(&self) -> &str {
        match self {
            Self::MissingContainer { markup } => markup,
        }
    }
}
