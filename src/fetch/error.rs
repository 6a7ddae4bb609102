//! Error types for page retrieval and fetch operations.

use thiserror::Error;

use crate::passage::ExtractError;

/// Errors that abort a single fetch call.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status (either hop).
    #[error("error fetching page: {url} (status {status})")]
    Status {
        /// The URL that returned the status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Transport failure (DNS, connect, TLS, timeout, body read).
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL being fetched.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// A URL could not be parsed or resolved against the site origin.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The offending URL or link target.
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client construction failed: {source}")]
    Client {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// The page was retrieved but holds no passage container.
    #[error(transparent)]
    Extraction(#[from] ExtractError),
}

impl FetchError {
    /// Creates a status error.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Returns the retained page markup for extraction failures.
    #[must_use]
    pub fn failed_markup(&self) -> Option<&str> {
        match self {
            Self::Extraction(error) => Some(error.markup()),
            _ => None,
        }
    }
}

// No `From<reqwest::Error>`: every transport variant needs the URL it failed on.
