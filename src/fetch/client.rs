//! Page retrieval over HTTP, with a single search-result hop.
//!
//! [`PageSource`] is the seam between fetch operations and the network, so
//! operations can also run over canned markup.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::error::FetchError;
use crate::passage::{first_search_result_link, has_passage_container};

/// Browser User-Agent sent by default; the site serves bare clients poorly.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Default HTTP connect timeout (10 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default total request timeout (30 seconds).
pub const READ_TIMEOUT_SECS: u64 = 30;

/// HTTP settings for passage retrieval.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// User-Agent header value.
    pub user_agent: String,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// Total request timeout.
    pub read_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(READ_TIMEOUT_SECS),
        }
    }
}

/// Something that can return the markup of a passage page for a URL.
///
/// # Object Safety
///
/// Uses `async_trait` so fetchers can hold `Arc<dyn PageSource>`.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Retrieves the page markup for `url`.
    async fn retrieve(&self, url: &str) -> Result<String, FetchError>;
}

/// Retrieves passage pages from the live site.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    origin: Url,
}

impl HttpPageSource {
    /// Creates a source whose search-result links resolve against `base_url`'s origin.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if `base_url` does not parse and
    /// [`FetchError::Client`] if the HTTP client cannot be built.
    #[instrument(level = "debug", skip(settings))]
    pub fn new(base_url: &str, settings: &HttpSettings) -> Result<Self, FetchError> {
        let origin = Url::parse(base_url)
            .and_then(|url| url.join("/"))
            .map_err(|_| FetchError::invalid_url(base_url))?;
        Ok(Self {
            client: build_http_client(settings)?,
            origin,
        })
    }

    /// Resolves a search-result link; only same-origin targets are followed.
    fn resolve_result_link(&self, href: &str) -> Result<Url, FetchError> {
        let next_url = self
            .origin
            .join(href)
            .map_err(|_| FetchError::invalid_url(href))?;
        if next_url.origin() != self.origin.origin() {
            warn!(href, "Search result points off-site; not following");
            return Err(FetchError::invalid_url(href));
        }
        Ok(next_url)
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(
                ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await
            .map_err(|error| FetchError::network(url, error))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(url, status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|error| FetchError::network(url, error))
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    /// Fetches `url`; if the page is a search-result list rather than a
    /// passage, follows its first link exactly once, and only within the
    /// site origin.
    #[instrument(skip(self), fields(url = %url))]
    async fn retrieve(&self, url: &str) -> Result<String, FetchError> {
        info!("Fetching passage page");
        let html = self.get_text(url).await?;

        if has_passage_container(&html) {
            return Ok(html);
        }

        let Some(href) = first_search_result_link(&html) else {
            debug!("No passage container and no search results; returning page as-is");
            return Ok(html);
        };

        let next_url = self.resolve_result_link(&href)?;
        info!(next_url = %next_url, "Auto-following search result");
        self.get_text(next_url.as_str()).await
    }
}

/// Builds the shared HTTP client.
///
/// # Errors
///
/// Returns [`FetchError::Client`] when client construction fails.
pub fn build_http_client(settings: &HttpSettings) -> Result<Client, FetchError> {
    Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.read_timeout)
        .user_agent(settings.user_agent.clone())
        .gzip(true)
        .build()
        .map_err(|source| FetchError::Client { source })
}
