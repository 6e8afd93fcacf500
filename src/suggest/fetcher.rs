//! Suggestion fetcher
//!
//! Async client for the storefront search endpoint. Requests can be raced
//! against a cancellation token so superseded lookups stop early.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use super::suggestion::{SearchResults, Suggestion};

/// Search endpoint, relative to the storefront base URL
pub const SEARCH_PATH: &str = "api/search/";

/// Errors that can occur while fetching suggestions
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request could not be sent or the body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-2xx status
    #[error("HTTP error ({code})")]
    Status { code: u16 },

    /// Body was not a valid search response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request was cancelled before it completed
    #[error("Request cancelled")]
    Cancelled,
}

/// Build the lookup URL for `query`, URL-encoding it into the `q` parameter
pub fn search_url(base_url: &Url, query: &str) -> Result<Url, FetchError> {
    let mut url = base_url
        .join(SEARCH_PATH)
        .map_err(|e| FetchError::Network(format!("invalid search URL: {}", e)))?;
    url.query_pairs_mut().append_pair("q", query);
    Ok(url)
}

/// Parse a search response body into its suggestion list
pub fn parse_results(body: &str) -> Result<Vec<Suggestion>, FetchError> {
    serde_json::from_str::<SearchResults>(body)
        .map(|parsed| parsed.results)
        .map_err(|e| FetchError::Parse(e.to_string()))
}

/// HTTP client for the search endpoint
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct SuggestionClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SuggestionClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self::with_client(http, base_url))
    }

    /// Wrap an already configured HTTP client
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch suggestions for `query`
    pub async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
        let url = search_url(&self.base_url, query)?;
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        parse_results(&body)
    }

    /// Fetch suggestions, giving up as soon as `cancel_token` fires
    ///
    /// A token that is already cancelled returns without touching the network.
    pub async fn fetch_with_cancel(
        &self,
        query: &str,
        cancel_token: CancellationToken,
    ) -> Result<Vec<Suggestion>, FetchError> {
        if cancel_token.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => Err(FetchError::Cancelled),
            result = self.fetch(query) => result,
        }
    }
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod fetcher_tests;
