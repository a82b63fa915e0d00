// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Result page fetching
//!
//! One GET per query, no retries, no connection reuse.

use async_trait::async_trait;
use reqwest::header::CONNECTION;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::config::CountConfig;
use super::types::CountError;

/// Source of raw result pages
///
/// Implementations return the page body for a query, or a transport error.
/// HTTP status codes are not interpreted.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the result page for `query`
    async fn fetch_page(&self, query: &str) -> Result<String, CountError>;
}

/// Build the result page URL for a query
///
/// The query is trimmed, inner spaces become `+`, and the phrase is wrapped
/// in double quotes before being form-encoded into the `q` parameter.
pub fn search_url(base: &Url, query: &str) -> Url {
    let phrase = format!("\"{}\"", query.trim().replace(' ', "+"));
    let mut url = base.clone();
    url.query_pairs_mut().append_pair("q", &phrase);
    url
}

/// Fetches result pages over HTTP
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
    timeout_secs: u64,
}

impl HttpFetcher {
    /// Create a fetcher from the counting configuration
    pub fn new(config: &CountConfig) -> Result<Self, CountError> {
        let base_url = Url::parse(&config.search_url).map_err(|e| CountError::Client {
            message: format!("invalid search URL {}: {}", config.search_url, e),
        })?;

        // No idle connections are kept, every request opens its own
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| CountError::Client {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            timeout_secs: config.request_timeout_secs,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn transport_error(&self, err: reqwest::Error) -> CountError {
        if err.is_timeout() {
            CountError::Transport {
                message: format!("request timed out after {}s", self.timeout_secs),
            }
        } else {
            CountError::from(err)
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, query: &str) -> Result<String, CountError> {
        let url = search_url(&self.base_url, query);
        debug!("Fetching result page: {}", url);

        let response = self
            .client
            .get(url)
            .header(CONNECTION, "close")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!("Fetched {} bytes (status {})", body.len(), status);
        Ok(body)
    }
}
