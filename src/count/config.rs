// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for result counting

use std::env;
use std::time::Duration;

/// Search engine result page queried by default
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.it/search";

/// Desktop browser User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:87.0) Gecko/20100101 Firefox/87.0";

/// Configuration for fetching, caching and batch counting
#[derive(Debug, Clone)]
pub struct CountConfig {
    /// Result page URL; the query goes into its `q` parameter
    pub search_url: String,
    /// User-Agent header value
    pub user_agent: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Maximum number of cached counts
    pub cache_size: usize,
    /// Cached count lifetime in seconds
    pub cache_expiration_secs: u64,
    /// Maximum simultaneous outbound fetches across all batches
    pub max_concurrent_fetches: usize,
}

impl CountConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            search_url: env::var("DSS_SEARCH_URL").unwrap_or(defaults.search_url),
            user_agent: env::var("DSS_USER_AGENT").unwrap_or(defaults.user_agent),
            request_timeout_secs: env::var("DSS_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            cache_size: env::var("DSS_CACHE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_size),
            cache_expiration_secs: env::var("DSS_CACHE_EXPIRATION_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_expiration_secs),
            max_concurrent_fetches: env::var("DSS_MAX_CONCURRENT_FETCHES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_concurrent_fetches),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if url::Url::parse(&self.search_url).is_err() {
            return Err(format!("Invalid search URL: {}", self.search_url));
        }
        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }
        if self.cache_size == 0 {
            return Err("Cache size must be greater than 0".to_string());
        }
        if self.cache_expiration_secs == 0 {
            return Err("Cache expiration must be greater than 0".to_string());
        }
        if self.max_concurrent_fetches == 0 {
            return Err("Max concurrent fetches must be greater than 0".to_string());
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_expiration(&self) -> Duration {
        Duration::from_secs(self.cache_expiration_secs)
    }
}

impl Default for CountConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 30,
            cache_size: 1000,
            cache_expiration_secs: 86400,
            max_concurrent_fetches: 16,
        }
    }
}
