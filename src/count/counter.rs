// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Popularity counting orchestration
//!
//! Coordinates page fetching, count extraction, caching and batch fan-out.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use super::cache::CountCache;
use super::config::CountConfig;
use super::extractor::{CountExtractor, ResultStatsExtractor};
use super::fetcher::{HttpFetcher, PageFetcher};
use super::types::{BatchReport, CacheStats, CountError, KeyOutcome};

/// Append the date filter to a query, if any
///
/// `pizza` with 2024-01-31 becomes `pizza after:2024/01/31`.
pub fn dated_query(query: &str, after: Option<NaiveDate>) -> String {
    match after {
        Some(date) => format!("{} after:{}", query, date.format("%Y/%m/%d")),
        None => query.to_string(),
    }
}

/// Counts search results for single queries and batches of terms
pub struct PopularityCounter {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn CountExtractor>,
    cache: CountCache,
    fetch_permits: Semaphore,
    max_concurrent_fetches: usize,
}

impl PopularityCounter {
    /// Create a counter that queries the configured result page over HTTP
    pub fn new(config: &CountConfig) -> Result<Self, CountError> {
        let fetcher = HttpFetcher::new(config)?;
        debug!("Result page fetcher targeting {}", fetcher.base_url());

        Ok(Self::with_components(
            Arc::new(fetcher),
            Arc::new(ResultStatsExtractor::default()),
            config,
        ))
    }

    /// Create a counter from explicit fetcher and extractor implementations
    pub fn with_components(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn CountExtractor>,
        config: &CountConfig,
    ) -> Self {
        let max_concurrent_fetches = config.max_concurrent_fetches.max(1);
        Self {
            fetcher,
            extractor,
            cache: CountCache::new(config.cache_size, config.cache_expiration()),
            fetch_permits: Semaphore::new(max_concurrent_fetches),
            max_concurrent_fetches,
        }
    }

    /// Count results for a query with a live fetch
    ///
    /// With `after` set the query is restricted to results after that date.
    /// The cache is never read or written.
    pub async fn count(&self, query: &str, after: Option<NaiveDate>) -> Result<u64, CountError> {
        let query = dated_query(query, after);

        let page = {
            let _permit = self
                .fetch_permits
                .acquire()
                .await
                .map_err(|_| CountError::Transport {
                    message: "fetch pool closed".to_string(),
                })?;
            self.fetcher.fetch_page(&query).await?
        };

        let count = self.extractor.extract(&page)?;
        debug!("Count for {}: {}", query, count);
        Ok(count)
    }

    /// Count results for a query, answering timeless queries from the cache
    ///
    /// Date-filtered queries always go to the network and are never cached.
    /// A failed cache write is logged and does not fail the call.
    pub async fn count_cached(
        &self,
        query: &str,
        after: Option<NaiveDate>,
    ) -> Result<u64, CountError> {
        if after.is_some() {
            return self.count(query, after).await;
        }

        if let Some(count) = self.cache.get(query) {
            debug!("Cache hit for query: {}", query);
            return Ok(count);
        }

        let count = self.count(query, None).await?;

        if let Err(e) = self.cache.insert(query, count) {
            warn!("Error setting cache for {}: {}", query, e);
        }

        Ok(count)
    }

    /// Count results for `prefix key` for every key concurrently
    ///
    /// Returns only the keys that succeeded. Failures are logged and left
    /// out; use [`Self::count_batch_detailed`] to see them.
    pub async fn count_batch(
        &self,
        prefix: &str,
        keys: &[String],
        after: Option<NaiveDate>,
    ) -> HashMap<String, u64> {
        self.count_batch_detailed(prefix, keys, after)
            .await
            .into_counts()
    }

    /// Count results for every key, keeping the outcome of each one
    ///
    /// Outcomes are in request order. Duplicate keys are counted again.
    pub async fn count_batch_detailed(
        &self,
        prefix: &str,
        keys: &[String],
        after: Option<NaiveDate>,
    ) -> BatchReport {
        info!("Counting {} keys for prefix {:?}", keys.len(), prefix);

        let futures: Vec<_> = keys
            .iter()
            .map(|key| {
                let query = format!("{} {}", prefix, key);
                async move {
                    let result = self.count_cached(&query, after).await;
                    match &result {
                        Ok(count) => debug!("Count for {}: {}", query, count),
                        Err(e) => warn!("Error for query {}: {}", query, e),
                    }
                    KeyOutcome {
                        key: key.clone(),
                        query,
                        result,
                    }
                }
            })
            .collect();

        let report = BatchReport {
            outcomes: join_all(futures).await,
        };

        info!(
            "Batch complete: {} counted, {} failed",
            report.success_count(),
            report.failure_count()
        );
        report
    }

    pub fn max_concurrent_fetches(&self) -> usize {
        self.max_concurrent_fetches
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Clear the count cache
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache(&self) -> &CountCache {
        &self.cache
    }
}
