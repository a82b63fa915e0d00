// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for result counting

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while counting results for a query
#[derive(Debug, Error)]
pub enum CountError {
    /// Network, connection, timeout or body read failure
    #[error("Transport error: {message}")]
    Transport {
        /// Underlying client error message
        message: String,
    },

    /// The extracted count text is not an integer
    #[error("Unable to parse result count from {value:?}")]
    Parse {
        /// Text that failed to parse (separators already removed)
        value: String,
    },

    /// The cache has no room for a new entry
    #[error("Cache is full (capacity {capacity})")]
    CacheFull {
        /// Configured cache capacity
        capacity: usize,
    },

    /// The cache lock was poisoned by a panicking writer
    #[error("Cache unavailable")]
    CacheUnavailable,

    /// The HTTP client could not be built
    #[error("HTTP client error: {message}")]
    Client {
        /// Builder error message
        message: String,
    },
}

impl From<reqwest::Error> for CountError {
    fn from(err: reqwest::Error) -> Self {
        CountError::Transport {
            message: err.to_string(),
        }
    }
}

/// Outcome of counting a single batch key
#[derive(Debug)]
pub struct KeyOutcome {
    /// The requested term key
    pub key: String,
    /// Composite query sent for this key (prefix + key)
    pub query: String,
    /// Count on success, the failure otherwise
    pub result: Result<u64, CountError>,
}

impl KeyOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-key outcomes of a batch count, in request order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<KeyOutcome>,
}

impl BatchReport {
    /// Successful counts keyed by term; failed keys are omitted
    pub fn counts(&self) -> HashMap<String, u64> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|c| (o.key.clone(), *c)))
            .collect()
    }

    /// Consume the report into its successful counts
    pub fn into_counts(self) -> HashMap<String, u64> {
        self.outcomes
            .into_iter()
            .filter_map(|o| o.result.ok().map(|c| (o.key, c)))
            .collect()
    }

    /// Keys whose fetch or parse failed
    pub fn failed_keys(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| o.key.as_str())
            .collect()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }
}

/// Cache statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Entries currently stored (expired ones included until evicted)
    pub total: usize,
    /// Stored entries past their expiration
    pub expired: usize,
    /// Maximum cache capacity
    pub capacity: usize,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that fell through to a live fetch
    pub misses: u64,
    /// Entries removed to make room
    pub evictions: u64,
}
