// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search result counting
//!
//! Estimates the popularity of search terms from the result count a public
//! search engine displays:
//! - Single counts, optionally restricted to results after a date
//! - LFU caching of timeless (undated) counts
//! - Concurrent batch counting over terms sharing a prefix
//!
//! ```text
//! query ─► PageFetcher ─► raw page ─► CountExtractor ─► count
//!              │                                          │
//!              └──── CountCache (undated queries only) ◄──┘
//! ```

pub mod cache;
pub mod config;
pub mod counter;
pub mod extractor;
pub mod fetcher;
pub mod types;

// Re-export commonly used types
pub use cache::CountCache;
pub use config::CountConfig;
pub use counter::{dated_query, PopularityCounter};
pub use extractor::{CountExtractor, ResultStatsExtractor};
pub use fetcher::{search_url, HttpFetcher, PageFetcher};
pub use types::{BatchReport, CacheStats, CountError, KeyOutcome};
