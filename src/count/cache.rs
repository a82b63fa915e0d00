// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Least-frequently-used count cache with per-entry expiration

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use super::types::{CacheStats, CountError};

/// Fixed-capacity LFU cache of result counts
///
/// Keys are undecorated queries. Expired entries are never returned and are
/// purged before anything live is evicted. When full, the entry with the
/// fewest hits goes first; ties go to the oldest insertion.
pub struct CountCache {
    state: RwLock<CacheState>,
    expiration: Duration,
    capacity: usize,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, CachedCount>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

struct CachedCount {
    count: u64,
    inserted_at: Instant,
    hits: u64,
}

impl CachedCount {
    fn is_expired(&self, expiration: Duration) -> bool {
        self.inserted_at.elapsed() > expiration
    }
}

impl CountCache {
    /// Create a new count cache
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries
    /// * `expiration` - Lifetime of each entry from insertion
    pub fn new(capacity: usize, expiration: Duration) -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
            expiration,
            capacity,
        }
    }

    /// Get the cached count for a query, counting the access
    pub fn get(&self, query: &str) -> Option<u64> {
        let mut guard = self.state.write().ok()?;
        let state = &mut *guard;

        let expired = state
            .entries
            .get(query)
            .map(|e| e.is_expired(self.expiration));

        let live = match expired {
            Some(false) => state.entries.get_mut(query).map(|entry| {
                entry.hits += 1;
                entry.count
            }),
            Some(true) => {
                state.entries.remove(query);
                None
            }
            None => None,
        };

        match live {
            Some(_) => state.hits += 1,
            None => state.misses += 1,
        }
        live
    }

    /// Store a count for a query
    ///
    /// Replacing an existing entry keeps its hit count and restarts its
    /// lifetime.
    pub fn insert(&self, query: &str, count: u64) -> Result<(), CountError> {
        if self.capacity == 0 {
            return Err(CountError::CacheFull { capacity: 0 });
        }

        let mut guard = self.state.write().map_err(|_| CountError::CacheUnavailable)?;
        let state = &mut *guard;

        let existing_hits = state.entries.get(query).map(|e| e.hits);
        if existing_hits.is_none() && state.entries.len() >= self.capacity {
            let expiration = self.expiration;
            state.entries.retain(|_, e| !e.is_expired(expiration));
            if state.entries.len() >= self.capacity {
                Self::evict_least_frequent(state);
            }
        }

        state.entries.insert(
            query.to_string(),
            CachedCount {
                count,
                inserted_at: Instant::now(),
                hits: existing_hits.unwrap_or(0),
            },
        );
        Ok(())
    }

    /// Remove the entry with the fewest hits, oldest first on ties
    fn evict_least_frequent(state: &mut CacheState) {
        if let Some(victim) = state
            .entries
            .iter()
            .min_by_key(|(_, e)| (e.hits, e.inserted_at))
            .map(|(k, _)| k.clone())
        {
            state.entries.remove(&victim);
            state.evictions += 1;
        }
    }

    /// Check for a live entry without counting an access
    pub fn contains(&self, query: &str) -> bool {
        self.state
            .read()
            .map(|s| {
                s.entries
                    .get(query)
                    .is_some_and(|e| !e.is_expired(self.expiration))
            })
            .unwrap_or(false)
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.state.read().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear all cache entries
    pub fn clear(&self) {
        if let Ok(mut state) = self.state.write() {
            state.entries.clear();
        }
    }

    /// Remove expired entries from cache
    pub fn cleanup_expired(&self) {
        if let Ok(mut state) = self.state.write() {
            let expiration = self.expiration;
            state.entries.retain(|_, e| !e.is_expired(expiration));
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let Ok(state) = self.state.read() else {
            return CacheStats {
                capacity: self.capacity,
                ..CacheStats::default()
            };
        };

        CacheStats {
            total: state.entries.len(),
            expired: state
                .entries
                .values()
                .filter(|e| e.is_expired(self.expiration))
                .count(),
            capacity: self.capacity,
            hits: state.hits,
            misses: state.misses,
            evictions: state.evictions,
        }
    }
}
