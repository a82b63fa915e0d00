// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Daily challenge word
//!
//! A flat word list read once at startup; day N after the first day gets
//! line N.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::info;

/// First day of the challenge calendar
pub const DEFAULT_FIRST_DAY: &str = "2024-12-19";

#[derive(Debug, Error)]
pub enum ChallengeError {
    #[error("Unable to load word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Challenges start on {first_day}")]
    NotStarted { first_day: NaiveDate },

    #[error("No more challenges available (day {day}, {available} words)")]
    Exhausted { day: i64, available: usize },
}

/// Word list indexed by days since the first day
#[derive(Debug, Clone)]
pub struct ChallengeBook {
    words: Vec<String>,
    first_day: NaiveDate,
}

impl ChallengeBook {
    pub fn new(words: Vec<String>, first_day: NaiveDate) -> Self {
        Self { words, first_day }
    }

    /// Load one word per line from `path`
    pub fn from_file(path: impl AsRef<Path>, first_day: NaiveDate) -> Result<Self, ChallengeError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ChallengeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let words: Vec<String> = contents.lines().map(str::to_string).collect();
        info!("Loaded {} challenge words from {}", words.len(), path.display());
        Ok(Self::new(words, first_day))
    }

    /// Days elapsed between the first day and `today`
    pub fn day_index(&self, today: NaiveDate) -> i64 {
        (today - self.first_day).num_days()
    }

    /// Word for the given day
    pub fn word_for(&self, today: NaiveDate) -> Result<&str, ChallengeError> {
        let day = self.day_index(today);
        if day < 0 {
            return Err(ChallengeError::NotStarted {
                first_day: self.first_day,
            });
        }

        usize::try_from(day)
            .ok()
            .and_then(|i| self.words.get(i))
            .map(String::as_str)
            .ok_or(ChallengeError::Exhausted {
                day,
                available: self.words.len(),
            })
    }

    /// Word for the current UTC day
    pub fn today(&self) -> Result<&str, ChallengeError> {
        self.word_for(Utc::now().date_naive())
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
