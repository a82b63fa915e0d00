// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Result count extraction from search result pages
//!
//! The result summary (e.g. `Circa 1.234.567 risultati`) lives in a fixed
//! div of the page. Locale and layout are baked into [`ResultStatsExtractor`],
//! so other engines or languages plug in through [`CountExtractor`].

use std::sync::OnceLock;

use regex::Regex;

use super::types::CountError;

/// Attribute marking the result summary element
pub const RESULT_STATS_MARKER: &str = r#"<div id="result-stats">"#;

/// Captures the summary text between the marker and the first `<nobr>`
pub const RESULT_STATS_PATTERN: &str = r#"<div id="result\-stats">([a-zA-Z 0-9\.]*)<nobr>"#;

/// Shown by the Italian result page when nothing matched
pub const NO_RESULTS_PHRASE: &str = "Nessun risultato trovato per i termini di ricerca";

/// Turns a raw result page into a result count
#[cfg_attr(test, mockall::automock)]
pub trait CountExtractor: Send + Sync {
    /// Extract the number of results shown on `page`
    ///
    /// Pages without a recognisable summary count as zero results.
    fn extract(&self, page: &str) -> Result<u64, CountError>;
}

/// Extracts counts from the result-stats summary of the Italian Google page
#[derive(Debug, Clone)]
pub struct ResultStatsExtractor {
    marker: String,
    pattern: Regex,
    no_results_phrase: String,
}

fn default_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(RESULT_STATS_PATTERN).expect("result stats pattern is valid"))
}

impl ResultStatsExtractor {
    /// Create an extractor for another page layout or locale
    ///
    /// `pattern` must have one capture group holding the summary text.
    pub fn new(
        marker: impl Into<String>,
        pattern: &str,
        no_results_phrase: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            marker: marker.into(),
            pattern: Regex::new(pattern)?,
            no_results_phrase: no_results_phrase.into(),
        })
    }

    /// Pull the summary fragment out of the page, if there is one
    fn summary<'p>(&self, page: &'p str) -> Option<&'p str> {
        if !page.contains(&self.marker) {
            return None;
        }
        self.pattern
            .captures(page)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl Default for ResultStatsExtractor {
    fn default() -> Self {
        Self {
            marker: RESULT_STATS_MARKER.to_string(),
            pattern: default_pattern().clone(),
            no_results_phrase: NO_RESULTS_PHRASE.to_string(),
        }
    }
}

impl CountExtractor for ResultStatsExtractor {
    fn extract(&self, page: &str) -> Result<u64, CountError> {
        let Some(summary) = self.summary(page) else {
            return Ok(0);
        };

        // The summary div carries boilerplate numbers even on empty pages
        if page.contains(&self.no_results_phrase) {
            return Ok(0);
        }

        parse_summary(summary)
    }
}

/// Parse a summary fragment such as `Circa 1.234 risultati`
///
/// With more than two fields the number follows a qualifier word, otherwise
/// it leads. Periods are thousands separators.
pub fn parse_summary(summary: &str) -> Result<u64, CountError> {
    let fields: Vec<&str> = summary.split_whitespace().collect();
    let pos = if fields.len() > 2 { 1 } else { 0 };

    let value = fields.get(pos).copied().unwrap_or_default().replace('.', "");
    value.parse::<u64>().map_err(|_| CountError::Parse { value })
}
