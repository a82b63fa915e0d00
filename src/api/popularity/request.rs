// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Popularity API request types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Query string of GET /v1/popularity
///
/// `options[]` is repeated once per term, e.g.
/// `?options[]=pizza&options[]=pasta&after=2024-01-31`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopularityRequest {
    /// Terms to count
    #[serde(rename = "options[]", default)]
    pub options: Vec<String>,

    /// Text put in front of every term
    #[serde(default)]
    pub prefix: String,

    /// Only count results after this date (YYYY-MM-DD)
    #[serde(default)]
    pub after: Option<NaiveDate>,
}

impl PopularityRequest {
    /// Validate the request
    pub fn validate(&self) -> Result<(), String> {
        if self.options.is_empty() {
            return Err("At least one option is required".to_string());
        }
        Ok(())
    }
}

/// Query string of GET /v1/count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountApiRequest {
    /// Search query
    pub q: String,

    /// Only count results after this date (YYYY-MM-DD)
    #[serde(default)]
    pub after: Option<NaiveDate>,
}

impl CountApiRequest {
    /// Validate the request
    pub fn validate(&self) -> Result<(), String> {
        if self.q.trim().is_empty() {
            return Err("Query cannot be empty".to_string());
        }
        if self.q.len() > 500 {
            return Err("Query too long (max 500 characters)".to_string());
        }
        Ok(())
    }
}
