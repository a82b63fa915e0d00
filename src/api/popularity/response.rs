// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Popularity API response types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Response body for GET /v1/popularity
///
/// Terms whose count could not be fetched are absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopularityResponse {
    pub options: HashMap<String, u64>,
}

/// Response body for GET /v1/count
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountApiResponse {
    /// The query as requested
    pub query: String,
    /// Number of results shown by the search engine
    pub count: u64,
}
