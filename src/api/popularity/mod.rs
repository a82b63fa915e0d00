// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Popularity API endpoints
//!
//! Provides `/v1/popularity` (batch) and `/v1/count` (single query).

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{count_handler, popularity_handler};
pub use request::{CountApiRequest, PopularityRequest};
pub use response::{CountApiResponse, PopularityResponse};
