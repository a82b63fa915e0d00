// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Popularity API endpoint handlers

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::Query;
use tracing::{debug, info, warn};

use super::request::{CountApiRequest, PopularityRequest};
use super::response::{CountApiResponse, PopularityResponse};
use crate::api::http_server::AppState;

/// GET /v1/popularity - Count results for a batch of terms
///
/// # Query
/// - `options[]`: Term to count (repeated, at least one)
/// - `prefix`: Text prepended to every term (default empty)
/// - `after`: Only count results after this date, YYYY-MM-DD
///
/// # Response
/// - `options`: Map of term to result count; failed terms are absent
///
/// # Errors
/// - 400 Bad Request: No options given
pub async fn popularity_handler(
    State(state): State<AppState>,
    Query(request): Query<PopularityRequest>,
) -> Result<Json<PopularityResponse>, (StatusCode, String)> {
    debug!("Popularity request: {:?}", request.options);

    if let Err(e) = request.validate() {
        warn!("Popularity validation failed: {}", e);
        return Err((StatusCode::BAD_REQUEST, e));
    }

    let options = state
        .counter
        .count_batch(&request.prefix, &request.options, request.after)
        .await;

    info!(
        "Popularity complete: {}/{} options counted",
        options.len(),
        request.options.len()
    );

    Ok(Json(PopularityResponse { options }))
}

/// GET /v1/count - Count results for a single query
///
/// Undated queries are served from the cache when possible.
///
/// # Errors
/// - 400 Bad Request: Empty or oversized query
/// - 500 Internal Server Error: Fetch or parse failed
pub async fn count_handler(
    State(state): State<AppState>,
    Query(request): Query<CountApiRequest>,
) -> Result<Json<CountApiResponse>, (StatusCode, String)> {
    if let Err(e) = request.validate() {
        warn!("Count validation failed: {}", e);
        return Err((StatusCode::BAD_REQUEST, e));
    }

    let count = state
        .counter
        .count_cached(&request.q, request.after)
        .await
        .map_err(|e| {
            warn!("Count failed for {:?}: {}", request.q, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unable to fetch result count".to_string(),
            )
        })?;

    Ok(Json(CountApiResponse {
        query: request.q,
        count,
    }))
}
