// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Daily challenge endpoint

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::http_server::AppState;
use crate::challenge::ChallengeError;

/// Response body for GET /v1/challenge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeResponse {
    pub challenge: String,
}

/// GET /v1/challenge - Today's challenge word
///
/// # Errors
/// - 404 Not Found: The challenge calendar has not started
/// - 500 Internal Server Error: The word list is exhausted
pub async fn challenge_handler(
    State(state): State<AppState>,
) -> Result<Json<ChallengeResponse>, (StatusCode, String)> {
    let word = state.challenges.today().map_err(|e| {
        warn!("Challenge unavailable: {}", e);
        match &e {
            ChallengeError::NotStarted { .. } => (StatusCode::NOT_FOUND, e.to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "No more challenges available".to_string(),
            ),
        }
    })?;

    Ok(Json(ChallengeResponse {
        challenge: word.to_string(),
    }))
}
