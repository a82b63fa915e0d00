// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::challenge::challenge_handler;
use super::popularity::{count_handler, popularity_handler};
use crate::challenge::ChallengeBook;
use crate::count::PopularityCounter;

/// Shared state handed to every handler, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub counter: Arc<PopularityCounter>,
    pub challenges: Arc<ChallengeBook>,
}

impl AppState {
    pub fn new(counter: PopularityCounter, challenges: ChallengeBook) -> Self {
        Self {
            counter: Arc::new(counter),
            challenges: Arc::new(challenges),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Counting endpoints
        .route("/v1/popularity", get(popularity_handler))
        .route("/v1/count", get(count_handler))
        // Daily challenge
        .route("/v1/challenge", get(challenge_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Unable to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "cache": state.counter.cache_stats(),
        "challengeWords": state.challenges.len(),
    }))
}
