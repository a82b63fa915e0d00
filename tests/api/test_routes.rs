// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route tests for the popularity, count, challenge and health endpoints
//!
//! The router runs in-process via `oneshot`; the search engine is a
//! wiremock server.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use dss_counter::{
    api::{create_router, AppState},
    challenge::ChallengeBook,
    count::{CountConfig, PopularityCounter},
};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn result_page(summary: &str) -> String {
    format!(
        "<html><div id=\"result-stats\">{}<nobr> (0,40 secondi)</nobr></div></html>",
        summary
    )
}

async fn mount(server: &MockServer, phrase: &str, page: String) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", phrase))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(server)
        .await;
}

fn app(server: &MockServer, challenges: ChallengeBook) -> Router {
    let config = CountConfig {
        search_url: format!("{}/search", server.uri()),
        request_timeout_secs: 1,
        ..CountConfig::default()
    };
    let counter = PopularityCounter::new(&config).unwrap();
    create_router(AppState::new(counter, challenges))
}

fn empty_book() -> ChallengeBook {
    ChallengeBook::new(Vec::new(), Utc::now().date_naive())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_popularity_returns_counted_options() {
    let server = MockServer::start().await;
    mount(&server, "\"gatto\"", result_page("Circa 3.400 risultati")).await;
    mount(&server, "\"cane\"", result_page("Circa 5.100 risultati")).await;
    // "drago" is not mounted: wiremock answers 404 with an empty body -> 0

    let (status, body) = get(
        app(&server, empty_book()),
        "/v1/popularity?options%5B%5D=gatto&options%5B%5D=cane&options%5B%5D=drago",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["options"]["gatto"], 3400);
    assert_eq!(body["options"]["cane"], 5100);
    assert_eq!(body["options"]["drago"], 0);
}

#[tokio::test]
async fn test_popularity_omits_failed_options() {
    let server = MockServer::start().await;
    mount(&server, "\"cibo+pizza\"", result_page("Circa 10 risultati")).await;
    mount(&server, "\"cibo+boh\"", result_page("Circa tanti risultati")).await;

    let (status, body) = get(
        app(&server, empty_book()),
        "/v1/popularity?prefix=cibo&options%5B%5D=pizza&options%5B%5D=boh",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let options = body["options"].as_object().unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options["pizza"], 10);
}

#[tokio::test]
async fn test_popularity_with_date_filter() {
    let server = MockServer::start().await;
    mount(&server, "\"cibo+pizza+after:2024/05/01\"", result_page("77 risultati")).await;

    let (status, body) = get(
        app(&server, empty_book()),
        "/v1/popularity?prefix=cibo&options%5B%5D=pizza&after=2024-05-01",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["options"]["pizza"], 77);
}

#[tokio::test]
async fn test_popularity_requires_options() {
    let server = MockServer::start().await;
    let (status, _) = get(app(&server, empty_book()), "/v1/popularity").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_count_endpoint() {
    let server = MockServer::start().await;
    mount(&server, "\"pizza\"", result_page("Circa 1.234.567 risultati")).await;

    let (status, body) = get(app(&server, empty_book()), "/v1/count?q=pizza").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "pizza");
    assert_eq!(body["count"], 1_234_567);
}

#[tokio::test]
async fn test_count_endpoint_maps_errors_to_500() {
    let server = MockServer::start().await;
    mount(&server, "\"strano\"", result_page("Circa tanti risultati")).await;

    let (status, _) = get(app(&server, empty_book()), "/v1/count?q=strano").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_count_endpoint_rejects_empty_query() {
    let server = MockServer::start().await;
    let (status, _) = get(app(&server, empty_book()), "/v1/count?q=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_challenge_of_the_day() {
    let server = MockServer::start().await;
    let first_day = Utc::now().date_naive() - Duration::days(1);
    let book = ChallengeBook::new(
        vec!["ieri".to_string(), "oggi".to_string(), "domani".to_string()],
        first_day,
    );

    let (status, body) = get(app(&server, book), "/v1/challenge").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["challenge"], "oggi");
}

#[tokio::test]
async fn test_challenge_exhausted() {
    let server = MockServer::start().await;
    let (status, _) = get(app(&server, empty_book()), "/v1/challenge").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let (status, body) = get(app(&server, empty_book()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["cache"]["capacity"], 1000);
}
