// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Batch counting with partial failures

use chrono::NaiveDate;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::common::{counter_for, mount_page, quoted, result_page};

fn keys(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_batch_drops_key_with_transport_error() {
    let server = MockServer::start().await;
    mount_page(&server, "pizza margherita", result_page("Circa 45.600 risultati"), 1).await;
    mount_page(&server, "pizza diavola", result_page("12.300 risultati"), 1).await;
    // Slower than the 1s client timeout
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", quoted("pizza ananas").as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(result_page("Circa 7 risultati"))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let counter = counter_for(&server);
    let counts = counter
        .count_batch("pizza", &keys(&["margherita", "diavola", "ananas"]), None)
        .await;

    assert_eq!(counts.len(), 2);
    assert_eq!(counts["margherita"], 45_600);
    assert_eq!(counts["diavola"], 12_300);
    assert!(!counts.contains_key("ananas"));
}

#[tokio::test]
async fn test_batch_detailed_distinguishes_zero_from_failure() {
    let server = MockServer::start().await;
    mount_page(&server, "sport calcio", result_page("Circa 2.000 risultati"), 1).await;
    mount_page(&server, "sport curling", "<html></html>".to_string(), 1).await;
    mount_page(&server, "sport boh", result_page("Circa molti risultati"), 1).await;

    let counter = counter_for(&server);
    let report = counter
        .count_batch_detailed("sport", &keys(&["calcio", "curling", "boh"]), None)
        .await;

    assert_eq!(report.success_count(), 2);
    assert_eq!(report.failed_keys(), vec!["boh"]);

    let counts = report.counts();
    assert_eq!(counts["calcio"], 2000);
    assert_eq!(counts["curling"], 0);
}

#[tokio::test]
async fn test_batch_result_keys_subset_of_request() {
    let server = MockServer::start().await;
    mount_page(&server, "a x", result_page("1 risultato"), 1).await;
    mount_page(&server, "a y", result_page("2 risultati"), 1).await;

    let counter = counter_for(&server);
    let requested = keys(&["x", "y"]);
    let counts = counter.count_batch("a", &requested, None).await;
    assert!(counts.keys().all(|k| requested.contains(k)));
    assert_eq!(counts.len(), 2);
}

#[tokio::test]
async fn test_batch_fills_cache_for_undated_queries() {
    let server = MockServer::start().await;
    mount_page(&server, "mare sardegna", result_page("Circa 8.000 risultati"), 1).await;
    mount_page(&server, "mare puglia", result_page("Circa 6.000 risultati"), 1).await;

    let counter = counter_for(&server);
    let regions = keys(&["sardegna", "puglia"]);

    let first = counter.count_batch("mare", &regions, None).await;
    let second = counter.count_batch("mare", &regions, None).await;

    assert_eq!(first, second);
    assert!(counter.cache().contains("mare sardegna"));
    assert!(counter.cache().contains("mare puglia"));
}

#[tokio::test]
async fn test_dated_batch_leaves_cache_empty() {
    let server = MockServer::start().await;
    mount_page(&server, "mare sardegna after:2024/07/01", result_page("300 risultati"), 1).await;

    let counter = counter_for(&server);
    let counts = counter
        .count_batch("mare", &keys(&["sardegna"]), NaiveDate::from_ymd_opt(2024, 7, 1))
        .await;

    assert_eq!(counts["sardegna"], 300);
    assert!(counter.cache().is_empty());
}

#[tokio::test]
async fn test_duplicate_keys_counted_once_in_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(result_page("4 risultati")))
        .mount(&server)
        .await;

    let counter = counter_for(&server);
    let counts = counter.count_batch("h", &keys(&["k", "k"]), None).await;
    assert_eq!(counts.len(), 1);
    assert_eq!(counts["k"], 4);
}
