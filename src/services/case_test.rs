use super::*;

use std::collections::HashMap;

use crate::state::test_helpers::{seed_case, seed_case_at, test_app_state};

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

#[tokio::test]
async fn page_two_of_twelve_matching_rows() {
    let state = test_app_state().await;
    for i in 0..12 {
        seed_case(&state.pool, &format!("open case {i}"), "open", "medium").await;
    }
    // Non-matching noise must not leak into the count.
    for i in 0..4 {
        seed_case(&state.pool, &format!("closed case {i}"), "closed", "low").await;
    }

    let (rows, pagination) = list(&state.pool, &params(&[("status", "open"), ("page", "2"), ("limit", "5")]))
        .await
        .expect("list");

    assert_eq!(rows.len(), 5);
    assert_eq!(pagination.page, 2);
    assert_eq!(pagination.limit, 5);
    assert_eq!(pagination.total, 12);
    assert_eq!(pagination.total_pages, 3);
    assert!(rows.iter().all(|row| row.status == "open"));
}

#[tokio::test]
async fn total_is_at_least_slice_and_slice_within_limit() {
    let state = test_app_state().await;
    for i in 0..7 {
        seed_case(&state.pool, &format!("case {i}"), "open", "high").await;
    }

    let (rows, pagination) = list(&state.pool, &params(&[("limit", "3")])).await.expect("list");
    assert!(rows.len() <= 3);
    assert!(pagination.total >= rows.len() as i64);
}

#[tokio::test]
async fn no_filters_returns_full_table_paginated() {
    let state = test_app_state().await;
    for i in 0..3 {
        seed_case(&state.pool, &format!("case {i}"), "open", "low").await;
    }

    let (rows, pagination) = list(&state.pool, &HashMap::new()).await.expect("list");
    assert_eq!(rows.len(), 3);
    assert_eq!(pagination.total, 3);
}

#[tokio::test]
async fn default_sort_is_created_at_descending() {
    let state = test_app_state().await;
    seed_case_at(&state.pool, "oldest", "open", "low", "2026-01-01T00:00:00Z").await;
    seed_case_at(&state.pool, "newest", "open", "low", "2026-03-01T00:00:00Z").await;
    seed_case_at(&state.pool, "middle", "open", "low", "2026-02-01T00:00:00Z").await;

    let (rows, _) = list(&state.pool, &HashMap::new()).await.expect("list");
    let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn date_range_filter_bounds_created_at() {
    let state = test_app_state().await;
    seed_case_at(&state.pool, "before", "open", "low", "2026-01-05T00:00:00Z").await;
    seed_case_at(&state.pool, "inside", "open", "low", "2026-02-10T00:00:00Z").await;
    seed_case_at(&state.pool, "after", "open", "low", "2026-03-20T00:00:00Z").await;

    let (rows, pagination) =
        list(&state.pool, &params(&[("dateFrom", "2026-02-01"), ("dateTo", "2026-03-01")])).await.expect("list");
    assert_eq!(pagination.total, 1);
    assert_eq!(rows[0].title, "inside");
}

#[tokio::test]
async fn search_filter_matches_title_substring() {
    let state = test_app_state().await;
    seed_case(&state.pool, "refund dispute", "open", "medium").await;
    seed_case(&state.pool, "network outage", "open", "medium").await;

    let (rows, _) = list(&state.pool, &params(&[("search", "refund")])).await.expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "refund dispute");
}

#[tokio::test]
async fn escalate_sets_severity_and_risk_flag() {
    let state = test_app_state().await;
    let id = seed_case(&state.pool, "suspicious refund", "open", "medium").await;

    assert!(escalate(&state.pool, &id).await.expect("escalate"));

    let (rows, _) = list(&state.pool, &HashMap::new()).await.expect("list");
    let row = rows.iter().find(|r| r.id == id).expect("case present");
    assert_eq!(row.severity, "critical");
    assert!(row.risk_flag);
}

#[tokio::test]
async fn escalate_missing_case_returns_false() {
    let state = test_app_state().await;
    assert!(!escalate(&state.pool, "no-such-id").await.expect("escalate"));
}

#[tokio::test]
async fn exists_distinguishes_present_and_absent() {
    let state = test_app_state().await;
    let id = seed_case(&state.pool, "case", "open", "low").await;
    assert!(exists(&state.pool, &id).await.expect("exists"));
    assert!(!exists(&state.pool, "missing").await.expect("exists"));
}
