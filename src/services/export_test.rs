use super::*;

use std::collections::HashMap;

use crate::state::test_helpers::{seed_case, test_app_state};

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

#[tokio::test]
async fn csv_export_contains_header_and_matching_rows() {
    let state = test_app_state().await;
    seed_case(&state.pool, "refund dispute", "open", "high").await;
    seed_case(&state.pool, "closed issue", "closed", "low").await;

    let file = export_cases(&state.pool, "csv", &params(&[("status", "open")])).await.expect("export");
    assert_eq!(file.content_type, "text/csv");
    assert!(file.filename.starts_with("cases_export_"));
    assert!(file.filename.ends_with(".csv"));
    assert_eq!(file.total_rows, 1);
    assert_eq!(file.max_rows, MAX_EXPORT_ROWS);

    let text = String::from_utf8(file.body).expect("utf8");
    let mut lines = text.lines();
    assert!(lines.next().expect("header").starts_with("id,title,status"));
    let row = lines.next().expect("data row");
    assert!(row.contains("refund dispute"));
    assert!(!text.contains("closed issue"));
}

#[tokio::test]
async fn zero_matching_rows_is_an_error() {
    let state = test_app_state().await;
    seed_case(&state.pool, "open case", "open", "low").await;

    let err = export_cases(&state.pool, "csv", &params(&[("status", "archived")])).await.expect_err("no rows");
    assert!(matches!(err, ExportError::NoRows));
    assert_eq!(err.to_string(), "No cases found matching the specified filters");
}

#[tokio::test]
async fn invalid_format_is_rejected() {
    let state = test_app_state().await;
    let err = export_cases(&state.pool, "pdf", &HashMap::new()).await.expect_err("bad format");
    assert!(matches!(err, ExportError::InvalidFormat(ref f) if f == "pdf"));
}

#[tokio::test]
async fn xlsx_export_is_tab_separated_with_excel_content_type() {
    let state = test_app_state().await;
    seed_case(&state.pool, "case one", "open", "low").await;

    let file = export_cases(&state.pool, "xlsx", &HashMap::new()).await.expect("export");
    assert_eq!(file.content_type, "application/vnd.ms-excel");
    assert!(file.filename.ends_with(".xlsx"));
    let text = String::from_utf8(file.body).expect("utf8");
    assert!(text.lines().next().expect("header").contains("id\ttitle"));
}

#[test]
fn fields_with_separators_and_quotes_are_escaped() {
    assert_eq!(escape_field("plain", ','), "plain");
    assert_eq!(escape_field("a,b", ','), "\"a,b\"");
    assert_eq!(escape_field("say \"hi\"", ','), "\"say \"\"hi\"\"\"");
    assert_eq!(escape_field("line\nbreak", ','), "\"line\nbreak\"");
}
