use super::*;

use std::collections::HashMap;

use time::Month;

use crate::chat::intent::classify;

fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("valid date")
}

#[tokio::test]
async fn apply_filter_emits_sparse_patch() {
    let result = classify("show me critical open cases");
    let reply = generate(&result).await;

    let patch = reply.filter_state.expect("filter patch");
    assert_eq!(patch.severity, Some(vec!["critical".to_string()]));
    assert_eq!(patch.status, Some(vec!["open".to_string()]));
    assert!(patch.category.is_none(), "unmentioned fields stay unset");
    assert!(patch.date_range.is_none());
    assert!(patch.tags.is_none());
    assert!(reply.message.contains("critical"));
}

#[tokio::test]
async fn non_filter_intents_omit_filter_state() {
    for message in ["hello", "help", "give me a summary", "export this", "clear filters"] {
        let reply = generate(&classify(message)).await;
        assert!(reply.filter_state.is_none(), "message {message:?} must not patch filters");
        assert!(!reply.message.is_empty());
    }
}

#[tokio::test]
async fn unknown_intent_returns_generic_help() {
    let reply = generate(&classify("what is the weather like")).await;
    assert!(reply.filter_state.is_none());
    assert!(reply.message.contains("filter"), "help text should explain filtering");
}

#[tokio::test]
async fn date_range_entity_becomes_date_range_patch() {
    let result = classify("open cases from last week");
    let reply = generate(&result).await;
    let patch = reply.filter_state.expect("filter patch");
    let range = patch.date_range.expect("date range");
    assert!(range.start < range.end);
}

#[test]
fn date_range_for_known_phrases() {
    let today = date(2026, Month::August, 25);

    let range = date_range_for("today", today).expect("range");
    assert_eq!((range.start.as_str(), range.end.as_str()), ("2026-08-25", "2026-08-25"));

    let range = date_range_for("yesterday", today).expect("range");
    assert_eq!((range.start.as_str(), range.end.as_str()), ("2026-08-24", "2026-08-24"));

    let range = date_range_for("this week", today).expect("range");
    assert_eq!((range.start.as_str(), range.end.as_str()), ("2026-08-19", "2026-08-25"));

    let range = date_range_for("last week", today).expect("range");
    assert_eq!((range.start.as_str(), range.end.as_str()), ("2026-08-12", "2026-08-18"));

    let range = date_range_for("this month", today).expect("range");
    assert_eq!((range.start.as_str(), range.end.as_str()), ("2026-08-01", "2026-08-25"));

    assert!(date_range_for("someday", today).is_none());
}

#[test]
fn filter_patch_maps_entities() {
    let mut entities = HashMap::new();
    entities.insert("severity", vec!["high".to_string()]);
    entities.insert("range", vec!["today".to_string()]);
    let result = IntentResult { intent: Intent::ApplyFilter, confidence: 0.85, entities };

    let patch = filter_patch(&result, date(2026, Month::January, 2));
    assert_eq!(patch.severity, Some(vec!["high".to_string()]));
    let range = patch.date_range.expect("range");
    assert_eq!(range.start, "2026-01-02");
    assert!(patch.status.is_none());
}
