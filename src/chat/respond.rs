//! Response generation for classified intents.
//!
//! Async by contract so the reply can later be enriched from the store or
//! an upstream service; today every branch is pure.

use time::{Date, OffsetDateTime};

use crate::chat::intent::{Intent, IntentResult};
use crate::chat::{DateRange, FilterState};

/// Reply returned to the chat UI.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub message: String,
    /// Present only for the filter-apply intent family.
    pub filter_state: Option<FilterState>,
}

const HELP_MESSAGE: &str = "I can filter the dashboard for you. Try \"show me critical open cases\", \
     \"cases from last week\", \"clear filters\", or ask for a summary.";

/// Generate a reply for a classification result.
pub async fn generate(result: &IntentResult) -> ChatReply {
    match result.intent {
        Intent::ApplyFilter => apply_filter_reply(result),
        Intent::ClearFilters => ChatReply {
            message: "Cleared all active filters.".to_string(),
            filter_state: None,
        },
        Intent::ShowSummary => ChatReply {
            message: "The Pulse panel shows live totals: open cases, critical alerts, and pending inbox items."
                .to_string(),
            filter_state: None,
        },
        Intent::ExportData => ChatReply {
            message: "You can export the current case list from the Cases panel, or fetch \
                 /api/cases/export?format=csv with the same filters."
                .to_string(),
            filter_state: None,
        },
        Intent::Greeting => ChatReply {
            message: "Hello! Ask me to filter cases or alerts, for example \"show open cases from this week\"."
                .to_string(),
            filter_state: None,
        },
        Intent::Help | Intent::Unknown => ChatReply {
            message: HELP_MESSAGE.to_string(),
            filter_state: None,
        },
    }
}

fn apply_filter_reply(result: &IntentResult) -> ChatReply {
    let patch = filter_patch(result, OffsetDateTime::now_utc().date());

    let mut described = Vec::new();
    if let Some(severity) = &patch.severity {
        described.push(format!("severity {}", severity.join(", ")));
    }
    if let Some(status) = &patch.status {
        described.push(format!("status {}", status.join(", ")));
    }
    if let Some(category) = &patch.category {
        described.push(format!("category {}", category.join(", ")));
    }
    if let Some(range) = &patch.date_range {
        described.push(format!("dates {} to {}", range.start, range.end));
    }

    if patch.is_empty() {
        return ChatReply { message: HELP_MESSAGE.to_string(), filter_state: None };
    }

    ChatReply {
        message: format!("Applying filters: {}.", described.join("; ")),
        filter_state: Some(patch),
    }
}

fn filter_patch(result: &IntentResult, today: Date) -> FilterState {
    let mut patch = FilterState {
        severity: result.entities.get("severity").cloned(),
        status: result.entities.get("status").cloned(),
        category: result.entities.get("category").cloned(),
        ..FilterState::default()
    };

    if let Some(range) = result.entities.get("range").and_then(|v| v.first()) {
        patch.date_range = date_range_for(range, today);
    }

    patch
}

fn date_range_for(phrase: &str, today: Date) -> Option<DateRange> {
    let day = time::Duration::days(1);
    let (start, end) = match phrase {
        "today" => (today, today),
        "yesterday" => (today - day, today - day),
        // Rolling windows rather than calendar weeks, matching how the
        // dashboard's date pickers behave.
        "this week" => (today - time::Duration::days(6), today),
        "last week" => (today - time::Duration::days(13), today - time::Duration::days(7)),
        "this month" => (today.replace_day(1).unwrap_or(today), today),
        _ => return None,
    };
    Some(DateRange { start: fmt_date(start), end: fmt_date(end) })
}

fn fmt_date(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

#[cfg(test)]
#[path = "respond_test.rs"]
mod tests;
