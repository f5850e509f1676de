//! Chat assistant — intent classification and response generation.
//!
//! ARCHITECTURE
//! ============
//! A user message flows through [`intent::classify`] (ordered keyword rules,
//! first match wins) and then [`respond::generate`], which maps the intent
//! to a canned reply plus, for filter intents, a sparse [`FilterState`]
//! patch the dashboard UI merges into its current filters.

pub mod intent;
pub mod respond;

use serde::Serialize;

/// Sparse filter patch emitted by filter-apply responses. Every field is
/// optional; the consumer merges it, it never replaces the whole state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl FilterState {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.severity.is_none()
            && self.status.is_none()
            && self.date_range.is_none()
            && self.category.is_none()
            && self.tags.is_none()
    }
}

/// Inclusive date range, `YYYY-MM-DD` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}
