//! Rule-based intent classifier.
//!
//! DESIGN
//! ======
//! An ordered list of keyword rules is evaluated against the lower-cased
//! message; the first matching rule wins, so priority is the list order and
//! classification is fully deterministic. Confidence is a static score per
//! rule, not a ranking model. Entity extraction is plain word matching over
//! fixed vocabularies.

use std::collections::HashMap;

use serde::Serialize;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ApplyFilter,
    ClearFilters,
    ShowSummary,
    ExportData,
    Greeting,
    Help,
    Unknown,
}

/// Classification outcome. Produced fresh per message, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentResult {
    pub intent: Intent,
    pub confidence: f32,
    /// Extracted entity values keyed by kind (`severity`, `status`,
    /// `range`, `category`).
    pub entities: HashMap<&'static str, Vec<String>>,
}

// =============================================================================
// VOCABULARIES
// =============================================================================

pub(crate) const SEVERITIES: &[&str] = &["critical", "high", "medium", "low"];
pub(crate) const STATUSES: &[&str] = &["open", "closed", "pending", "resolved", "escalated"];
pub(crate) const CATEGORIES: &[&str] = &["billing", "technical", "complaint", "fraud", "retention"];
/// Multi-word phrases checked before single-word ones so "last week" never
/// half-matches as "week".
pub(crate) const DATE_PHRASES: &[&str] = &["last week", "this week", "this month", "yesterday", "today"];

// =============================================================================
// RULES
// =============================================================================

struct Rule {
    intent: Intent,
    confidence: f32,
    matches: fn(&str) -> bool,
    extract: fn(&str, &mut HashMap<&'static str, Vec<String>>),
}

/// Evaluated top to bottom; first match wins.
const RULES: &[Rule] = &[
    Rule {
        intent: Intent::ClearFilters,
        confidence: 0.9,
        matches: |text| has_word(text, "clear") || has_word(text, "reset"),
        extract: extract_nothing,
    },
    Rule {
        intent: Intent::ExportData,
        confidence: 0.85,
        matches: |text| has_word(text, "export") || has_word(text, "download"),
        extract: extract_nothing,
    },
    Rule {
        intent: Intent::ShowSummary,
        confidence: 0.8,
        matches: |text| {
            has_word(text, "summary")
                || has_word(text, "overview")
                || has_word(text, "stats")
                || text.contains("how many")
        },
        extract: extract_nothing,
    },
    Rule {
        intent: Intent::ApplyFilter,
        confidence: 0.85,
        matches: |text| {
            any_word(text, SEVERITIES)
                || any_word(text, STATUSES)
                || any_word(text, CATEGORIES)
                || DATE_PHRASES.iter().any(|phrase| text.contains(phrase))
        },
        extract: extract_filters,
    },
    Rule {
        intent: Intent::Help,
        confidence: 0.9,
        matches: |text| has_word(text, "help") || text.contains("what can you"),
        extract: extract_nothing,
    },
    Rule {
        intent: Intent::Greeting,
        confidence: 0.9,
        matches: |text| has_word(text, "hello") || has_word(text, "hi") || has_word(text, "hey"),
        extract: extract_nothing,
    },
];

const UNKNOWN_CONFIDENCE: f32 = 0.2;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classify a free-text message. Deterministic: identical input always
/// yields an identical result.
#[must_use]
pub fn classify(message: &str) -> IntentResult {
    let text = message.to_lowercase();

    for rule in RULES {
        if (rule.matches)(&text) {
            let mut entities = HashMap::new();
            (rule.extract)(&text, &mut entities);
            return IntentResult { intent: rule.intent, confidence: rule.confidence, entities };
        }
    }

    IntentResult { intent: Intent::Unknown, confidence: UNKNOWN_CONFIDENCE, entities: HashMap::new() }
}

fn extract_nothing(_text: &str, _entities: &mut HashMap<&'static str, Vec<String>>) {}

fn extract_filters(text: &str, entities: &mut HashMap<&'static str, Vec<String>>) {
    collect_words(text, SEVERITIES, "severity", entities);
    collect_words(text, STATUSES, "status", entities);
    collect_words(text, CATEGORIES, "category", entities);

    if let Some(phrase) = DATE_PHRASES.iter().find(|phrase| text.contains(*phrase)) {
        entities.insert("range", vec![(*phrase).to_string()]);
    }
}

fn collect_words(
    text: &str,
    vocabulary: &[&str],
    kind: &'static str,
    entities: &mut HashMap<&'static str, Vec<String>>,
) {
    let found: Vec<String> = vocabulary
        .iter()
        .filter(|word| has_word(text, word))
        .map(|word| (*word).to_string())
        .collect();
    if !found.is_empty() {
        entities.insert(kind, found);
    }
}

/// Word-boundary containment check, so "hi" does not match inside "this".
fn has_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric()).any(|token| token == word)
}

fn any_word(text: &str, vocabulary: &[&str]) -> bool {
    vocabulary.iter().any(|word| has_word(text, word))
}

#[cfg(test)]
#[path = "intent_test.rs"]
mod tests;
