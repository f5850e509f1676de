//! Share service — sharing and escalating items into agent inboxes.
//!
//! DESIGN
//! ======
//! A share creates an inbox item for the recipient referencing the source
//! entity. An escalation additionally bumps the referenced case to critical
//! severity with the risk flag set. The source entity must exist; its table
//! is chosen by `source_type`.

use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::services::{alert, case, feed, now_rfc3339};

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("{0}")]
    Validation(String),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    /// "share" or "escalation".
    #[serde(rename = "type")]
    pub share_type: Option<String>,
    pub source_type: Option<String>,
    pub source_id: Option<String>,
    pub sender_id: Option<String>,
    pub recipient_id: Option<String>,
    pub message: Option<String>,
    pub channel: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ShareOutcome {
    pub id: String,
    pub message: String,
}

const SOURCE_TYPES: &[&str] = &["case", "alert", "feed"];

/// Validate and execute a share/escalation request.
///
/// # Errors
///
/// `Validation` for missing or malformed fields, `NotFound` when the
/// referenced source entity is absent, `Database` on persistence failure.
pub async fn create(pool: &SqlitePool, request: &ShareRequest) -> Result<ShareOutcome, ShareError> {
    let share_type = required(&request.share_type, "type")?;
    if share_type != "share" && share_type != "escalation" {
        return Err(ShareError::Validation(format!("invalid type: {share_type}")));
    }
    let source_type = required(&request.source_type, "sourceType")?;
    if !SOURCE_TYPES.contains(&source_type) {
        return Err(ShareError::Validation(format!("invalid sourceType: {source_type}")));
    }
    let source_id = required(&request.source_id, "sourceId")?;
    let sender_id = required(&request.sender_id, "senderId")?;
    let recipient_id = required(&request.recipient_id, "recipientId")?;

    let found = match source_type {
        "case" => case::exists(pool, source_id).await?,
        "alert" => alert::exists(pool, source_id).await?,
        _ => feed::exists(pool, source_id).await?,
    };
    if !found {
        return Err(ShareError::NotFound { kind: source_type_kind(source_type), id: source_id.to_string() });
    }

    let escalation = share_type == "escalation";
    if escalation && source_type == "case" {
        case::escalate(pool, source_id).await?;
    }

    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO inbox_items (id, source_type, source_id, sender_id, recipient_id, message, channel, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'pending', ?8)",
    )
    .bind(&id)
    .bind(source_type)
    .bind(source_id)
    .bind(sender_id)
    .bind(recipient_id)
    .bind(request.message.as_deref().unwrap_or(""))
    .bind(request.channel.as_deref().unwrap_or("internal"))
    .bind(now_rfc3339())
    .execute(pool)
    .await?;

    info!(share_type, source_type, source_id, recipient_id, "share created");

    let message = if escalation { "Successfully escalated" } else { "Successfully shared" };
    Ok(ShareOutcome { id, message: message.to_string() })
}

fn required<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str, ShareError> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ShareError::Validation(format!("missing required field: {name}")))
}

fn source_type_kind(source_type: &str) -> &'static str {
    match source_type {
        "case" => "case",
        "alert" => "alert",
        _ => "feed item",
    }
}

#[cfg(test)]
#[path = "share_test.rs"]
mod tests;
