//! Inbox service — listing and status transitions for shared items.

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::query::{self, FilterKey, FilterSpec, ListQuery, Match, Pagination};

const TABLE: &str = "inbox_items";
const COLUMNS: &str = "id, source_type, source_id, sender_id, recipient_id, message, channel, status, created_at";

/// Allowed inbox item statuses, in lifecycle order.
pub const STATUSES: &[&str] = &["pending", "read", "actioned"];

pub const FILTERS: FilterSpec = FilterSpec {
    keys: &[
        FilterKey { param: "status", column: "status", kind: Match::Exact },
        FilterKey { param: "channel", column: "channel", kind: Match::Exact },
        FilterKey { param: "recipientId", column: "recipient_id", kind: Match::Exact },
        FilterKey { param: "sourceType", column: "source_type", kind: Match::Exact },
    ],
    sortable: &[("createdAt", "created_at"), ("status", "status")],
    default_sort: "created_at",
    default_limit: 20,
};

#[derive(Debug, thiserror::Error)]
pub enum InboxError {
    #[error("invalid status: {0}")]
    InvalidStatus(String),
    #[error("inbox item not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InboxRow {
    pub id: String,
    pub source_type: String,
    pub source_id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub message: String,
    pub channel: String,
    pub status: String,
    pub created_at: String,
}

/// List inbox items for the given raw query parameters.
///
/// # Errors
///
/// Returns a database error if either the count or page query fails.
pub async fn list(
    pool: &SqlitePool,
    raw: &std::collections::HashMap<String, String>,
) -> Result<(Vec<InboxRow>, Pagination), sqlx::Error> {
    let query = ListQuery::build(&FILTERS, raw);
    let total = query::count_rows(pool, TABLE, &query).await?;

    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM {TABLE}"));
    query.push_where(&mut qb);
    query.push_order_limit(&mut qb);
    let rows = qb.build_query_as::<InboxRow>().fetch_all(pool).await?;

    Ok((rows, Pagination::new(&query, total)))
}

/// Transition an inbox item to a new status and return the updated row.
///
/// # Errors
///
/// `InvalidStatus` when `status` is outside [`STATUSES`]; `NotFound` when
/// the id is unknown; `Database` on persistence failure.
pub async fn update_status(pool: &SqlitePool, id: &str, status: &str) -> Result<InboxRow, InboxError> {
    if !STATUSES.contains(&status) {
        return Err(InboxError::InvalidStatus(status.to_string()));
    }

    let result = sqlx::query("UPDATE inbox_items SET status = ?2 WHERE id = ?1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(InboxError::NotFound(id.to_string()));
    }

    let row = sqlx::query_as::<_, InboxRow>(&format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = ?1"))
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(row)
}

#[cfg(test)]
#[path = "inbox_test.rs"]
mod tests;
