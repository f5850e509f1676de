//! Feed service — listing over the activity feed.
//!
//! Business-unit and channel filters LIKE-match the serialized `metadata`
//! JSON blob instead of structured columns. That reproduces the upstream
//! schema's behavior, including its substring false positives (filtering
//! `bu=ret` also matches `retail` and `retention` blobs).

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::query::{self, FilterKey, FilterSpec, ListQuery, Match, Pagination};

const TABLE: &str = "feed_items";
const COLUMNS: &str = "id, item_type, title, content, severity, metadata, created_at";

pub const FILTERS: FilterSpec = FilterSpec {
    keys: &[
        FilterKey { param: "type", column: "item_type", kind: Match::Exact },
        FilterKey { param: "severity", column: "severity", kind: Match::Exact },
        FilterKey { param: "bu", column: "metadata", kind: Match::Substring },
        FilterKey { param: "channel", column: "metadata", kind: Match::Substring },
        FilterKey { param: "search", column: "title", kind: Match::Substring },
        FilterKey { param: "startDate", column: "created_at", kind: Match::From },
        FilterKey { param: "endDate", column: "created_at", kind: Match::To },
    ],
    sortable: &[("createdAt", "created_at"), ("severity", "severity")],
    default_sort: "created_at",
    default_limit: 20,
};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FeedRow {
    pub id: String,
    pub item_type: String,
    pub title: String,
    pub content: String,
    pub severity: String,
    pub metadata: String,
    pub created_at: String,
}

/// List feed items for the given raw query parameters.
///
/// # Errors
///
/// Returns a database error if either the count or page query fails.
pub async fn list(
    pool: &SqlitePool,
    raw: &std::collections::HashMap<String, String>,
) -> Result<(Vec<FeedRow>, Pagination), sqlx::Error> {
    let query = ListQuery::build(&FILTERS, raw);
    let total = query::count_rows(pool, TABLE, &query).await?;

    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM {TABLE}"));
    query.push_where(&mut qb);
    query.push_order_limit(&mut qb);
    let rows = qb.build_query_as::<FeedRow>().fetch_all(pool).await?;

    Ok((rows, Pagination::new(&query, total)))
}

/// Whether a feed item with this id exists.
///
/// # Errors
///
/// Returns a database error if the lookup fails.
pub async fn exists(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let found: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM feed_items WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;
