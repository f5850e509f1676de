//! Alert service — listing.

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::query::{self, FilterKey, FilterSpec, ListQuery, Match, Pagination};

const TABLE: &str = "alerts";
const COLUMNS: &str = "id, title, description, alert_type, severity, status, category, created_at";

pub const FILTERS: FilterSpec = FilterSpec {
    keys: &[
        FilterKey { param: "type", column: "alert_type", kind: Match::Exact },
        FilterKey { param: "severity", column: "severity", kind: Match::Exact },
        FilterKey { param: "status", column: "status", kind: Match::Exact },
        FilterKey { param: "category", column: "category", kind: Match::Exact },
        FilterKey { param: "search", column: "title", kind: Match::Substring },
        FilterKey { param: "startDate", column: "created_at", kind: Match::From },
        FilterKey { param: "endDate", column: "created_at", kind: Match::To },
    ],
    sortable: &[("createdAt", "created_at"), ("severity", "severity"), ("status", "status")],
    default_sort: "created_at",
    default_limit: 20,
};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AlertRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub alert_type: String,
    pub severity: String,
    pub status: String,
    pub category: String,
    pub created_at: String,
}

/// List alerts for the given raw query parameters.
///
/// # Errors
///
/// Returns a database error if either the count or page query fails.
pub async fn list(
    pool: &SqlitePool,
    raw: &std::collections::HashMap<String, String>,
) -> Result<(Vec<AlertRow>, Pagination), sqlx::Error> {
    let query = ListQuery::build(&FILTERS, raw);
    let total = query::count_rows(pool, TABLE, &query).await?;

    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM {TABLE}"));
    query.push_where(&mut qb);
    query.push_order_limit(&mut qb);
    let rows = qb.build_query_as::<AlertRow>().fetch_all(pool).await?;

    Ok((rows, Pagination::new(&query, total)))
}

/// Whether an alert with this id exists.
///
/// # Errors
///
/// Returns a database error if the lookup fails.
pub async fn exists(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let found: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM alerts WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

#[cfg(test)]
#[path = "alert_test.rs"]
mod tests;
