//! Case service — listing, lookup, and escalation.

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::query::{self, FilterKey, FilterSpec, ListQuery, Match, Pagination};
use crate::services::now_rfc3339;

pub(crate) const TABLE: &str = "cases";

const COLUMNS: &str = "id, title, description, status, severity, priority, category, \
     risk_flag, assigned_to, business_unit, channel, created_at, updated_at";

/// Recognized case filters, in predicate order.
pub const FILTERS: FilterSpec = FilterSpec {
    keys: &[
        FilterKey { param: "status", column: "status", kind: Match::Exact },
        FilterKey { param: "severity", column: "severity", kind: Match::Exact },
        FilterKey { param: "priority", column: "priority", kind: Match::Exact },
        FilterKey { param: "category", column: "category", kind: Match::Exact },
        FilterKey { param: "assignedTo", column: "assigned_to", kind: Match::Exact },
        FilterKey { param: "bu", column: "business_unit", kind: Match::Exact },
        FilterKey { param: "channel", column: "channel", kind: Match::Exact },
        FilterKey { param: "search", column: "title", kind: Match::Substring },
        FilterKey { param: "dateFrom", column: "created_at", kind: Match::From },
        FilterKey { param: "dateTo", column: "created_at", kind: Match::To },
    ],
    sortable: &[
        ("createdAt", "created_at"),
        ("updatedAt", "updated_at"),
        ("severity", "severity"),
        ("status", "status"),
        ("priority", "priority"),
    ],
    default_sort: "created_at",
    default_limit: 10,
};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CaseRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub severity: String,
    pub priority: String,
    pub category: String,
    pub risk_flag: bool,
    pub assigned_to: Option<String>,
    pub business_unit: String,
    pub channel: String,
    pub created_at: String,
    pub updated_at: String,
}

/// List cases for the given raw query parameters.
///
/// # Errors
///
/// Returns a database error if either the count or page query fails.
pub async fn list(
    pool: &SqlitePool,
    raw: &std::collections::HashMap<String, String>,
) -> Result<(Vec<CaseRow>, Pagination), sqlx::Error> {
    let query = ListQuery::build(&FILTERS, raw);
    let total = query::count_rows(pool, TABLE, &query).await?;

    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM {TABLE}"));
    query.push_where(&mut qb);
    query.push_order_limit(&mut qb);
    let rows = qb.build_query_as::<CaseRow>().fetch_all(pool).await?;

    Ok((rows, Pagination::new(&query, total)))
}

/// Fetch rows matching `query` up to `max_rows`, ignoring its pagination.
/// Used by export, which caps volume instead of paging.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn fetch_filtered(pool: &SqlitePool, query: &ListQuery, max_rows: i64) -> Result<Vec<CaseRow>, sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM {TABLE}"));
    query.push_where(&mut qb);
    qb.push(" ORDER BY ")
        .push(query.sort_by)
        .push(" ")
        .push(query.sort_order.as_sql())
        .push(" LIMIT ")
        .push_bind(max_rows);
    qb.build_query_as::<CaseRow>().fetch_all(pool).await
}

/// Whether a case with this id exists.
///
/// # Errors
///
/// Returns a database error if the lookup fails.
pub async fn exists(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let found: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM cases WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// Escalate a case: severity becomes critical and the risk flag is set.
/// Returns false when the case does not exist.
///
/// # Errors
///
/// Returns a database error if the update fails.
pub async fn escalate(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE cases SET severity = 'critical', risk_flag = 1, updated_at = ?2 WHERE id = ?1",
    )
    .bind(id)
    .bind(now_rfc3339())
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
#[path = "case_test.rs"]
mod tests;
