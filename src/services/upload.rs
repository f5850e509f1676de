//! Upload service — listing of ingest jobs.

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::query::{self, FilterKey, FilterSpec, ListQuery, Match, Pagination};

const TABLE: &str = "uploads";
const COLUMNS: &str = "id, filename, status, row_count, uploaded_by, created_at";

pub const FILTERS: FilterSpec = FilterSpec {
    keys: &[
        FilterKey { param: "status", column: "status", kind: Match::Exact },
        FilterKey { param: "search", column: "filename", kind: Match::Substring },
    ],
    sortable: &[("createdAt", "created_at"), ("status", "status")],
    default_sort: "created_at",
    default_limit: 10,
};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UploadRow {
    pub id: String,
    pub filename: String,
    pub status: String,
    pub row_count: i64,
    pub uploaded_by: Option<String>,
    pub created_at: String,
}

/// List uploads for the given raw query parameters.
///
/// # Errors
///
/// Returns a database error if either the count or page query fails.
pub async fn list(
    pool: &SqlitePool,
    raw: &std::collections::HashMap<String, String>,
) -> Result<(Vec<UploadRow>, Pagination), sqlx::Error> {
    let query = ListQuery::build(&FILTERS, raw);
    let total = query::count_rows(pool, TABLE, &query).await?;

    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM {TABLE}"));
    query.push_where(&mut qb);
    query.push_order_limit(&mut qb);
    let rows = qb.build_query_as::<UploadRow>().fetch_all(pool).await?;

    Ok((rows, Pagination::new(&query, total)))
}
