//! Filter-to-query translation for list endpoints.
//!
//! DESIGN
//! ======
//! Each list resource declares a [`FilterSpec`]: the recognized query
//! parameters (with match kind), the sortable columns, and pagination
//! defaults. [`ListQuery::build`] walks the spec in declaration order and
//! appends one predicate per recognized, non-empty parameter. Unknown keys
//! and empty values are ignored silently.
//!
//! The same predicate list drives both the page SELECT and the COUNT(*), so
//! pagination metadata always agrees with the returned slice. Every value is
//! bound through `sqlx::QueryBuilder`; only allow-listed column names are
//! pushed as raw SQL.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

// =============================================================================
// FILTER SPEC
// =============================================================================

/// How a recognized parameter translates into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// `column = value`
    Exact,
    /// Case-sensitive `column LIKE '%value%'`
    Substring,
    /// `column >= value` (inclusive lower bound, date-style fields)
    From,
    /// `column <= value` (inclusive upper bound, date-style fields)
    To,
}

/// One recognized query parameter for a resource.
pub struct FilterKey {
    pub param: &'static str,
    pub column: &'static str,
    pub kind: Match,
}

/// Per-resource filter configuration.
pub struct FilterSpec {
    pub keys: &'static [FilterKey],
    /// `(query param, column)` pairs accepted for `sortBy`.
    pub sortable: &'static [(&'static str, &'static str)],
    /// Column used when `sortBy` is absent or not allow-listed.
    pub default_sort: &'static str,
    pub default_limit: i64,
}

// =============================================================================
// LIST QUERY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Eq { column: &'static str, value: String },
    Gte { column: &'static str, value: String },
    Lte { column: &'static str, value: String },
    Like { column: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Built query: ordered predicates plus sort and pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub conditions: Vec<Predicate>,
    pub sort_by: &'static str,
    pub sort_order: SortOrder,
    pub page: i64,
    pub limit: i64,
}

impl ListQuery {
    /// Translate raw query parameters into predicates + pagination.
    ///
    /// Deterministic: the same `raw` map always yields the same query,
    /// because predicates follow the spec's key declaration order.
    #[must_use]
    pub fn build(spec: &FilterSpec, raw: &HashMap<String, String>) -> Self {
        let mut conditions = Vec::new();
        for key in spec.keys {
            let Some(value) = raw.get(key.param).map(|v| v.trim()) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            let value = value.to_string();
            conditions.push(match key.kind {
                Match::Exact => Predicate::Eq { column: key.column, value },
                Match::Substring => Predicate::Like { column: key.column, value },
                Match::From => Predicate::Gte { column: key.column, value },
                Match::To => Predicate::Lte { column: key.column, value },
            });
        }

        let sort_by = raw
            .get("sortBy")
            .and_then(|requested| {
                spec.sortable
                    .iter()
                    .find(|(param, _)| param == requested)
                    .map(|(_, column)| *column)
            })
            .unwrap_or(spec.default_sort);

        let sort_order = match raw.get("sortOrder").map(String::as_str) {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        };

        let page = raw
            .get("page")
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let limit = raw
            .get("limit")
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|l| *l > 0)
            .unwrap_or(spec.default_limit);

        Self { conditions, sort_by, sort_order, page, limit }
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// Append the WHERE clause. No-op when there are no conditions.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        for (i, predicate) in self.conditions.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            match predicate {
                Predicate::Eq { column, value } => {
                    qb.push(*column).push(" = ").push_bind(value.clone());
                }
                Predicate::Gte { column, value } => {
                    qb.push(*column).push(" >= ").push_bind(value.clone());
                }
                Predicate::Lte { column, value } => {
                    qb.push(*column).push(" <= ").push_bind(value.clone());
                }
                Predicate::Like { column, value } => {
                    qb.push(*column).push(" LIKE ").push_bind(format!("%{value}%"));
                }
            }
        }
    }

    /// Append ORDER BY / LIMIT / OFFSET. `sort_by` comes from the spec's
    /// allow-list, never from raw input, so pushing it raw is safe.
    pub fn push_order_limit(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        qb.push(" ORDER BY ")
            .push(self.sort_by)
            .push(" ")
            .push(self.sort_order.as_sql())
            .push(" LIMIT ")
            .push_bind(self.limit)
            .push(" OFFSET ")
            .push_bind(self.offset());
    }
}

/// Total row count under the query's predicate set.
///
/// # Errors
///
/// Returns a database error if the count query fails.
pub async fn count_rows(pool: &SqlitePool, table: &'static str, query: &ListQuery) -> Result<i64, sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM ");
    qb.push(table);
    query.push_where(&mut qb);
    qb.build_query_scalar::<i64>().fetch_one(pool).await
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Pagination metadata returned alongside every list slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    #[must_use]
    pub fn new(query: &ListQuery, total: i64) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
            total,
            total_pages: (total + query.limit - 1) / query.limit,
        }
    }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
