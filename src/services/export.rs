//! Case export — filtered rows rendered as a downloadable table.
//!
//! DESIGN
//! ======
//! Reuses the case filter spec, so an export always matches what the list
//! endpoint would return for the same parameters. Volume is capped at
//! [`MAX_EXPORT_ROWS`] instead of paginated; the response headers report
//! both the matched total and the cap so the UI can warn about truncation.
//!
//! CSV is comma-separated with RFC 4180 quoting. The `xlsx` format is
//! tab-separated text under an Excel content type, which Excel opens
//! directly; real workbook encoding is the dashboard's exporter concern,
//! not this service's.

use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::query::{self, ListQuery};
use crate::services::case::{self, CaseRow};

pub const MAX_EXPORT_ROWS: i64 = 10_000;

const HEADERS: &[&str] = &[
    "id", "title", "status", "severity", "priority", "category", "riskFlag", "assignedTo", "businessUnit",
    "channel", "createdAt",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("No cases found matching the specified filters")]
    NoRows,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// Parse the `format` query parameter.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` for anything other than `csv` or `xlsx`.
    pub fn parse(raw: &str) -> Result<Self, ExportError> {
        match raw {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }

    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Xlsx => "application/vnd.ms-excel",
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    fn separator(self) -> char {
        match self {
            Self::Csv => ',',
            Self::Xlsx => '\t',
        }
    }
}

/// A rendered export ready to stream to the client.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    pub total_rows: i64,
    pub max_rows: i64,
}

/// Export cases matching the raw filter parameters.
///
/// # Errors
///
/// `InvalidFormat` for an unknown format, `NoRows` when the filters match
/// nothing, `Database` on persistence failure.
pub async fn export_cases(
    pool: &SqlitePool,
    format: &str,
    raw: &std::collections::HashMap<String, String>,
) -> Result<ExportFile, ExportError> {
    let format = ExportFormat::parse(format)?;

    let query = ListQuery::build(&case::FILTERS, raw);
    let total = query::count_rows(pool, case::TABLE, &query).await?;
    if total == 0 {
        return Err(ExportError::NoRows);
    }

    let rows = case::fetch_filtered(pool, &query, MAX_EXPORT_ROWS).await?;
    let body = render(&rows, format);

    let stamp = OffsetDateTime::now_utc().unix_timestamp();
    Ok(ExportFile {
        filename: format!("cases_export_{stamp}.{}", format.extension()),
        content_type: format.content_type(),
        body,
        total_rows: total,
        max_rows: MAX_EXPORT_ROWS,
    })
}

fn render(rows: &[CaseRow], format: ExportFormat) -> Vec<u8> {
    let sep = format.separator();
    let mut out = String::new();

    out.push_str(&HEADERS.join(&sep.to_string()));
    out.push('\n');

    for row in rows {
        let fields = [
            row.id.as_str(),
            row.title.as_str(),
            row.status.as_str(),
            row.severity.as_str(),
            row.priority.as_str(),
            row.category.as_str(),
            if row.risk_flag { "true" } else { "false" },
            row.assigned_to.as_deref().unwrap_or(""),
            row.business_unit.as_str(),
            row.channel.as_str(),
            row.created_at.as_str(),
        ];
        let line: Vec<String> = fields.iter().map(|f| escape_field(f, sep)).collect();
        out.push_str(&line.join(&sep.to_string()));
        out.push('\n');
    }

    out.into_bytes()
}

fn escape_field(field: &str, sep: char) -> String {
    if field.contains(sep) || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
