//! Case export route.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::HeaderName;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};

use crate::routes::ApiError;
use crate::services::export::{self as export_svc, ExportError};
use crate::state::AppState;

const X_TOTAL_ROWS: HeaderName = HeaderName::from_static("x-total-rows");
const X_MAX_ROWS: HeaderName = HeaderName::from_static("x-max-rows");

/// `GET /api/cases/export?format=csv|xlsx` — download filtered cases.
pub async fn export_cases(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let format = params.get("format").map_or("csv", String::as_str);
    let file = export_svc::export_cases(&state.pool, format, &params).await?;

    let headers = [
        (CONTENT_TYPE, file.content_type.to_string()),
        (CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", file.filename)),
        (X_TOTAL_ROWS, file.total_rows.to_string()),
        (X_MAX_ROWS, file.max_rows.to_string()),
    ];
    Ok((headers, file.body).into_response())
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::InvalidFormat(_) => Self::bad_request(err.to_string()),
            ExportError::NoRows => Self::not_found(err.to_string()),
            ExportError::Database(e) => Self::internal(e),
        }
    }
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
