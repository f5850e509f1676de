//! Case list route.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::Json;
use serde_json::{Value, json};

use crate::routes::ApiError;
use crate::services::case;
use crate::state::AppState;

/// `GET /api/cases` — list cases with filters and pagination.
pub async fn list_cases(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let (rows, pagination) = case::list(&state.pool, &params).await?;
    Ok(Json(json!({ "cases": rows, "pagination": pagination })))
}

#[cfg(test)]
#[path = "cases_test.rs"]
mod tests;
