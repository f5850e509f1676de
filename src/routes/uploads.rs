//! Upload list route.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::Json;
use serde_json::{Value, json};

use crate::routes::ApiError;
use crate::services::upload;
use crate::state::AppState;

/// `GET /api/uploads` — list ingest jobs with filters and pagination.
pub async fn list_uploads(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let (rows, pagination) = upload::list(&state.pool, &params).await?;
    Ok(Json(json!({ "uploads": rows, "pagination": pagination })))
}
