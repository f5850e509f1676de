//! Alert list route.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::Json;
use serde_json::{Value, json};

use crate::routes::ApiError;
use crate::services::alert;
use crate::state::AppState;

/// `GET /api/alerts` — list alerts with filters and pagination.
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let (rows, pagination) = alert::list(&state.pool, &params).await?;
    Ok(Json(json!({ "alerts": rows, "pagination": pagination })))
}
