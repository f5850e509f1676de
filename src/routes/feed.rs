//! Feed list route.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::Json;
use serde_json::{Value, json};

use crate::routes::ApiError;
use crate::services::feed;
use crate::state::AppState;

/// `GET /api/feed` — list feed items with filters and pagination.
pub async fn list_feed(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let (rows, pagination) = feed::list(&state.pool, &params).await?;
    Ok(Json(json!({ "feed": rows, "pagination": pagination })))
}
