//! Inbox routes — listing and status updates.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::routes::ApiError;
use crate::services::inbox::{self, InboxError, InboxRow};
use crate::state::AppState;

/// `GET /api/inbox` — list inbox items with filters and pagination.
pub async fn list_inbox(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let (rows, pagination) = inbox::list(&state.pool, &params).await?;
    Ok(Json(json!({ "inbox": rows, "pagination": pagination })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateInboxBody {
    pub id: Option<String>,
    pub status: Option<String>,
}

/// `PATCH /api/inbox` — transition an item's status.
pub async fn update_status(
    State(state): State<AppState>,
    Json(body): Json<UpdateInboxBody>,
) -> Result<Json<InboxRow>, ApiError> {
    let Some(id) = body.id.as_deref().filter(|v| !v.is_empty()) else {
        return Err(ApiError::bad_request("missing required field: id"));
    };
    let Some(status) = body.status.as_deref().filter(|v| !v.is_empty()) else {
        return Err(ApiError::bad_request("missing required field: status"));
    };

    let row = inbox::update_status(&state.pool, id, status).await?;
    Ok(Json(row))
}

impl From<InboxError> for ApiError {
    fn from(err: InboxError) -> Self {
        match err {
            InboxError::InvalidStatus(_) => Self::bad_request(err.to_string()),
            InboxError::NotFound(_) => Self::not_found(err.to_string()),
            InboxError::Database(e) => Self::internal(e),
        }
    }
}

#[cfg(test)]
#[path = "inbox_test.rs"]
mod tests;
