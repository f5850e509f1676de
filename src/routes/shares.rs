//! Share/escalation route.

use axum::extract::State;
use axum::response::Json;
use serde_json::{Value, json};

use crate::routes::ApiError;
use crate::services::share::{self, ShareError, ShareRequest};
use crate::state::AppState;

/// `POST /api/shares` — share or escalate an item into an agent inbox.
pub async fn create_share(
    State(state): State<AppState>,
    Json(body): Json<ShareRequest>,
) -> Result<Json<Value>, ApiError> {
    let outcome = share::create(&state.pool, &body).await?;
    Ok(Json(json!({ "id": outcome.id, "message": outcome.message })))
}

impl From<ShareError> for ApiError {
    fn from(err: ShareError) -> Self {
        match err {
            ShareError::Validation(_) => Self::bad_request(err.to_string()),
            ShareError::NotFound { .. } => Self::not_found(err.to_string()),
            ShareError::Database(e) => Self::internal(e),
        }
    }
}

#[cfg(test)]
#[path = "shares_test.rs"]
mod tests;
