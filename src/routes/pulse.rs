//! Pulse summary route.

use axum::extract::State;
use axum::response::Json;

use crate::routes::ApiError;
use crate::services::pulse::{self as pulse_svc, PulseSnapshot};
use crate::state::AppState;

/// `GET /api/pulse` — dashboard summary KPIs.
///
/// Answers from the refresher's cached snapshot; computes on demand only
/// before the first refresh has landed.
pub async fn pulse(State(state): State<AppState>) -> Result<Json<PulseSnapshot>, ApiError> {
    if let Some(snapshot) = state.pulse.read().await.clone() {
        return Ok(Json(snapshot));
    }

    let snapshot = pulse_svc::compute(&state.pool).await?;
    *state.pulse.write().await = Some(snapshot.clone());
    Ok(Json(snapshot))
}

#[cfg(test)]
#[path = "pulse_test.rs"]
mod tests;
