//! Analytics proxy route.
//!
//! Heavy aggregation lives in a separate analytics backend; this route
//! forwards requests verbatim and relays the upstream response. Upstream
//! failures surface as 502 with a generic JSON body.

use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};

use crate::routes::ApiError;
use crate::state::AppState;

/// `GET /api/analytics/{*path}` — forward to `BACKEND_URL`.
pub async fn analytics(
    State(state): State<AppState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let mut url = format!("{}/{}", state.config.backend_url.trim_end_matches('/'), path);
    if let Some(query) = query {
        url.push('?');
        url.push_str(&query);
    }

    let upstream = state.http.get(&url).send().await.map_err(ApiError::bad_gateway)?;

    let status = StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_string();
    let body = upstream.bytes().await.map_err(ApiError::bad_gateway)?;

    Ok((status, [(CONTENT_TYPE, content_type)], body).into_response())
}
