//! Router assembly and shared API error type.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds every HTTP endpoint under a single Axum router. Handlers translate
//! between the wire protocol and domain services; every failure is mapped
//! to an [`ApiError`] so clients always receive a JSON error body.

pub mod alerts;
pub mod cases;
pub mod chat;
pub mod export;
pub mod feed;
pub mod inbox;
pub mod proxy;
pub mod pulse;
pub mod shares;
pub mod uploads;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/alerts", get(alerts::list_alerts))
        .route("/api/cases", get(cases::list_cases))
        .route("/api/cases/export", get(export::export_cases))
        .route("/api/feed", get(feed::list_feed))
        .route("/api/inbox", get(inbox::list_inbox).patch(inbox::update_status))
        .route("/api/uploads", get(uploads::list_uploads))
        .route("/api/shares", post(shares::create_share))
        .route("/api/chat", post(chat::chat))
        .route("/api/pulse", get(pulse::pulse))
        .route("/api/analytics/{*path}", get(proxy::analytics))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// API ERROR
// =============================================================================

/// Route-layer error: an HTTP status plus a JSON `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.into() }
    }

    /// Log the underlying error server-side; the client gets a generic body.
    #[must_use]
    pub fn internal(err: impl std::fmt::Display) -> Self {
        error!(error = %err, "internal error");
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: "Internal server error".into() }
    }

    #[must_use]
    pub fn bad_gateway(err: impl std::fmt::Display) -> Self {
        error!(error = %err, "upstream error");
        Self { status: StatusCode::BAD_GATEWAY, message: "Upstream backend unavailable".into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::internal(err)
    }
}
