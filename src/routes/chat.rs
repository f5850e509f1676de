//! Chat assistant route.

use axum::response::Json;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::chat::{intent, respond};
use crate::routes::ApiError;

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    /// Kept as raw JSON so a non-string payload yields a 400, not a 422.
    pub message: Option<Value>,
}

/// `POST /api/chat` — classify a message and generate a reply.
pub async fn chat(Json(body): Json<ChatBody>) -> Result<Json<Value>, ApiError> {
    let Some(message) = body.message.as_ref().and_then(Value::as_str) else {
        return Err(ApiError::bad_request("message is required and must be a string"));
    };

    let result = intent::classify(message);
    let reply = respond::generate(&result).await;

    let mut payload = json!({
        "response": reply.message,
        "intent": result.intent,
        "confidence": result.confidence,
    });
    if let Some(filter_state) = reply.filter_state {
        if let Ok(value) = serde_json::to_value(&filter_state) {
            payload["filterState"] = value;
        }
    }
    Ok(Json(payload))
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
