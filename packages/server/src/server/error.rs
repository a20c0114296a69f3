//! HTTP mapping for forum errors.
//!
//! Error responses use the live-feed envelope shape (`{"type": "error",
//! "message": ...}`) so clients handle submission responses and stream events
//! with the same decoder.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::common::ForumError;

impl IntoResponse for ForumError {
    fn into_response(self) -> Response {
        let status = match &self {
            ForumError::Validation(_) => StatusCode::BAD_REQUEST,
            ForumError::NotFound(_) => StatusCode::NOT_FOUND,
            ForumError::Unauthorized(_) => StatusCode::FORBIDDEN,
            ForumError::Persistence(_) | ForumError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(serde_json::json!({
            "type": "error",
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
