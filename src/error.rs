// src/error.rs
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the HTTP handlers.
///
/// Upstream failures deliberately collapse to a generic message: the detail
/// is logged server-side and never returned to the browser.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    /// Agent runtime call failed (transport, status, or decode).
    #[error("Agent runtime error: {0}")]
    Agent(String),

    /// Agent invocation exceeded the configured deadline.
    #[error("The request is taking too long. Please try again.")]
    Timeout,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Agent(detail) => {
                tracing::error!(%detail, "agent runtime call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Sorry, something went wrong while talking to the agent.".to_string(),
                )
            }
            AppError::Timeout => (StatusCode::GATEWAY_TIMEOUT, self.to_string()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout
        } else {
            AppError::Agent(err.to_string())
        }
    }
}
