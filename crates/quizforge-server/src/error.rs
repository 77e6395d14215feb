//! HTTP error responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use quizforge_core::QuizError;

/// Errors returned by the API handlers, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No session has been started yet.
    #[error("no session has been started")]
    NoSession,

    /// The request body could not be decoded.
    #[error("invalid request body: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Quiz(#[from] QuizError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoSession => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Quiz(QuizError::InvalidAnswer { .. })
            | ApiError::Quiz(QuizError::UnknownQuestion { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Quiz(QuizError::InvalidState { .. }) => StatusCode::CONFLICT,
            ApiError::Quiz(QuizError::Validation(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        } else {
            tracing::debug!("request rejected ({status}): {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
