//! HTTP error mapping.
//!
//! Every error leaves the API as `{"detail": "<message>"}` with a status
//! derived from the core error. Internal failures are logged in full and
//! reported with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;
use skibidict_core::{RepoError, WordValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    /// Missing, malformed or unknown bearer token.
    Unauthorized,
    NotFound(String),
    /// Payload, path or query rejected before or during validation.
    InvalidInput(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub(crate) fn word_not_found() -> Self {
        Self::NotFound("Word not found".to_string())
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "Invalid or missing token"),
            Self::NotFound(message) | Self::InvalidInput(message) | Self::Conflict(message) => {
                write!(f, "{message}")
            }
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl Error for ApiError {}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        if value.is_validation() {
            Self::InvalidInput(value.to_string())
        } else if value.is_uniqueness_violation() {
            Self::Conflict(value.to_string())
        } else {
            Self::Internal(value.to_string())
        }
    }
}

impl From<WordValidationError> for ApiError {
    fn from(value: WordValidationError) -> Self {
        Self::InvalidInput(value.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Internal(format!("blocking task failed: {value}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            Self::Internal(message) => {
                error!(
                    "event=http_error module=api status=error code={} error={}",
                    status.as_u16(),
                    message
                );
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
