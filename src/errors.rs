//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion into the response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::config::MSG_USER_NOT_FOUND;
use crate::domain::FieldErrors;
use crate::types::Envelope;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("{}", MSG_USER_NOT_FOUND)]
    NotFound,

    /// The request was understood but cannot be applied, optionally with
    /// per-field validation messages.
    #[error("{message}")]
    Unprocessable {
        message: String,
        errors: Option<FieldErrors>,
    },

    // Request shape
    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Content-Type must be application/json")]
    UnsupportedMediaType,

    #[error("Accept header must include {0}")]
    NotAcceptable(&'static str),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound | AppError::Unprocessable { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Build the response envelope for this error.
    pub fn envelope(&self) -> Envelope {
        let envelope = Envelope::message(self.user_message());
        match self {
            AppError::Unprocessable {
                errors: Some(errors),
                ..
            } => envelope.with_errors(errors.clone()),
            _ => envelope,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.envelope())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    /// Validation failure carrying every field violation.
    pub fn invalid(errors: FieldErrors) -> Self {
        AppError::Unprocessable {
            message: "Validation failed".to_string(),
            errors: Some(errors),
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        AppError::Unprocessable {
            message: message.into(),
            errors: None,
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Replace the message of an unprocessable error, leaving others as-is.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        match self {
            AppError::Unprocessable { errors, .. } => AppError::Unprocessable {
                message: message.into(),
                errors,
            },
            other => other,
        }
    }
}
