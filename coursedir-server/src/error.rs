//! Application error type with IntoResponse
//!
//! Every failure a handler can produce maps to one status code and a JSON
//! body of the form `{"error": <code>, "message": <text>}`.

use axum::extract::rejection::JsonRejection;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::auth::basic;
use crate::auth::PasswordError;
use crate::db::DbError;
use crate::models::ValidationErrors;

pub type AppResult<T> = Result<T, AppError>;

/// Message returned for any credential failure
pub const INVALID_CREDENTIALS: &str = "Access denied: invalid or missing credentials.";

/// Message returned when a non-owner tries to modify a course
pub const NOT_OWNER: &str = "Only the owner of a course may modify it.";

/// Message returned when registering an email that's taken
pub const EMAIL_IN_USE: &str = "Email address is already in use by another user.";

/// Application error with automatic HTTP status mapping
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Field validation failed (400)
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Malformed request (400)
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing or wrong credentials (401)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed (403)
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Resource or route not found (404)
    #[error("not found: {0}")]
    NotFound(String),

    /// Database error (500, logged)
    #[error("database error: {0}")]
    Database(DbError),

    /// Internal error (500, logged)
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized(INVALID_CREDENTIALS.to_owned())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            Self::Validation(errors) => json!({
                "error": "validation_error",
                "message": errors.to_string(),
                "errors": errors.to_details(),
            }),
            Self::BadRequest(message) => json!({
                "error": "bad_request",
                "message": message,
            }),
            Self::Unauthorized(message) => json!({
                "error": "unauthorized",
                "message": message,
            }),
            Self::Forbidden(message) => json!({
                "error": "forbidden",
                "message": message,
            }),
            Self::NotFound(message) => json!({
                "error": "not_found",
                "message": message,
            }),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                json!({
                    "error": "internal_error",
                    "message": "an internal error occurred",
                })
            }
            Self::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                json!({
                    "error": "internal_error",
                    "message": "an internal error occurred",
                })
            }
        };

        if matches!(self, Self::Unauthorized(_)) {
            return (
                status,
                [(header::WWW_AUTHENTICATE, basic::challenge())],
                Json(body),
            )
                .into_response();
        }

        (status, Json(body)).into_response()
    }
}

impl From<DbError> for AppError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => {
                Self::NotFound(format!("{} '{}' not found", resource, id))
            }
            DbError::Conflict {
                resource: "user",
                field: "emailAddress",
            } => Self::BadRequest(EMAIL_IN_USE.to_owned()),
            DbError::Conflict { resource, field } => {
                Self::BadRequest(format!("a {} with this {} already exists", resource, field))
            }
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(e: PasswordError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
