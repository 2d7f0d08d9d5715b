//! Route handlers organized by resource

use axum::http::Uri;

use crate::error::AppError;

pub mod courses;
pub mod health;
pub mod users;

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "no route");
    AppError::NotFound("Route Not Found".into())
}
