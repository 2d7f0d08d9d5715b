//! Repository traits and their PostgreSQL implementations
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Relies on DB constraints and maps violations (no check-then-insert)
//! - Object-safe, so handlers can run against Postgres or memory

use async_trait::async_trait;

use crate::models::{Course, CourseDetails, CourseInput, EmailAddress, NewUser, User};

pub mod courses;
pub mod users;

pub use courses::PgCourseRepo;
pub use users::PgUserRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: a {resource} with this {field} already exists")]
    Conflict {
        resource: &'static str,
        field: &'static str,
    },
}

/// User persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user with an already-hashed password.
    ///
    /// Fails with [`DbError::Conflict`] when the email is taken.
    async fn create(&self, user: &NewUser, password_hash: &str) -> Result<User, DbError>;

    /// Look a user up by (normalized) email address.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, DbError>;

    /// Number of stored users.
    async fn count(&self) -> Result<i64, DbError>;
}

/// Course persistence
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// All courses with their creators, ordered by id.
    async fn list(&self) -> Result<Vec<CourseDetails>, DbError>;

    /// One course with its creator.
    async fn find_by_id(&self, id: i64) -> Result<Option<CourseDetails>, DbError>;

    /// Insert a course owned by `creator_id`.
    ///
    /// Fails with [`DbError::NotFound`] when the creator doesn't exist.
    async fn create(&self, creator_id: i64, input: &CourseInput) -> Result<Course, DbError>;

    /// Replace a course's editable fields.
    async fn update(&self, id: i64, input: &CourseInput) -> Result<Course, DbError>;

    /// Delete a course.
    async fn delete(&self, id: i64) -> Result<(), DbError>;

    /// Number of stored courses.
    async fn count(&self) -> Result<i64, DbError>;
}

pub(crate) fn course_not_found(id: i64) -> DbError {
    DbError::NotFound {
        resource: "course",
        id: id.to_string(),
    }
}
