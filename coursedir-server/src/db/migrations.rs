//! Schema for the users and courses tables
//!
//! Statements are idempotent, so `run` is safe on every startup.

use sqlx::PgPool;

use super::DbError;

const STATEMENTS: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            first_name VARCHAR(192) NOT NULL,
            last_name VARCHAR(192) NOT NULL,
            email_address TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "courses",
        r#"
        CREATE TABLE IF NOT EXISTS courses (
            id BIGSERIAL PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            description TEXT NOT NULL,
            estimated_time TEXT,
            materials_needed TEXT,
            creator_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "idx_courses_creator",
        "CREATE INDEX IF NOT EXISTS idx_courses_creator ON courses(creator_id)",
    ),
];

/// Create tables and indexes that don't exist yet.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running migrations...");

    for (name, sql) in STATEMENTS {
        tracing::debug!(object = *name, "applying");
        sqlx::query(*sql).execute(pool).await?;
    }

    tracing::info!("Migrations complete");
    Ok(())
}
