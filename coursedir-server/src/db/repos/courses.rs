//! Course repository
//!
//! Reads always JOIN the creator so a course is never returned without its
//! owner's public fields.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{course_not_found, CourseRepository, DbError};
use crate::models::{Course, CourseDetails, CourseInput, UserSummary};

const SELECT_WITH_CREATOR: &str = r#"
    SELECT c.id, c.title, c.description, c.estimated_time, c.materials_needed,
           c.creator_id, c.created_at, c.updated_at,
           u.first_name AS creator_first_name,
           u.last_name AS creator_last_name,
           u.email_address AS creator_email_address
    FROM courses c
    JOIN users u ON u.id = c.creator_id
"#;

const RETURNING_COURSE: &str = r#"
    RETURNING id, title, description, estimated_time, materials_needed,
              creator_id, created_at, updated_at
"#;

/// PostgreSQL-backed course repository
#[derive(Clone)]
pub struct PgCourseRepo {
    pool: PgPool,
}

impl PgCourseRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn details_from_row(row: &PgRow) -> Result<CourseDetails, sqlx::Error> {
    let creator_id: i64 = row.try_get("creator_id")?;

    Ok(CourseDetails {
        course: Course {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            estimated_time: row.try_get("estimated_time")?,
            materials_needed: row.try_get("materials_needed")?,
            creator_id,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        },
        creator: UserSummary {
            id: creator_id,
            first_name: row.try_get("creator_first_name")?,
            last_name: row.try_get("creator_last_name")?,
            email_address: row.try_get("creator_email_address")?,
        },
    })
}

#[async_trait]
impl CourseRepository for PgCourseRepo {
    async fn list(&self) -> Result<Vec<CourseDetails>, DbError> {
        let sql = format!("{SELECT_WITH_CREATOR} ORDER BY c.id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter()
            .map(details_from_row)
            .collect::<Result<_, _>>()
            .map_err(DbError::from)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CourseDetails>, DbError> {
        let sql = format!("{SELECT_WITH_CREATOR} WHERE c.id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(details_from_row).transpose()?)
    }

    async fn create(&self, creator_id: i64, input: &CourseInput) -> Result<Course, DbError> {
        let sql = format!(
            r#"
            INSERT INTO courses (title, description, estimated_time, materials_needed, creator_id)
            VALUES ($1, $2, $3, $4, $5)
            {RETURNING_COURSE}
            "#
        );

        sqlx::query_as::<_, Course>(&sql)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.estimated_time)
            .bind(&input.materials_needed)
            .bind(creator_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    DbError::NotFound {
                        resource: "user",
                        id: creator_id.to_string(),
                    }
                }
                other => DbError::Sqlx(other),
            })
    }

    async fn update(&self, id: i64, input: &CourseInput) -> Result<Course, DbError> {
        let sql = format!(
            r#"
            UPDATE courses
            SET title = $2, description = $3, estimated_time = $4,
                materials_needed = $5, updated_at = NOW()
            WHERE id = $1
            {RETURNING_COURSE}
            "#
        );

        sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.estimated_time)
            .bind(&input.materials_needed)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| course_not_found(id))
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(course_not_found(id));
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM courses")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
