//! Course records and create/update input

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::user::UserSummary;
use super::validation::{optional_text, required_text, ValidationError, ValidationErrors};

/// Maximum length for course titles
pub const MAX_TITLE_LEN: usize = 255;

/// Stored course
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Course joined with its creator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetails {
    pub course: Course,
    pub creator: UserSummary,
}

impl CourseDetails {
    pub fn id(&self) -> i64 {
        self.course.id
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.course.creator_id == user_id
    }
}

/// Validated course fields, shared by create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseInput {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

impl CourseInput {
    /// Validate every field, collecting all failures.
    ///
    /// `description` and `materialsNeeded` keep their original whitespace
    /// (they are often multi-line markdown).
    pub fn parse(
        title: Option<String>,
        description: Option<String>,
        estimated_time: Option<String>,
        materials_needed: Option<String>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = errors.check(required_text("title", title, Some(MAX_TITLE_LEN)));
        let description = errors.check(match description {
            Some(d) if !d.trim().is_empty() => Ok(d),
            Some(_) => Err(ValidationError::Empty {
                field: "description",
            }),
            None => Err(ValidationError::Missing {
                field: "description",
            }),
        });

        match (title, description) {
            (Some(title), Some(description)) if errors.is_empty() => Ok(Self {
                title,
                description,
                estimated_time: optional_text(estimated_time).map(|t| t.trim().to_owned()),
                materials_needed: optional_text(materials_needed),
            }),
            _ => Err(errors),
        }
    }
}
