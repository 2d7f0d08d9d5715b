//! Course listing, creation and owner-only mutation

use std::sync::Arc;

use crate::db::{repos::course_not_found, CourseRepository};
use crate::error::{AppError, AppResult, NOT_OWNER};
use crate::models::{CourseDetails, CourseInput, User};

/// Course operations over any [`CourseRepository`]
#[derive(Clone)]
pub struct CourseService {
    repo: Arc<dyn CourseRepository>,
}

impl CourseService {
    pub fn new(repo: Arc<dyn CourseRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> AppResult<Vec<CourseDetails>> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: i64) -> AppResult<CourseDetails> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| course_not_found(id).into())
    }

    /// Create a course owned by `owner`, returning its id.
    pub async fn create(&self, owner: &User, input: CourseInput) -> AppResult<i64> {
        let course = self.repo.create(owner.id, &input).await?;
        tracing::info!(course_id = course.id, user_id = owner.id, "course created");
        Ok(course.id)
    }

    /// Load a course for modification by `user`.
    ///
    /// 404 if it doesn't exist, 403 if `user` didn't create it.
    pub async fn owned_by(&self, user: &User, id: i64) -> AppResult<CourseDetails> {
        let course = self.get(id).await?;

        if !course.is_owned_by(user.id) {
            tracing::warn!(
                course_id = id,
                user_id = user.id,
                owner_id = course.course.creator_id,
                "rejected modification by non-owner"
            );
            return Err(AppError::Forbidden(NOT_OWNER.to_owned()));
        }

        Ok(course)
    }

    pub async fn update(&self, course: &CourseDetails, input: CourseInput) -> AppResult<()> {
        self.repo.update(course.id(), &input).await?;
        tracing::info!(course_id = course.id(), "course updated");
        Ok(())
    }

    pub async fn delete(&self, course: &CourseDetails) -> AppResult<()> {
        self.repo.delete(course.id()).await?;
        tracing::info!(course_id = course.id(), "course deleted");
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        Ok(self.repo.count().await?)
    }
}
