//! In-memory implementation of the repository traits
//!
//! Intended for tests and `serve --in-memory`. Mirrors the Postgres
//! constraints: unique emails, creator must exist, sequential ids.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::repos::{course_not_found, CourseRepository, DbError, UserRepository};
use crate::models::{Course, CourseDetails, CourseInput, EmailAddress, NewUser, User};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    courses: BTreeMap<i64, Course>,
    last_user_id: i64,
    last_course_id: i64,
}

impl Tables {
    fn details(&self, course: &Course) -> Option<CourseDetails> {
        let creator = self.users.get(&course.creator_id)?;
        Some(CourseDetails {
            course: course.clone(),
            creator: creator.summary(),
        })
    }
}

/// Users and courses held behind a single lock
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &NewUser, password_hash: &str) -> Result<User, DbError> {
        let mut tables = self.tables.write().await;

        let taken = tables
            .users
            .values()
            .any(|u| u.email_address == user.email_address.as_str());
        if taken {
            return Err(DbError::Conflict {
                resource: "user",
                field: "emailAddress",
            });
        }

        tables.last_user_id += 1;
        let now = Utc::now();
        let stored = User {
            id: tables.last_user_id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email_address: user.email_address.as_str().to_owned(),
            password_hash: password_hash.to_owned(),
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email_address == email.as_str())
            .cloned())
    }

    async fn count(&self) -> Result<i64, DbError> {
        Ok(self.tables.read().await.users.len() as i64)
    }
}

#[async_trait]
impl CourseRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<CourseDetails>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .courses
            .values()
            .filter_map(|c| tables.details(c))
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CourseDetails>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.courses.get(&id).and_then(|c| tables.details(c)))
    }

    async fn create(&self, creator_id: i64, input: &CourseInput) -> Result<Course, DbError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&creator_id) {
            return Err(DbError::NotFound {
                resource: "user",
                id: creator_id.to_string(),
            });
        }

        tables.last_course_id += 1;
        let now = Utc::now();
        let course = Course {
            id: tables.last_course_id,
            title: input.title.clone(),
            description: input.description.clone(),
            estimated_time: input.estimated_time.clone(),
            materials_needed: input.materials_needed.clone(),
            creator_id,
            created_at: now,
            updated_at: now,
        };
        tables.courses.insert(course.id, course.clone());

        Ok(course)
    }

    async fn update(&self, id: i64, input: &CourseInput) -> Result<Course, DbError> {
        let mut tables = self.tables.write().await;
        let course = tables
            .courses
            .get_mut(&id)
            .ok_or_else(|| course_not_found(id))?;

        course.title = input.title.clone();
        course.description = input.description.clone();
        course.estimated_time = input.estimated_time.clone();
        course.materials_needed = input.materials_needed.clone();
        course.updated_at = Utc::now();

        Ok(course.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        tables
            .courses
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| course_not_found(id))
    }

    async fn count(&self) -> Result<i64, DbError> {
        Ok(self.tables.read().await.courses.len() as i64)
    }
}
