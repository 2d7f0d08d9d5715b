//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::PasswordHasher;
use crate::db::{MemoryStore, PgCourseRepo, PgUserRepo};
use crate::services::{CourseService, UserService};

/// Shared application state, cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub courses: CourseService,
}

impl AppState {
    pub fn new(users: UserService, courses: CourseService) -> Self {
        Self { users, courses }
    }

    /// State backed by PostgreSQL.
    pub fn postgres(pool: PgPool, hasher: PasswordHasher) -> Self {
        Self::new(
            UserService::new(Arc::new(PgUserRepo::new(pool.clone())), hasher),
            CourseService::new(Arc::new(PgCourseRepo::new(pool))),
        )
    }

    /// State backed by a fresh [`MemoryStore`]; nothing survives a restart.
    pub fn in_memory(hasher: PasswordHasher) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(
            UserService::new(store.clone(), hasher),
            CourseService::new(store),
        )
    }
}
