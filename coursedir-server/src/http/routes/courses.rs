//! Course endpoints
//!
//! Reads are public; writes need credentials, and PUT/DELETE need the
//! course's owner (enforced by the [`OwnedCourse`] extractor).

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::users::UserResponse;
use crate::error::AppError;
use crate::http::extractors::{CurrentUser, JsonBody, OwnedCourse, ValidId};
use crate::models::{CourseDetails, CourseInput};
use crate::state::AppState;

/// Create/update course request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

impl CourseRequest {
    fn into_input(self) -> Result<CourseInput, AppError> {
        Ok(CourseInput::parse(
            self.title,
            self.description,
            self.estimated_time,
            self.materials_needed,
        )?)
    }
}

/// Course response with its creator
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub creator_id: i64,
    pub created_at: String,
    pub updated_at: String,
    pub creator: UserResponse,
}

impl From<CourseDetails> for CourseResponse {
    fn from(d: CourseDetails) -> Self {
        let c = d.course;
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            estimated_time: c.estimated_time,
            materials_needed: c.materials_needed,
            creator_id: c.creator_id,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
            creator: d.creator.into(),
        }
    }
}

/// GET /api/courses - every course with its creator
async fn list_courses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CourseResponse>>, AppError> {
    let courses = state.courses.list().await?;
    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// GET /api/courses/{id}
async fn get_course(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<CourseResponse>, AppError> {
    let course = state.courses.get(id).await?;
    Ok(Json(CourseResponse::from(course)))
}

/// POST /api/courses - create a course owned by the caller
async fn create_course(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    JsonBody(req): JsonBody<CourseRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = state.courses.create(&user, req.into_input()?).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/courses/{}", id))],
    ))
}

/// PUT /api/courses/{id} - owner only
async fn update_course(
    State(state): State<Arc<AppState>>,
    owned: OwnedCourse,
    JsonBody(req): JsonBody<CourseRequest>,
) -> Result<StatusCode, AppError> {
    let input = req.into_input()?;
    state.courses.update(&owned.course, input).await?;
    tracing::debug!(course_id = owned.course.id(), user_id = owned.user.id, "updated via API");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/courses/{id} - owner only
async fn delete_course(
    State(state): State<Arc<AppState>>,
    owned: OwnedCourse,
) -> Result<StatusCode, AppError> {
    state.courses.delete(&owned.course).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Course routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/courses", get(list_courses).post(create_course))
        .route(
            "/api/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
}
