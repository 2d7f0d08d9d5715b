//! User endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::http::extractors::{CurrentUser, JsonBody};
use crate::models::{NewUser, User, UserSummary};
use crate::state::AppState;

/// Create user request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub password: Option<String>,
}

/// User response (never includes the password hash)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

impl From<UserSummary> for UserResponse {
    fn from(u: UserSummary) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            email_address: u.email_address,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(u: &User) -> Self {
        u.summary().into()
    }
}

/// GET /api/users - the authenticated user
async fn current_user(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

/// POST /api/users - register a new user
async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_user = NewUser::parse(req.first_name, req.last_name, req.email_address, req.password)?;
    state.users.register(new_user).await?;

    Ok((StatusCode::CREATED, [(header::LOCATION, "/")]))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/users", get(current_user).post(create_user))
}
