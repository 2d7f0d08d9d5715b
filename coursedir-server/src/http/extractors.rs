//! Custom Axum extractors
//!
//! Handlers list these in check order: credentials, then path id, then the
//! course and its owner, then the JSON body (always last).

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;

use crate::auth::Credentials;
use crate::error::AppError;
use crate::models::{CourseDetails, User};
use crate::state::AppState;

/// The user named by the request's Basic credentials
pub struct CurrentUser(pub User);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(credentials) = Credentials::from_headers(&parts.headers) else {
            tracing::debug!(path = %parts.uri.path(), "missing or malformed Authorization header");
            return Err(AppError::unauthorized());
        };

        let user = state.users.authenticate(credentials).await?;
        Ok(Self(user))
    }
}

/// Extract and validate a positive integer id from path
pub struct ValidId(pub i64);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest("missing id in path".into()))?;

        match id.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(AppError::BadRequest(format!(
                "invalid id '{}': must be a positive integer",
                id
            ))),
        }
    }
}

/// A course the authenticated user is allowed to modify
pub struct OwnedCourse {
    pub user: User,
    pub course: CourseDetails,
}

impl FromRequestParts<Arc<AppState>> for OwnedCourse {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        let ValidId(id) = ValidId::from_request_parts(parts, state).await?;
        let course = state.courses.owned_by(&user, id).await?;

        Ok(Self { user, course })
    }
}

/// `Json` whose rejections use the API's error body
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
