//! Admin user management

use auth::models::{NewUser, UserSummary};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{error::ApiResult, middleware::CurrentUser, state::AppState};

/// List all users, newest first
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserSummary>>> {
    Ok(Json(state.auth.list_users().await?))
}

/// Create a user with a password
pub async fn create_user(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(new_user) = payload?;
    let user = state.auth.create_user(&new_user).await?;
    tracing::info!("Admin {} created user {}", admin.id, user.id);

    Ok((StatusCode::CREATED, Json(UserSummary::from(user))))
}
