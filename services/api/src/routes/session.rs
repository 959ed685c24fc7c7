//! Login, logout and the current user

use auth::models::{LoginCredentials, User};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use serde_json::json;

use crate::{
    error::ApiResult,
    middleware::{CurrentUser, removal_cookie, session_cookie},
    state::AppState,
};

/// Identity of the logged-in user
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub username: Option<String>,
    pub telegram_id: Option<i64>,
    pub is_admin: bool,
}

impl From<User> for MeResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            telegram_id: user.telegram_id,
            is_admin: user.is_admin,
        }
    }
}

/// Check credentials and set the session cookie
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginCredentials>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(credentials) = payload?;
    let outcome = state.auth.login(&credentials).await?;

    let jar = jar.add(session_cookie(outcome.token, state.secure_cookies));
    Ok((
        jar,
        Json(json!({
            "status": "ok",
            "is_admin": outcome.user.is_admin,
        })),
    ))
}

/// Drop the session cookie; the stored session simply runs out
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.remove(removal_cookie()), Json(json!({ "status": "ok" })))
}

pub async fn me(CurrentUser(user): CurrentUser) -> Json<MeResponse> {
    Json(MeResponse::from(user))
}
