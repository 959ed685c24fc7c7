//! Session cookie handling and the admin authorization guard

use auth::models::User;
use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;
use tracing::{error, warn};

use crate::{error::ApiError, state::AppState};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "session_token";

/// Cookie that stores a freshly issued session token
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .path("/")
        .max_age(time::Duration::days(auth::session::SESSION_TTL_DAYS))
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Cookie matching the session cookie, used to expire it on the client
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

/// Resolve the user behind the session cookie, if any
pub async fn session_user(state: &AppState, jar: &CookieJar) -> Result<Option<User>, ApiError> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };

    Ok(state.auth.sessions().resolve_session(cookie.value()).await?)
}

/// The authenticated user of the current request
///
/// Rejects with 401 when the request has no live session.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let jar = CookieJar::from_headers(&parts.headers);
        session_user(state, &jar)
            .await?
            .map(CurrentUser)
            .ok_or(ApiError::Unauthorized)
    }
}

/// Permission a guarded router requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Admin,
}

impl Capability {
    pub fn is_granted_to(self, user: &User) -> bool {
        match self {
            Capability::Admin => user.is_admin,
        }
    }
}

/// State of the authorization guard layer
#[derive(Clone)]
pub struct Guard {
    state: AppState,
    capability: Capability,
}

impl Guard {
    pub fn new(state: AppState, capability: Capability) -> Self {
        Self { state, capability }
    }
}

/// Fixed response for every request the guard turns away
pub fn access_denied() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "error": "Access denied" })),
    )
        .into_response()
}

/// Authorization middleware
///
/// Lets the request through only when its session resolves to a user holding
/// the guard's capability. The resolved user is stored in the request
/// extensions for [`CurrentUser`].
pub async fn require_capability(
    State(guard): State<Guard>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let user = match session_user(&guard.state, &jar).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!("Denied {} without a session", req.uri().path());
            return access_denied();
        }
        Err(e) => {
            error!("Session lookup failed in guard: {}", e);
            return access_denied();
        }
    };

    if !guard.capability.is_granted_to(&user) {
        warn!(
            "Denied {} to user {} lacking {:?}",
            req.uri().path(),
            user.id,
            guard.capability
        );
        return access_denied();
    }

    req.extensions_mut().insert(CurrentUser(user));
    next.run(req).await
}
