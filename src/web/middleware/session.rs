//! Cookie session middleware.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::auth::{Principal, SessionManager};
use crate::web::error::ApiError;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "SESSIONID";

/// Session table shared between handlers and the cleanup task.
pub type SharedSessions = Arc<Mutex<SessionManager>>;

/// Build the session cookie for a token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Extractor for the logged-in principal.
///
/// Rejects with 401 when the cookie is missing or the session is unknown,
/// expired or idle. A valid session has its activity time refreshed.
#[derive(Debug, Clone)]
pub struct SessionUser(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or_else(|| ApiError::unauthorized("로그인이 필요합니다"))?;

        let sessions = parts
            .extensions
            .get::<SharedSessions>()
            .ok_or_else(|| ApiError::internal("Session store not configured"))?;

        let principal = sessions.lock().await.touch_session(&token).map_err(|e| {
            tracing::debug!("Session rejected: {}", e);
            ApiError::unauthorized("로그인이 필요합니다")
        })?;

        Ok(SessionUser(principal))
    }
}

/// Middleware function to inject the session table into request extensions.
pub async fn session_auth(
    sessions: SharedSessions,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(sessions);
    next.run(request).await
}
