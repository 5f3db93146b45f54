//! Registration, login and logout handlers.

use axum::{extract::State, response::Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::auth::{
    self, register, RegistrationError, RegistrationRequest, SessionError, SessionManager,
};
use crate::db::UserRepository;
use crate::web::dto::{JoinRequest, LoginRequest, ValidatedForm};
use crate::web::error::ApiError;
use crate::web::middleware::{session_cookie, SharedSessions, SESSION_COOKIE};
use crate::Database;

/// Default number of boards on the main page.
pub const DEFAULT_MAIN_PAGE_SIZE: i64 = 20;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database pool wrapper.
    pub db: Database,
    /// Session table.
    pub sessions: SharedSessions,
    /// Boards listed on `/` when no limit is given.
    pub main_page_size: i64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, sessions: SessionManager) -> Self {
        Self {
            db,
            sessions: Arc::new(Mutex::new(sessions)),
            main_page_size: DEFAULT_MAIN_PAGE_SIZE,
        }
    }

    /// Set the main page size.
    pub fn with_main_page_size(mut self, size: i64) -> Self {
        self.main_page_size = size;
        self
    }
}

/// POST /join - User registration.
pub async fn join(
    State(state): State<Arc<AppState>>,
    ValidatedForm(req): ValidatedForm<JoinRequest>,
) -> Result<Redirect, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let request = RegistrationRequest::new(req.username, req.password, req.email);

    register(&repo, request).await.map_err(|e| match e {
        RegistrationError::Validation(e) => ApiError::unprocessable(e.to_string()),
        RegistrationError::UsernameExists => ApiError::conflict("이미 사용 중인 아이디입니다"),
        e => {
            tracing::error!("Registration failed: {}", e);
            ApiError::internal("Registration failed")
        }
    })?;

    Ok(Redirect::to("/"))
}

/// POST /login - User login.
///
/// Sets the session cookie and redirects to the main page.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedForm(req): ValidatedForm<LoginRequest>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let user = UserRepository::new(state.db.pool())
        .get_by_username(&req.username)
        .await?;

    let session = auth::login(&state.sessions, &req.username, &req.password, user)
        .await
        .map_err(|e| match e {
            SessionError::AccountLocked(secs) => ApiError::too_many_requests(format!(
                "로그인 시도가 너무 많습니다. {secs}초 후에 다시 시도해주세요"
            )),
            _ => ApiError::unauthorized("아이디 또는 비밀번호가 올바르지 않습니다"),
        })?;

    Ok((jar.add(session_cookie(session.token)), Redirect::to("/")))
}

/// GET /logout - End the current session.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.lock().await.logout(cookie.value());
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/"))
}
