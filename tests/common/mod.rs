//! Test helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::{header::COOKIE, HeaderName, HeaderValue};
use axum_test::TestServer;

use blog::auth::{Principal, SessionManager};
use blog::web::middleware::SESSION_COOKIE;
use blog::web::{create_router, AppState};
use blog::{seed_example_data, Database, UserRepository};

/// Create a test server with an empty in-memory database.
pub async fn create_test_server() -> (TestServer, Arc<AppState>) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    build_server(db)
}

/// Create a test server whose database holds the example users and boards.
pub async fn create_seeded_server() -> (TestServer, Arc<AppState>) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    seed_example_data(&db).await.expect("Failed to seed");
    build_server(db)
}

fn build_server(db: Database) -> (TestServer, Arc<AppState>) {
    let app_state = Arc::new(AppState::new(db, SessionManager::new()));
    let router = create_router(app_state.clone(), &[]);
    let server = TestServer::new(router).expect("Failed to create test server");
    (server, app_state)
}

/// Attach a session for an existing user and return the cookie header.
pub async fn login_as(state: &AppState, username: &str) -> (HeaderName, HeaderValue) {
    let user = UserRepository::new(state.db.pool())
        .get_by_username(username)
        .await
        .unwrap()
        .expect("user exists");
    let session = state
        .sessions
        .lock()
        .await
        .create_session(Principal::from(&user));

    session_header(&session.token)
}

/// Cookie header carrying the given session token.
pub fn session_header(token: &str) -> (HeaderName, HeaderValue) {
    (
        COOKIE,
        HeaderValue::from_str(&format!("{SESSION_COOKIE}={token}")).unwrap(),
    )
}
