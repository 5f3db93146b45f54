//! Router configuration for the HTTP surface.

use axum::{
    extract::Request,
    middleware::{self, Next},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{delete, detail, join, login, logout, main, save, update, AppState};
use super::middleware::{create_cors_layer, session_auth};

/// Create the main router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let board_routes = Router::new()
        .route("/", get(main))
        .route("/board", post(save))
        .route("/board/:id", get(detail).put(update).delete(delete));

    let auth_routes = Router::new()
        .route("/join", post(join))
        .route("/login", post(login))
        .route("/logout", get(logout));

    let sessions = app_state.sessions.clone();

    Router::new()
        .merge(board_routes)
        .merge(auth_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req: Request, next: Next| {
                    let sessions = sessions.clone();
                    session_auth(sessions, req, next)
                })),
        )
        .with_state(app_state)
        .merge(create_health_router())
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
