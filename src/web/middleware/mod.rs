//! Middleware for the HTTP surface.

pub mod cors;
pub mod session;

pub use cors::create_cors_layer;
pub use session::{session_auth, session_cookie, SessionUser, SharedSessions, SESSION_COOKIE};
