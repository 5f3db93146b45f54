//! HTTP surface for the blog.
//!
//! This module exposes the board and account endpoints over axum, with
//! cookie sessions and a JSON error envelope.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
