//! HTTP handlers.

pub mod auth;
pub mod board;

pub use auth::*;
pub use board::*;
