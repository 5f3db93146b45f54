//! Blog - a small blog with session login and board CRUD over HTTP.
//!
//! Users register and log in with a cookie session; logged-in users write
//! boards (posts) that only they can edit or delete.

pub mod auth;
pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    hash_password, register, validate_password, verify_password, AuthSession, LimitResult,
    LoginLimiter, PasswordError, Principal, RegistrationError, RegistrationRequest, SessionError,
    SessionManager, ValidationError,
};
pub use board::{Board, BoardDetail, BoardService, BoardSummary, BoardUpdate, NewBoardRequest};
pub use config::Config;
pub use db::{seed_example_data, Database, NewUser, User, UserRepository};
pub use error::{BlogError, Result};
pub use web::{create_router, AppState, WebServer};
