//! Board module for the blog.
//!
//! This module provides blog post ("board") functionality:
//! - Board model and request types
//! - SQL access through `BoardRepository`
//! - `BoardService` with validation and ownership checks

mod repository;
mod service;
mod types;

pub use repository::BoardRepository;
pub use service::{BoardService, MAX_LIST_LIMIT, MAX_TITLE_LENGTH};
pub use types::{Board, BoardDetail, BoardSummary, BoardUpdate, NewBoard, NewBoardRequest};
