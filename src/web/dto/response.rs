//! Response DTOs for the HTTP surface.

use serde::Serialize;

use crate::board::{BoardDetail, BoardSummary};

/// Envelope code carried by every success body.
pub const SUCCESS_CODE: i32 = 1;

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Success envelope for mutating JSON endpoints.
#[derive(Debug, Serialize)]
pub struct ResponseDto {
    /// Always [`SUCCESS_CODE`].
    pub code: i32,
    /// Human-readable message.
    pub msg: String,
}

impl ResponseDto {
    /// Create a success envelope.
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            code: SUCCESS_CODE,
            msg: msg.into(),
        }
    }
}

// ============================================================================
// Board DTOs
// ============================================================================

/// One row of the main listing.
#[derive(Debug, Serialize)]
pub struct BoardMainResponse {
    pub id: i64,
    pub title: String,
    pub username: String,
}

impl From<BoardSummary> for BoardMainResponse {
    fn from(b: BoardSummary) -> Self {
        Self {
            id: b.id,
            title: b.title,
            username: b.username,
        }
    }
}

/// Board detail.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDetailResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub username: String,
    pub created_at: String,
}

impl From<BoardDetail> for BoardDetailResponse {
    fn from(b: BoardDetail) -> Self {
        Self {
            id: b.id,
            title: b.title,
            content: b.content,
            user_id: b.user_id,
            username: b.username,
            created_at: b.created_at,
        }
    }
}

/// View model for the main page.
#[derive(Debug, Serialize)]
pub struct MainView {
    pub dtos: Vec<BoardMainResponse>,
}

/// View model for the detail page.
#[derive(Debug, Serialize)]
pub struct DetailView {
    pub dto: BoardDetailResponse,
}
