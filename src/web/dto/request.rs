//! Request DTOs for the HTTP surface.

use serde::Deserialize;
use validator::Validate;

use super::validation::{no_control_chars, not_empty_trimmed};

/// Title must be non-blank plain text.
fn valid_title(value: &str) -> Result<(), validator::ValidationError> {
    not_empty_trimmed(value)?;
    no_control_chars(value)
}

/// Query string for the main listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Maximum number of boards; the configured page size when absent.
    pub limit: Option<i64>,
}

/// Form body for creating a board.
#[derive(Debug, Deserialize, Validate)]
pub struct BoardSaveRequest {
    #[validate(
        length(max = 100, message = "제목은 100자 이하여야 합니다"),
        custom(function = "valid_title")
    )]
    pub title: String,
    #[validate(custom(function = "not_empty_trimmed"))]
    pub content: String,
}

/// JSON body for updating a board.
#[derive(Debug, Deserialize, Validate)]
pub struct BoardUpdateRequest {
    #[validate(
        length(max = 100, message = "제목은 100자 이하여야 합니다"),
        custom(function = "valid_title")
    )]
    pub title: String,
    #[validate(custom(function = "not_empty_trimmed"))]
    pub content: String,
}

/// Form body for user registration.
#[derive(Debug, Deserialize, Validate)]
pub struct JoinRequest {
    #[validate(length(min = 2, max = 20, message = "아이디는 2자 이상 20자 이하여야 합니다"))]
    pub username: String,
    #[validate(length(min = 4, max = 128, message = "비밀번호는 4자 이상이어야 합니다"))]
    pub password: String,
    #[validate(email(message = "이메일 형식이 올바르지 않습니다"))]
    pub email: String,
}

/// Form body for login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "not_empty_trimmed"))]
    pub username: String,
    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}
