//! Board model for the blog.
//!
//! A board is a single user-authored post: a title, a body and the user who
//! wrote it.

/// Board entity as stored in the `boards` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Board {
    /// Unique board ID.
    pub id: i64,
    /// Title (at most 100 characters).
    pub title: String,
    /// Body text.
    pub content: String,
    /// Owner's user ID, fixed at creation.
    pub user_id: i64,
    /// Creation timestamp.
    pub created_at: String,
}

impl Board {
    /// Check if the given user owns this board.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Row for the main listing.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BoardSummary {
    pub id: i64,
    pub title: String,
    /// Author's username.
    pub username: String,
}

/// Board joined with its author, for the detail view.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BoardDetail {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    /// Author's username.
    pub username: String,
    pub created_at: String,
}

/// Data for inserting a board row.
#[derive(Debug, Clone)]
pub struct NewBoard {
    pub title: String,
    pub content: String,
    /// Owner's user ID.
    pub user_id: i64,
}

impl NewBoard {
    /// Create a new board row for the given owner.
    pub fn new(title: impl Into<String>, content: impl Into<String>, user_id: i64) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            user_id,
        }
    }
}

/// Caller-supplied fields for creating a board.
///
/// The owner comes from the principal, never from the request.
#[derive(Debug, Clone)]
pub struct NewBoardRequest {
    pub title: String,
    pub content: String,
}

impl NewBoardRequest {
    /// Create a new request.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Replacement title and content for an existing board.
#[derive(Debug, Clone)]
pub struct BoardUpdate {
    pub title: String,
    pub content: String,
}

impl BoardUpdate {
    /// Create a new update.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_is_owned_by() {
        let board = Board {
            id: 1,
            title: "1번째 제목".to_string(),
            content: "1번째 내용".to_string(),
            user_id: 1,
            created_at: "2024-01-01 12:00:00".to_string(),
        };

        assert!(board.is_owned_by(1));
        assert!(!board.is_owned_by(2));
    }

    #[test]
    fn test_new_board() {
        let board = NewBoard::new("title", "content", 3);
        assert_eq!(board.title, "title");
        assert_eq!(board.content, "content");
        assert_eq!(board.user_id, 3);
    }
}
