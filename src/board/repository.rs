//! Board repository for the blog.
//!
//! This module provides CRUD operations for boards in the database.

use super::types::{Board, BoardDetail, BoardSummary, BoardUpdate, NewBoard};
use crate::db::DbPool;
use crate::{BlogError, Result};

/// Repository for board CRUD operations.
pub struct BoardRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> BoardRepository<'a> {
    /// Create a new BoardRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new board in the database.
    ///
    /// Returns the created board with the assigned ID.
    pub async fn create(&self, new_board: &NewBoard) -> Result<Board> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO boards (title, content, user_id) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&new_board.title)
        .bind(&new_board.content)
        .bind(new_board.user_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| BlogError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| BlogError::NotFound("board".to_string()))
    }

    /// Get a board by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Board>> {
        let result = sqlx::query_as::<_, Board>(
            "SELECT id, title, content, user_id, created_at FROM boards WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| BlogError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a board joined with its author.
    pub async fn get_detail(&self, id: i64) -> Result<Option<BoardDetail>> {
        let result = sqlx::query_as::<_, BoardDetail>(
            "SELECT b.id, b.title, b.content, b.user_id, u.username, b.created_at
             FROM boards b
             INNER JOIN users u ON u.id = b.user_id
             WHERE b.id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| BlogError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List the most recent boards, newest first.
    ///
    /// Boards created in the same second are ordered by descending ID.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<BoardSummary>> {
        let boards = sqlx::query_as::<_, BoardSummary>(
            "SELECT b.id, b.title, u.username
             FROM boards b
             INNER JOIN users u ON u.id = b.user_id
             ORDER BY b.created_at DESC, b.id DESC
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await
        .map_err(|e| BlogError::Database(e.to_string()))?;

        Ok(boards)
    }

    /// Replace title and content of a board owned by `user_id`.
    ///
    /// Returns false if no board matched both the ID and the owner.
    pub async fn update_owned(&self, id: i64, user_id: i64, update: &BoardUpdate) -> Result<bool> {
        let result =
            sqlx::query("UPDATE boards SET title = ?, content = ? WHERE id = ? AND user_id = ?")
                .bind(&update.title)
                .bind(&update.content)
                .bind(id)
                .bind(user_id)
                .execute(self.pool)
                .await
                .map_err(|e| BlogError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a board owned by `user_id`.
    ///
    /// Returns false if no board matched both the ID and the owner.
    pub async fn delete_owned(&self, id: i64, user_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM boards WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await
            .map_err(|e| BlogError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all boards.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM boards")
            .fetch_one(self.pool)
            .await
            .map_err(|e| BlogError::Database(e.to_string()))?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::Database;

    async fn setup() -> (Database, i64, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let users = UserRepository::new(db.pool());
        let ssar = users
            .create(&NewUser::new("ssar", "hash", "ssar@nate.com"))
            .await
            .unwrap();
        let cos = users
            .create(&NewUser::new("cos", "hash", "cos@nate.com"))
            .await
            .unwrap();
        (db, ssar.id, cos.id)
    }

    #[tokio::test]
    async fn test_create_board() {
        let (db, ssar, _) = setup().await;
        let repo = BoardRepository::new(db.pool());

        let board = repo
            .create(&NewBoard::new("제목", "내용", ssar))
            .await
            .unwrap();

        assert!(board.id > 0);
        assert_eq!(board.title, "제목");
        assert_eq!(board.content, "내용");
        assert_eq!(board.user_id, ssar);
        assert!(!board.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let (db, _, _) = setup().await;
        let repo = BoardRepository::new(db.pool());

        assert!(repo.get_by_id(999).await.unwrap().is_none());
        assert!(repo.get_detail(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_detail_includes_username() {
        let (db, _, cos) = setup().await;
        let repo = BoardRepository::new(db.pool());
        let board = repo
            .create(&NewBoard::new("title", "content", cos))
            .await
            .unwrap();

        let detail = repo.get_detail(board.id).await.unwrap().unwrap();
        assert_eq!(detail.username, "cos");
        assert_eq!(detail.user_id, cos);
        assert_eq!(detail.created_at, board.created_at);
    }

    #[tokio::test]
    async fn test_list_recent_newest_first() {
        let (db, ssar, cos) = setup().await;
        let repo = BoardRepository::new(db.pool());

        // Same-second inserts fall back to descending ID
        for (title, owner) in [("a", ssar), ("b", cos), ("c", ssar)] {
            repo.create(&NewBoard::new(title, "content", owner))
                .await
                .unwrap();
        }

        let boards = repo.list_recent(10).await.unwrap();
        let titles: Vec<_> = boards.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b", "a"]);
        assert_eq!(boards[1].username, "cos");

        assert_eq!(repo.list_recent(2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_recent_empty() {
        let (db, _, _) = setup().await;
        let repo = BoardRepository::new(db.pool());

        assert!(repo.list_recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_owned() {
        let (db, ssar, cos) = setup().await;
        let repo = BoardRepository::new(db.pool());
        let board = repo
            .create(&NewBoard::new("old", "old", ssar))
            .await
            .unwrap();

        let update = BoardUpdate::new("new", "new content");
        assert!(!repo.update_owned(board.id, cos, &update).await.unwrap());
        assert!(!repo.update_owned(999, ssar, &update).await.unwrap());
        assert!(repo.update_owned(board.id, ssar, &update).await.unwrap());

        let updated = repo.get_by_id(board.id).await.unwrap().unwrap();
        assert_eq!(updated.title, "new");
        assert_eq!(updated.content, "new content");
        assert_eq!(updated.user_id, ssar);
    }

    #[tokio::test]
    async fn test_delete_owned() {
        let (db, ssar, cos) = setup().await;
        let repo = BoardRepository::new(db.pool());
        let board = repo
            .create(&NewBoard::new("title", "content", ssar))
            .await
            .unwrap();

        assert!(!repo.delete_owned(board.id, cos).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);

        assert!(repo.delete_owned(board.id, ssar).await.unwrap());
        assert!(!repo.delete_owned(board.id, ssar).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
