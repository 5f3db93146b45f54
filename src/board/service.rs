//! Board service for the blog.
//!
//! This module provides the board operations exposed over HTTP: listing,
//! detail, and owner-checked create/update/delete. Every mutating call takes
//! the caller's [`Principal`] explicitly.

use tracing::info;

use crate::auth::Principal;
use crate::db::Database;
use crate::{BlogError, Result};

use super::repository::BoardRepository;
use super::types::{Board, BoardDetail, BoardSummary, BoardUpdate, NewBoard, NewBoardRequest};

/// Maximum length for board titles (in characters).
pub const MAX_TITLE_LENGTH: usize = 100;

/// Upper bound for a single listing request.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Validate a title string.
fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(BlogError::Validation("제목을 입력해주세요".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(BlogError::Validation(format!(
            "제목은 {}자 이하여야 합니다",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}

/// Validate a board body string.
fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(BlogError::Validation("내용을 입력해주세요".to_string()));
    }
    Ok(())
}

/// Service for board operations with ownership checking.
pub struct BoardService<'a> {
    db: &'a Database,
}

impl<'a> BoardService<'a> {
    /// Create a new BoardService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List the most recent boards, newest first.
    ///
    /// `limit` is clamped to `0..=MAX_LIST_LIMIT`; zero or less lists nothing.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<BoardSummary>> {
        let repo = BoardRepository::new(self.db.pool());
        repo.list_recent(limit.clamp(0, MAX_LIST_LIMIT)).await
    }

    /// Get a board with its author's username.
    pub async fn get_detail(&self, board_id: i64) -> Result<BoardDetail> {
        let repo = BoardRepository::new(self.db.pool());
        repo.get_detail(board_id)
            .await?
            .ok_or_else(|| BlogError::NotFound("board".to_string()))
    }

    /// Create a board owned by `principal`.
    pub async fn create(&self, principal: &Principal, request: NewBoardRequest) -> Result<Board> {
        validate_title(&request.title)?;
        validate_content(&request.content)?;

        let repo = BoardRepository::new(self.db.pool());
        let board = repo
            .create(&NewBoard::new(request.title, request.content, principal.id))
            .await?;

        info!(
            board_id = board.id,
            user_id = principal.id,
            "Board created"
        );
        Ok(board)
    }

    /// Replace the title and content of a board.
    ///
    /// Only the owner may update. The owner and creation time are unchanged.
    pub async fn update(
        &self,
        board_id: i64,
        principal: &Principal,
        update: BoardUpdate,
    ) -> Result<Board> {
        validate_title(&update.title)?;
        validate_content(&update.content)?;

        let repo = BoardRepository::new(self.db.pool());
        self.check_owner(&repo, board_id, principal, "수정").await?;

        // A concurrent delete between the check and the write leaves nothing to update
        if !repo.update_owned(board_id, principal.id, &update).await? {
            return Err(BlogError::NotFound("board".to_string()));
        }

        info!(board_id, user_id = principal.id, "Board updated");

        repo.get_by_id(board_id)
            .await?
            .ok_or_else(|| BlogError::NotFound("board".to_string()))
    }

    /// Delete a board. Only the owner may delete.
    pub async fn delete(&self, board_id: i64, principal: &Principal) -> Result<()> {
        let repo = BoardRepository::new(self.db.pool());
        self.check_owner(&repo, board_id, principal, "삭제").await?;

        if !repo.delete_owned(board_id, principal.id).await? {
            return Err(BlogError::NotFound("board".to_string()));
        }

        info!(board_id, user_id = principal.id, "Board deleted");
        Ok(())
    }

    async fn check_owner(
        &self,
        repo: &BoardRepository<'_>,
        board_id: i64,
        principal: &Principal,
        action: &str,
    ) -> Result<Board> {
        let board = repo
            .get_by_id(board_id)
            .await?
            .ok_or_else(|| BlogError::NotFound("board".to_string()))?;

        if !board.is_owned_by(principal.id) {
            return Err(BlogError::Permission(format!(
                "게시글을 {action}할 권한이 없습니다"
            )));
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{seed_example_data, NewUser, UserRepository};

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    async fn create_principal(db: &Database, username: &str) -> Principal {
        let user = UserRepository::new(db.pool())
            .create(&NewUser::new(
                username,
                "hash",
                format!("{username}@nate.com"),
            ))
            .await
            .unwrap();
        Principal::from(&user)
    }

    #[tokio::test]
    async fn test_create_and_get_detail() {
        let db = setup_db().await;
        let ssar = create_principal(&db, "ssar").await;
        let service = BoardService::new(&db);

        let board = service
            .create(&ssar, NewBoardRequest::new("제목", "내용"))
            .await
            .unwrap();
        assert_eq!(board.user_id, ssar.id);

        let detail = service.get_detail(board.id).await.unwrap();
        assert_eq!(detail.title, "제목");
        assert_eq!(detail.content, "내용");
        assert_eq!(detail.user_id, ssar.id);
        assert_eq!(detail.username, "ssar");
    }

    #[tokio::test]
    async fn test_get_detail_not_found() {
        let db = setup_db().await;
        let service = BoardService::new(&db);

        let result = service.get_detail(999).await;
        assert!(matches!(result, Err(BlogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_title_boundary() {
        let db = setup_db().await;
        let ssar = create_principal(&db, "ssar").await;
        let service = BoardService::new(&db);

        let title = "a".repeat(MAX_TITLE_LENGTH);
        assert!(service
            .create(&ssar, NewBoardRequest::new(title, "content"))
            .await
            .is_ok());

        let title = "가".repeat(MAX_TITLE_LENGTH);
        assert!(service
            .create(&ssar, NewBoardRequest::new(title, "content"))
            .await
            .is_ok());

        let title = "a".repeat(MAX_TITLE_LENGTH + 1);
        let result = service
            .create(&ssar, NewBoardRequest::new(title, "content"))
            .await;
        assert!(matches!(result, Err(BlogError::Validation(_))));

        let count = BoardRepository::new(db.pool()).count().await.unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_create_blank_fields_rejected() {
        let db = setup_db().await;
        let ssar = create_principal(&db, "ssar").await;
        let service = BoardService::new(&db);

        for (title, content) in [("", "content"), ("   ", "content"), ("title", ""), ("title", " \n")] {
            let result = service
                .create(&ssar, NewBoardRequest::new(title, content))
                .await;
            assert!(matches!(result, Err(BlogError::Validation(_))));
        }

        assert_eq!(BoardRepository::new(db.pool()).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_recent_order_and_limit() {
        let db = setup_db().await;
        let ssar = create_principal(&db, "ssar").await;
        let service = BoardService::new(&db);

        for n in 1..=3 {
            service
                .create(&ssar, NewBoardRequest::new(format!("title {n}"), "content"))
                .await
                .unwrap();
        }

        let boards = service.list_recent(2).await.unwrap();
        assert_eq!(boards.len(), 2);
        assert_eq!(boards[0].title, "title 3");
        assert_eq!(boards[1].title, "title 2");
    }

    #[tokio::test]
    async fn test_list_recent_clamps_limit() {
        let db = setup_db().await;
        let ssar = create_principal(&db, "ssar").await;
        let service = BoardService::new(&db);

        service
            .create(&ssar, NewBoardRequest::new("only", "content"))
            .await
            .unwrap();

        assert_eq!(service.list_recent(0).await.unwrap().len(), 0);
        assert_eq!(service.list_recent(-5).await.unwrap().len(), 0);
        assert_eq!(service.list_recent(i64::MAX).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_recent_empty() {
        let db = setup_db().await;
        let service = BoardService::new(&db);

        assert!(service.list_recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_by_owner() {
        let db = setup_db().await;
        let ssar = create_principal(&db, "ssar").await;
        let service = BoardService::new(&db);

        let board = service
            .create(&ssar, NewBoardRequest::new("old", "old"))
            .await
            .unwrap();
        let updated = service
            .update(board.id, &ssar, BoardUpdate::new("new", "new content"))
            .await
            .unwrap();

        assert_eq!(updated.title, "new");
        assert_eq!(updated.content, "new content");
        assert_eq!(updated.user_id, ssar.id);
        assert_eq!(updated.created_at, board.created_at);

        let detail = service.get_detail(board.id).await.unwrap();
        assert_eq!(detail.title, "new");
        assert_eq!(detail.user_id, ssar.id);
    }

    #[tokio::test]
    async fn test_update_by_other_user_denied() {
        let db = setup_db().await;
        let ssar = create_principal(&db, "ssar").await;
        let cos = create_principal(&db, "cos").await;
        let service = BoardService::new(&db);

        let board = service
            .create(&ssar, NewBoardRequest::new("old", "old"))
            .await
            .unwrap();
        let result = service
            .update(board.id, &cos, BoardUpdate::new("new", "new"))
            .await;
        assert!(matches!(result, Err(BlogError::Permission(_))));

        let detail = service.get_detail(board.id).await.unwrap();
        assert_eq!(detail.title, "old");
    }

    #[tokio::test]
    async fn test_update_validation_and_not_found() {
        let db = setup_db().await;
        let ssar = create_principal(&db, "ssar").await;
        let service = BoardService::new(&db);

        let result = service
            .update(999, &ssar, BoardUpdate::new("title", "content"))
            .await;
        assert!(matches!(result, Err(BlogError::NotFound(_))));

        let board = service
            .create(&ssar, NewBoardRequest::new("old", "old"))
            .await
            .unwrap();
        let result = service
            .update(
                board.id,
                &ssar,
                BoardUpdate::new("a".repeat(MAX_TITLE_LENGTH + 1), "content"),
            )
            .await;
        assert!(matches!(result, Err(BlogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_by_owner_then_not_found() {
        let db = setup_db().await;
        let ssar = create_principal(&db, "ssar").await;
        let service = BoardService::new(&db);

        let board = service
            .create(&ssar, NewBoardRequest::new("title", "content"))
            .await
            .unwrap();

        service.delete(board.id, &ssar).await.unwrap();
        assert!(matches!(
            service.get_detail(board.id).await,
            Err(BlogError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(board.id, &ssar).await,
            Err(BlogError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_by_other_user_denied() {
        let db = setup_db().await;
        let ssar = create_principal(&db, "ssar").await;
        let cos = create_principal(&db, "cos").await;
        let service = BoardService::new(&db);

        let board = service
            .create(&ssar, NewBoardRequest::new("title", "content"))
            .await
            .unwrap();

        let result = service.delete(board.id, &cos).await;
        assert!(matches!(result, Err(BlogError::Permission(_))));
        assert!(service.get_detail(board.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_seeded_listing_and_detail() {
        let db = setup_db().await;
        seed_example_data(&db).await.unwrap();
        let service = BoardService::new(&db);

        let boards = service.list_recent(6).await.unwrap();
        assert_eq!(boards.len(), 6);
        assert_eq!(boards[0].title, "1번째 제목");
        assert!(boards.iter().all(|b| b.username == "ssar"));

        let detail = service.get_detail(1).await.unwrap();
        assert_eq!(detail.title, "1번째 제목");
        assert_eq!(detail.content, "1번째 내용");
        assert_eq!(detail.user_id, 1);
        assert_eq!(detail.username, "ssar");
    }
}
