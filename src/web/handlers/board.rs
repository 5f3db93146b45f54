//! Board handlers.

use axum::{
    extract::State,
    response::Redirect,
    Json,
};
use std::sync::Arc;

use crate::board::{BoardService, BoardUpdate, NewBoardRequest};
use crate::web::dto::{
    ApiPath, ApiQuery, BoardDetailResponse, BoardMainResponse, BoardSaveRequest,
    BoardUpdateRequest, DetailView, ListQuery, MainView, ResponseDto, ValidatedForm,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::SessionUser;

/// GET / - Most recent boards.
pub async fn main(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<MainView>, ApiError> {
    let limit = query.limit.unwrap_or(state.main_page_size);
    let boards = BoardService::new(&state.db).list_recent(limit).await?;

    Ok(Json(MainView {
        dtos: boards.into_iter().map(BoardMainResponse::from).collect(),
    }))
}

/// GET /board/:id - Board detail.
pub async fn detail(
    State(state): State<Arc<AppState>>,
    ApiPath(board_id): ApiPath<i64>,
) -> Result<Json<DetailView>, ApiError> {
    let board = BoardService::new(&state.db).get_detail(board_id).await?;

    Ok(Json(DetailView {
        dto: BoardDetailResponse::from(board),
    }))
}

/// POST /board - Create a board.
pub async fn save(
    State(state): State<Arc<AppState>>,
    SessionUser(principal): SessionUser,
    ValidatedForm(req): ValidatedForm<BoardSaveRequest>,
) -> Result<Redirect, ApiError> {
    BoardService::new(&state.db)
        .create(&principal, NewBoardRequest::new(req.title, req.content))
        .await?;

    Ok(Redirect::to("/"))
}

/// PUT /board/:id - Update a board.
pub async fn update(
    State(state): State<Arc<AppState>>,
    ApiPath(board_id): ApiPath<i64>,
    SessionUser(principal): SessionUser,
    ValidatedJson(req): ValidatedJson<BoardUpdateRequest>,
) -> Result<Json<ResponseDto>, ApiError> {
    BoardService::new(&state.db)
        .update(board_id, &principal, BoardUpdate::new(req.title, req.content))
        .await?;

    Ok(Json(ResponseDto::success("글수정 성공")))
}

/// DELETE /board/:id - Delete a board.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    ApiPath(board_id): ApiPath<i64>,
    SessionUser(principal): SessionUser,
) -> Result<Json<ResponseDto>, ApiError> {
    BoardService::new(&state.db)
        .delete(board_id, &principal)
        .await?;

    Ok(Json(ResponseDto::success("글삭제 성공")))
}
