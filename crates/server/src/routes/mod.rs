use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use shared::{
    BookmarkResponse, DeleteResponse, NewPuzzle, PuzzleDocument, PuzzleId, StatsResponse,
};

use crate::error::ApiError;
use crate::AppState;

/// Liveness check
pub async fn connected() -> &'static str {
    "Server is running!"
}

/// Save a submitted drawing
pub async fn create_puzzle(
    State(state): State<AppState>,
    Json(new): Json<NewPuzzle>,
) -> Result<(StatusCode, Json<PuzzleDocument>), ApiError> {
    let doc = state.store.insert(new).await.map_err(ApiError::Save)?;
    Ok((StatusCode::CREATED, Json(doc)))
}

pub async fn list_puzzles(State(state): State<AppState>) -> Json<Vec<PuzzleDocument>> {
    Json(state.store.find_all().await)
}

/// Single puzzle, or `null` when the id matches nothing
pub async fn get_puzzle(
    State(state): State<AppState>,
    Path(id): Path<PuzzleId>,
) -> Json<Option<PuzzleDocument>> {
    Json(state.store.find_one(&id).await)
}

/// Always answers success, whether or not the id exists
pub async fn bookmark_puzzle(
    State(state): State<AppState>,
    Path(id): Path<PuzzleId>,
) -> Json<BookmarkResponse> {
    match state.store.increment_bookmarks(&id).await {
        Ok(0) => tracing::debug!("Bookmark for unknown puzzle {}", id),
        Ok(_) => tracing::info!("Bookmarked puzzle {}", id),
        Err(e) => tracing::error!("Bookmark for puzzle {} not saved: {}", id, e),
    }
    Json(BookmarkResponse::bookmarked())
}

pub async fn delete_puzzle(
    State(state): State<AppState>,
    Path(id): Path<PuzzleId>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let count = state.store.remove(&id).await.map_err(ApiError::Delete)?;
    Ok(Json(DeleteResponse::deleted(count)))
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::active(state.store.count().await))
}
