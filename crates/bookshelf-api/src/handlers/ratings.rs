//! Star-rating handlers.

use axum::Json;
use axum::extract::{Path, State};
use bookshelf_core::AppError;

use crate::dto::{CreateRatingRequest, OkResponse};
use crate::state::AppState;

/// POST /api/books/{id}/ratings
///
/// One rating per (book, reader): a repeat submission from the same
/// reader replaces their previous stars and blurb.
pub async fn rate_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
    Json(req): Json<CreateRatingRequest>,
) -> Result<Json<OkResponse>, AppError> {
    if req.reader_name.trim().is_empty() || req.stars == 0 {
        return Err(AppError::validation("reader_name and stars required"));
    }
    let title = state
        .books
        .title_of(book_id)?
        .ok_or_else(|| AppError::not_found("Book not found"))?;

    state
        .ratings
        .upsert(book_id, &req.reader_name, req.stars, req.blurb.as_deref())?;
    state.capabilities.log_activity(
        "rating_added",
        Some(&req.reader_name),
        Some(book_id),
        Some(&title),
        Some(&format!("{} stars", req.stars)),
    )?;
    Ok(Json(OkResponse::new()))
}

/// DELETE /api/ratings/{id}
pub async fn delete_rating(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OkResponse>, AppError> {
    state.ratings.delete(id)?;
    Ok(Json(OkResponse::new()))
}
