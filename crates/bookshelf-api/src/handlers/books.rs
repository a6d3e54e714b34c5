//! Catalog CRUD handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use bookshelf_core::AppError;
use bookshelf_store::models::Book;
use bookshelf_store::repositories::{BookFilter, BookPatch, NewBook};

use crate::dto::{FiltersResponse, OkResponse};
use crate::state::AppState;

/// GET /api/books?genre=&trigger=&search=&sort=
pub async fn list_books(
    State(state): State<AppState>,
    Query(filter): Query<BookFilter>,
) -> Result<Json<Vec<Book>>, AppError> {
    Ok(Json(state.books.list(&filter)?))
}

/// GET /api/books/{id}
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Book>, AppError> {
    let book = state
        .books
        .get_with_ratings(id)?
        .ok_or_else(|| AppError::not_found("Book not found"))?;
    Ok(Json(book))
}

/// POST /api/books
pub async fn create_book(
    State(state): State<AppState>,
    Json(new): Json<NewBook>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    if new.title.trim().is_empty() {
        return Err(AppError::validation("title required"));
    }
    if state.books.find_duplicate(&new.title, &new.author)?.is_some() {
        return Err(AppError::conflict("Book already in library"));
    }
    let book = state.books.create(&new)?;
    state.capabilities.log_activity(
        "book_added",
        book.recommended_by.as_deref(),
        Some(book.id),
        Some(&book.title),
        None,
    )?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// PATCH /api/books/{id}
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<BookPatch>,
) -> Result<Json<Book>, AppError> {
    let book = state
        .books
        .update(id, &patch)?
        .ok_or_else(|| AppError::not_found("Book not found"))?;
    Ok(Json(book))
}

/// DELETE /api/books/{id}
///
/// Also removes the book's ratings. Idempotent: deleting an unknown id
/// still answers ok.
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OkResponse>, AppError> {
    state.books.delete(id)?;
    Ok(Json(OkResponse::new()))
}

/// GET /api/filters
///
/// Distinct genres and trigger warnings across the catalog, sorted.
pub async fn list_filters(
    State(state): State<AppState>,
) -> Result<Json<FiltersResponse>, AppError> {
    let (genres, triggers) = state.books.distinct_tags()?;
    Ok(Json(FiltersResponse { genres, triggers }))
}
