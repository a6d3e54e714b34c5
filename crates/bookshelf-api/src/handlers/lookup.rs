use axum::Json;
use axum::extract::{Query, State};
use bookshelf_core::AppError;
use bookshelf_lookup::BookLookup;

use crate::dto::LookupParams;
use crate::state::AppState;

/// GET /api/lookup?title=...&author=...
///
/// `title` also accepts a bare ISBN. Lookup degrades to an echo of the
/// query when Open Library has no match, so this only fails on a
/// missing title.
pub async fn lookup_book(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<BookLookup>, AppError> {
    let title = params
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::validation("title required"))?;
    Ok(Json(state.lookup.lookup(title, params.author.trim()).await))
}
