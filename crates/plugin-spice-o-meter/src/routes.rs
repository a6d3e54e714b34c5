//! Spice rating routes, mounted at `/api/plugins/spice-o-meter`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use bookshelf_core::AppError;
use bookshelf_plugin::HostCapabilities;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

type Host = Arc<dyn HostCapabilities>;

pub(crate) fn router(host: Host) -> Router {
    Router::new()
        .route("/book/{book_id}", get(book_spice).post(rate_spice))
        .route("/books", get(all_books_spice))
        .route("/stats", get(stats))
        .route("/{id}", delete(delete_rating))
        .with_state(host)
}

#[derive(Debug, Serialize)]
struct OkResponse {
    ok: bool,
}

#[derive(Debug, Deserialize)]
struct SpiceRequest {
    reader_name: String,
    chillies: i64,
}

#[derive(Debug, Serialize)]
struct BookSpiceResponse {
    /// Average chillies rounded to one decimal; null when unrated.
    avg: Value,
    count: i64,
    ratings: Vec<Map<String, Value>>,
}

/// GET /book/{book_id}
async fn book_spice(
    State(host): State<Host>,
    Path(book_id): Path<i64>,
) -> Result<Json<BookSpiceResponse>, AppError> {
    let aggregate = host.query(
        "SELECT ROUND(AVG(chillies), 1) as avg, COUNT(*) as count \
         FROM spice_ratings WHERE book_id = ?1",
        &[json!(book_id)],
    )?;
    let ratings = host.query(
        "SELECT reader_name, chillies, rated_at FROM spice_ratings \
         WHERE book_id = ?1 ORDER BY rated_at DESC",
        &[json!(book_id)],
    )?;
    let (avg, count) = aggregate
        .first()
        .map(|row| (row["avg"].clone(), row["count"].as_i64().unwrap_or(0)))
        .unwrap_or((Value::Null, 0));
    Ok(Json(BookSpiceResponse { avg, count, ratings }))
}

/// GET /books — book id to `{avg, count}` for the whole catalog.
async fn all_books_spice(State(host): State<Host>) -> Result<Json<Map<String, Value>>, AppError> {
    let rows = host.query(
        "SELECT book_id, ROUND(AVG(chillies), 1) as avg, COUNT(*) as count \
         FROM spice_ratings GROUP BY book_id",
        &[],
    )?;
    let mut map = Map::new();
    for row in rows {
        if let Some(book_id) = row["book_id"].as_i64() {
            map.insert(
                book_id.to_string(),
                json!({"avg": row["avg"], "count": row["count"]}),
            );
        }
    }
    Ok(Json(map))
}

/// POST /book/{book_id} — rate, replacing the reader's previous rating.
async fn rate_spice(
    State(host): State<Host>,
    Path(book_id): Path<i64>,
    Json(req): Json<SpiceRequest>,
) -> Result<Json<OkResponse>, AppError> {
    if req.reader_name.trim().is_empty() || !(1..=5).contains(&req.chillies) {
        return Err(AppError::validation("reader_name and chillies (1-5) required"));
    }

    let book = host.query("SELECT id FROM books WHERE id = ?1", &[json!(book_id)])?;
    if book.is_empty() {
        return Err(AppError::not_found("Book not found"));
    }

    let existing = host.query(
        "SELECT id FROM spice_ratings WHERE book_id = ?1 AND reader_name = ?2",
        &[json!(book_id), json!(req.reader_name)],
    )?;
    if let Some(id) = existing.first().and_then(|row| row["id"].as_i64()) {
        host.run(
            "UPDATE spice_ratings SET chillies = ?1, rated_at = datetime('now') WHERE id = ?2",
            &[json!(req.chillies), json!(id)],
        )?;
    } else {
        host.run(
            "INSERT INTO spice_ratings (book_id, reader_name, chillies) VALUES (?1, ?2, ?3)",
            &[json!(book_id), json!(req.reader_name), json!(req.chillies)],
        )?;
    }
    host.persist()?;
    Ok(Json(OkResponse { ok: true }))
}

/// GET /stats — spiciest books and the chilli distribution.
async fn stats(State(host): State<Host>) -> Result<Json<Value>, AppError> {
    let spiciest = host.query(
        "SELECT b.title, b.author, b.cover_url, ROUND(AVG(s.chillies), 1) as avg_spice, \
         COUNT(s.id) as count \
         FROM books b JOIN spice_ratings s ON s.book_id = b.id \
         GROUP BY b.id ORDER BY avg_spice DESC, count DESC LIMIT 5",
        &[],
    )?;
    let distribution = host.query(
        "SELECT chillies, COUNT(*) as count FROM spice_ratings \
         GROUP BY chillies ORDER BY chillies",
        &[],
    )?;
    Ok(Json(json!({"spiciest": spiciest, "distribution": distribution})))
}

/// DELETE /{id}
async fn delete_rating(
    State(host): State<Host>,
    Path(id): Path<i64>,
) -> Result<Json<OkResponse>, AppError> {
    host.run("DELETE FROM spice_ratings WHERE id = ?1", &[json!(id)])?;
    host.persist()?;
    Ok(Json(OkResponse { ok: true }))
}
