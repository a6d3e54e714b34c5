//! DNF entry routes, mounted at `/api/plugins/dnf-tracker`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use bookshelf_core::AppError;
use bookshelf_plugin::HostCapabilities;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::plugin::DNF_REASONS;

type Host = Arc<dyn HostCapabilities>;

pub(crate) fn router(host: Host) -> Router {
    Router::new()
        .route("/", get(list_entries))
        .route("/book/{book_id}", get(entries_for_book).post(upsert_entry))
        .route("/counts", get(counts))
        .route("/reasons", get(reasons))
        .route("/{id}", delete(delete_entry))
        .with_state(host)
}

#[derive(Debug, Serialize)]
struct OkResponse {
    ok: bool,
}

#[derive(Debug, Deserialize)]
struct DnfRequest {
    reader_name: String,
    reason: Option<String>,
    stopped_at: Option<String>,
    notes: Option<String>,
}

/// GET / — every DNF entry, newest first, joined with book info.
async fn list_entries(State(host): State<Host>) -> Result<Json<Vec<Value>>, AppError> {
    let rows = host.query(
        "SELECT d.*, b.title, b.author, b.cover_url, b.genres, b.series_name \
         FROM dnf_entries d JOIN books b ON b.id = d.book_id \
         ORDER BY d.dnf_at DESC",
        &[],
    )?;
    let entries = rows
        .into_iter()
        .map(|mut row| {
            // Stored as JSON text; hand the client a real array.
            let genres = row
                .get("genres")
                .and_then(Value::as_str)
                .and_then(|raw| serde_json::from_str(raw).ok())
                .unwrap_or_else(|| json!([]));
            row.insert("genres".to_owned(), genres);
            Value::Object(row)
        })
        .collect();
    Ok(Json(entries))
}

/// GET /book/{book_id}
async fn entries_for_book(
    State(host): State<Host>,
    Path(book_id): Path<i64>,
) -> Result<Json<Vec<Map<String, Value>>>, AppError> {
    let rows = host.query(
        "SELECT * FROM dnf_entries WHERE book_id = ?1 ORDER BY dnf_at DESC",
        &[json!(book_id)],
    )?;
    Ok(Json(rows))
}

/// GET /counts — book id to DNF count, for card badges.
async fn counts(State(host): State<Host>) -> Result<Json<Map<String, Value>>, AppError> {
    let rows = host.query(
        "SELECT book_id, COUNT(*) as count FROM dnf_entries GROUP BY book_id",
        &[],
    )?;
    let mut map = Map::new();
    for row in rows {
        if let (Some(book_id), Some(count)) = (row["book_id"].as_i64(), row.get("count")) {
            map.insert(book_id.to_string(), count.clone());
        }
    }
    Ok(Json(map))
}

/// POST /book/{book_id} — log a DNF, replacing the reader's previous
/// entry for the same book.
async fn upsert_entry(
    State(host): State<Host>,
    Path(book_id): Path<i64>,
    Json(req): Json<DnfRequest>,
) -> Result<Json<OkResponse>, AppError> {
    if req.reader_name.trim().is_empty() {
        return Err(AppError::validation("reader_name required"));
    }

    let book = host.query(
        "SELECT id, title FROM books WHERE id = ?1",
        &[json!(book_id)],
    )?;
    let Some(title) = book.first().and_then(|row| row["title"].as_str()) else {
        return Err(AppError::not_found("Book not found"));
    };
    let title = title.to_owned();

    let existing = host.query(
        "SELECT id FROM dnf_entries WHERE book_id = ?1 AND reader_name = ?2",
        &[json!(book_id), json!(req.reader_name)],
    )?;
    if let Some(id) = existing.first().and_then(|row| row["id"].as_i64()) {
        host.run(
            "UPDATE dnf_entries SET reason = ?1, stopped_at = ?2, notes = ?3, \
             dnf_at = datetime('now') WHERE id = ?4",
            &[
                json!(req.reason),
                json!(req.stopped_at),
                json!(req.notes),
                json!(id),
            ],
        )?;
    } else {
        host.run(
            "INSERT INTO dnf_entries (book_id, reader_name, reason, stopped_at, notes) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            &[
                json!(book_id),
                json!(req.reader_name),
                json!(req.reason),
                json!(req.stopped_at),
                json!(req.notes),
            ],
        )?;
    }
    host.persist()?;
    host.log_activity(
        "dnf_added",
        Some(&req.reader_name),
        Some(book_id),
        Some(&title),
        Some(req.reason.as_deref().unwrap_or("No reason given")),
    )?;
    Ok(Json(OkResponse { ok: true }))
}

/// DELETE /{id}
async fn delete_entry(
    State(host): State<Host>,
    Path(id): Path<i64>,
) -> Result<Json<OkResponse>, AppError> {
    host.run("DELETE FROM dnf_entries WHERE id = ?1", &[json!(id)])?;
    host.persist()?;
    Ok(Json(OkResponse { ok: true }))
}

/// GET /reasons — canned abandonment reasons for the log form.
async fn reasons() -> Json<&'static [&'static str]> {
    Json(DNF_REASONS)
}
