//! Rating repository implementation.

use std::sync::Arc;

use serde_json::{Value, json};

use bookshelf_core::result::AppResult;

use crate::models::Rating;
use crate::store::Store;

/// Repository for per-reader star ratings.
#[derive(Debug, Clone)]
pub struct RatingRepository {
    store: Arc<Store>,
}

impl RatingRepository {
    /// Create a new rating repository.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Insert a rating, or replace the reader's existing rating for the
    /// same book (one rating per (book, reader)). Persists.
    pub fn upsert(
        &self,
        book_id: i64,
        reader_name: &str,
        stars: i64,
        blurb: Option<&str>,
    ) -> AppResult<()> {
        let existing = self.store.query(
            "SELECT id FROM ratings WHERE book_id = ?1 AND reader_name = ?2",
            &[json!(book_id), json!(reader_name)],
        )?;

        if let Some(id) = existing.first().and_then(|r| r["id"].as_i64()) {
            self.store.run(
                "UPDATE ratings SET stars = ?1, blurb = ?2, rated_at = datetime('now') WHERE id = ?3",
                &[json!(stars), json!(blurb), json!(id)],
            )?;
        } else {
            self.store.run(
                "INSERT INTO ratings (book_id, reader_name, stars, blurb) VALUES (?1, ?2, ?3, ?4)",
                &[json!(book_id), json!(reader_name), json!(stars), json!(blurb)],
            )?;
        }
        self.store.persist()
    }

    /// Ratings for one book, newest first.
    pub fn for_book(&self, book_id: i64) -> AppResult<Vec<Rating>> {
        let rows = self.store.query(
            "SELECT * FROM ratings WHERE book_id = ?1 ORDER BY rated_at DESC",
            &[json!(book_id)],
        )?;
        rows.into_iter()
            .map(|r| serde_json::from_value(Value::Object(r)).map_err(Into::into))
            .collect()
    }

    /// Delete a rating by id and persist.
    pub fn delete(&self, id: i64) -> AppResult<()> {
        self.store
            .run("DELETE FROM ratings WHERE id = ?1", &[json!(id)])?;
        self.store.persist()
    }
}
