//! Book repository implementation.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};

use bookshelf_core::result::AppResult;

use crate::models::{Book, Rating};
use crate::store::{Row, Store};

/// Query-string filters for the catalog listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookFilter {
    /// Keep books tagged with this genre (case-insensitive, exact label).
    pub genre: Option<String>,
    /// Keep books whose trigger warnings contain this substring.
    pub trigger: Option<String>,
    /// Keep books whose title or author contains this substring.
    pub search: Option<String>,
    /// `rating` or `title`; anything else keeps recency order.
    pub sort: Option<String>,
}

/// Fields accepted when adding a book.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBook {
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub isbn: Option<String>,
    pub cover_url: Option<String>,
    pub synopsis: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub trigger_warnings: Vec<String>,
    pub kindle_url: Option<String>,
    pub open_library_key: Option<String>,
    pub published_year: Option<i64>,
    pub page_count: Option<i64>,
    pub status: Option<String>,
    pub series_name: Option<String>,
    pub series_order: Option<f64>,
    pub recommended_by: Option<String>,
}

/// Partial update of mutable book fields. Absent fields are untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookPatch {
    pub genres: Option<Vec<String>>,
    pub trigger_warnings: Option<Vec<String>>,
    pub synopsis: Option<String>,
    pub cover_url: Option<String>,
    pub status: Option<String>,
    pub series_name: Option<String>,
    pub series_order: Option<f64>,
    pub recommended_by: Option<String>,
}

/// Repository for catalog CRUD operations.
#[derive(Debug, Clone)]
pub struct BookRepository {
    store: Arc<Store>,
}

impl BookRepository {
    /// Create a new book repository.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// List the catalog with rating aggregates, newest first, applying
    /// the filter in memory on the parsed tag arrays.
    pub fn list(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let rows = self.store.query(
            "SELECT b.*, ROUND(AVG(r.stars), 1) as avg_rating, COUNT(r.id) as rating_count \
             FROM books b LEFT JOIN ratings r ON r.book_id = b.id \
             GROUP BY b.id ORDER BY b.added_at DESC",
            &[],
        )?;
        let mut books: Vec<Book> = rows
            .into_iter()
            .map(book_from_row)
            .collect::<AppResult<_>>()?;

        if let Some(genre) = &filter.genre {
            books.retain(|b| b.genres.iter().any(|g| g.eq_ignore_ascii_case(genre)));
        }
        if let Some(trigger) = &filter.trigger {
            let needle = trigger.to_lowercase();
            books.retain(|b| {
                b.trigger_warnings
                    .iter()
                    .any(|t| t.to_lowercase().contains(&needle))
            });
        }
        if let Some(search) = &filter.search {
            let needle = search.to_lowercase();
            books.retain(|b| {
                b.title.to_lowercase().contains(&needle)
                    || b.author.to_lowercase().contains(&needle)
            });
        }

        match filter.sort.as_deref() {
            Some("rating") => books.sort_by(|a, b| {
                b.avg_rating
                    .unwrap_or(0.0)
                    .partial_cmp(&a.avg_rating.unwrap_or(0.0))
                    .unwrap_or(Ordering::Equal)
            }),
            Some("title") => books.sort_by(|a, b| a.title.cmp(&b.title)),
            _ => {}
        }

        Ok(books)
    }

    /// Fetch one book, without ratings.
    pub fn get(&self, id: i64) -> AppResult<Option<Book>> {
        let rows = self
            .store
            .query("SELECT * FROM books WHERE id = ?1", &[json!(id)])?;
        rows.into_iter().next().map(book_from_row).transpose()
    }

    /// Fetch one book with its ratings attached, newest first.
    pub fn get_with_ratings(&self, id: i64) -> AppResult<Option<Book>> {
        let Some(mut book) = self.get(id)? else {
            return Ok(None);
        };
        let rows = self.store.query(
            "SELECT * FROM ratings WHERE book_id = ?1 ORDER BY rated_at DESC",
            &[json!(id)],
        )?;
        book.ratings = rows
            .into_iter()
            .map(|r| serde_json::from_value::<Rating>(Value::Object(r)))
            .collect::<Result<_, _>>()?;
        Ok(Some(book))
    }

    /// Title of a book, if it exists. Used by activity logging and by
    /// plugin existence checks.
    pub fn title_of(&self, id: i64) -> AppResult<Option<String>> {
        let rows = self
            .store
            .query("SELECT title FROM books WHERE id = ?1", &[json!(id)])?;
        Ok(rows
            .into_iter()
            .next()
            .and_then(|r| r.get("title").and_then(Value::as_str).map(str::to_string)))
    }

    /// Id of an existing book with the same title and author, if any
    /// (case-insensitive).
    pub fn find_duplicate(&self, title: &str, author: &str) -> AppResult<Option<i64>> {
        let rows = self.store.query(
            "SELECT id FROM books WHERE LOWER(title) = LOWER(?1) AND LOWER(author) = LOWER(?2)",
            &[json!(title), json!(author)],
        )?;
        Ok(rows.into_iter().next().and_then(|r| r["id"].as_i64()))
    }

    /// Insert a book and persist. Returns the stored row.
    pub fn create(&self, new: &NewBook) -> AppResult<Book> {
        let id = self.store.run(
            "INSERT INTO books (title, author, isbn, cover_url, synopsis, genres, trigger_warnings, \
             kindle_url, open_library_key, published_year, page_count, status, series_name, \
             series_order, recommended_by) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, COALESCE(?12, 'finished'), ?13, ?14, ?15)",
            &[
                json!(new.title),
                json!(new.author),
                json!(new.isbn),
                json!(new.cover_url),
                json!(new.synopsis.clone().unwrap_or_default()),
                json!(new.genres),
                json!(new.trigger_warnings),
                json!(new.kindle_url),
                json!(new.open_library_key),
                json!(new.published_year),
                json!(new.page_count),
                json!(new.status),
                json!(new.series_name),
                json!(new.series_order),
                json!(new.recommended_by),
            ],
        )?;
        self.store.persist()?;
        self.get(id)?.ok_or_else(|| {
            bookshelf_core::AppError::database(format!("Book {id} vanished after insert"))
        })
    }

    /// Apply a partial update and persist. Returns the updated row, or
    /// `None` when the book does not exist.
    pub fn update(&self, id: i64, patch: &BookPatch) -> AppResult<Option<Book>> {
        if self.get(id)?.is_none() {
            return Ok(None);
        }

        if let Some(genres) = &patch.genres {
            self.store.run(
                "UPDATE books SET genres = ?1 WHERE id = ?2",
                &[json!(genres), json!(id)],
            )?;
        }
        if let Some(triggers) = &patch.trigger_warnings {
            self.store.run(
                "UPDATE books SET trigger_warnings = ?1 WHERE id = ?2",
                &[json!(triggers), json!(id)],
            )?;
        }
        if let Some(synopsis) = &patch.synopsis {
            self.store.run(
                "UPDATE books SET synopsis = ?1 WHERE id = ?2",
                &[json!(synopsis), json!(id)],
            )?;
        }
        if let Some(cover_url) = &patch.cover_url {
            self.store.run(
                "UPDATE books SET cover_url = ?1 WHERE id = ?2",
                &[json!(cover_url), json!(id)],
            )?;
        }
        if let Some(status) = &patch.status {
            self.store.run(
                "UPDATE books SET status = ?1 WHERE id = ?2",
                &[json!(status), json!(id)],
            )?;
        }
        if let Some(series_name) = &patch.series_name {
            self.store.run(
                "UPDATE books SET series_name = ?1 WHERE id = ?2",
                &[json!(series_name), json!(id)],
            )?;
        }
        if let Some(series_order) = &patch.series_order {
            self.store.run(
                "UPDATE books SET series_order = ?1 WHERE id = ?2",
                &[json!(series_order), json!(id)],
            )?;
        }
        if let Some(recommended_by) = &patch.recommended_by {
            self.store.run(
                "UPDATE books SET recommended_by = ?1 WHERE id = ?2",
                &[json!(recommended_by), json!(id)],
            )?;
        }

        self.store.persist()?;
        self.get(id)
    }

    /// Delete a book and its ratings, then persist.
    pub fn delete(&self, id: i64) -> AppResult<()> {
        self.store
            .run("DELETE FROM ratings WHERE book_id = ?1", &[json!(id)])?;
        self.store
            .run("DELETE FROM books WHERE id = ?1", &[json!(id)])?;
        self.store.persist()
    }

    /// Distinct genres and trigger warnings across the catalog, sorted.
    pub fn distinct_tags(&self) -> AppResult<(Vec<String>, Vec<String>)> {
        let rows = self
            .store
            .query("SELECT genres, trigger_warnings FROM books", &[])?;
        let mut genres = std::collections::BTreeSet::new();
        let mut triggers = std::collections::BTreeSet::new();
        for row in rows {
            for genre in parse_tags(row.get("genres")) {
                genres.insert(genre);
            }
            for trigger in parse_tags(row.get("trigger_warnings")) {
                triggers.insert(trigger);
            }
        }
        Ok((
            genres.into_iter().collect(),
            triggers.into_iter().collect(),
        ))
    }
}

/// Converts a raw row into a [`Book`], parsing the JSON-text tag columns.
fn book_from_row(mut row: Row) -> AppResult<Book> {
    for key in ["genres", "trigger_warnings"] {
        let tags = parse_tags(row.get(key));
        row.insert(key.to_string(), json!(tags));
    }
    Ok(serde_json::from_value(Value::Object(row))?)
}

fn parse_tags(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => serde_json::from_str(s).unwrap_or_default(),
        _ => Vec::new(),
    }
}
