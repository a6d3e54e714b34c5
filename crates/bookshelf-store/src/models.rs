//! Host entity row types.

use serde::{Deserialize, Serialize};

/// A book in the shared catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Row id, referenced by ratings and plugin tables.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Author.
    pub author: String,
    /// ISBN, when known.
    pub isbn: Option<String>,
    /// Cover image URL.
    pub cover_url: Option<String>,
    /// Synopsis text.
    pub synopsis: Option<String>,
    /// Extracted genre labels.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Extracted trigger warnings.
    #[serde(default)]
    pub trigger_warnings: Vec<String>,
    /// Kindle search URL.
    pub kindle_url: Option<String>,
    /// Open Library work key.
    pub open_library_key: Option<String>,
    /// First publication year.
    pub published_year: Option<i64>,
    /// Page count.
    pub page_count: Option<i64>,
    /// Reading status (defaults to `finished`).
    pub status: Option<String>,
    /// Series name, when part of a series.
    pub series_name: Option<String>,
    /// Position within the series (fractional for novellas).
    pub series_order: Option<f64>,
    /// Who recommended it.
    pub recommended_by: Option<String>,
    /// When the book was added.
    pub added_at: Option<String>,
    /// Average star rating across readers (list view only).
    #[serde(default)]
    pub avg_rating: Option<f64>,
    /// Number of ratings (list view only).
    #[serde(default)]
    pub rating_count: i64,
    /// Per-reader ratings (populated in the detail view).
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

/// A reader's star rating of one book. One rating per (book, reader).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    /// Row id.
    pub id: i64,
    /// The rated book.
    pub book_id: i64,
    /// Reader's name.
    pub reader_name: String,
    /// Stars, 1–5.
    pub stars: i64,
    /// Optional short review.
    pub blurb: Option<String>,
    /// When the rating was made or last changed.
    pub rated_at: Option<String>,
}

/// One entry in the cross-plugin activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Row id.
    pub id: i64,
    /// Event type (`book_added`, `rating_added`, `dnf_added`, …).
    #[serde(rename = "type")]
    pub event_type: String,
    /// Acting reader, when attributable.
    pub reader_name: Option<String>,
    /// Related book id, when any.
    pub book_id: Option<i64>,
    /// Related book title, denormalized for display.
    pub book_title: Option<String>,
    /// Free-form detail.
    pub detail: Option<String>,
    /// When the event happened.
    pub created_at: Option<String>,
}
