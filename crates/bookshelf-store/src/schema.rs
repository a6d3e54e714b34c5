//! Host-owned schema and additive migrations.
//!
//! Runs on every process start: `CREATE TABLE IF NOT EXISTS` for the
//! host tables, then a list of `ALTER TABLE` statements for columns
//! added after the initial schema. A failed `ALTER TABLE` means the
//! column already exists and is ignored.

use tracing::debug;

use bookshelf_core::result::AppResult;

use crate::store::Store;

/// Host tables. Plugins define their own tables through the schema
/// extension protocol and never appear here.
const HOST_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    isbn TEXT,
    cover_url TEXT,
    synopsis TEXT,
    genres TEXT DEFAULT '[]',
    trigger_warnings TEXT DEFAULT '[]',
    kindle_url TEXT,
    open_library_key TEXT,
    published_year INTEGER,
    page_count INTEGER,
    status TEXT DEFAULT 'finished',
    series_name TEXT,
    series_order REAL,
    recommended_by TEXT,
    added_at DATETIME DEFAULT (datetime('now'))
);
CREATE TABLE IF NOT EXISTS ratings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    book_id INTEGER NOT NULL,
    reader_name TEXT NOT NULL,
    stars INTEGER NOT NULL,
    blurb TEXT,
    rated_at DATETIME DEFAULT (datetime('now')),
    UNIQUE(book_id, reader_name)
);
CREATE TABLE IF NOT EXISTS activity (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    type TEXT NOT NULL,
    reader_name TEXT,
    book_id INTEGER,
    book_title TEXT,
    detail TEXT,
    created_at DATETIME DEFAULT (datetime('now'))
);
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

/// Columns added after the initial release. Safe to run against
/// databases created from the current `HOST_SCHEMA` too.
const ADDITIVE_MIGRATIONS: &[&str] = &[
    "ALTER TABLE books ADD COLUMN status TEXT DEFAULT 'finished'",
    "ALTER TABLE books ADD COLUMN series_name TEXT",
    "ALTER TABLE books ADD COLUMN series_order REAL",
    "ALTER TABLE books ADD COLUMN recommended_by TEXT",
];

/// Creates the host schema, applies additive migrations, and persists.
pub fn initialize(store: &Store) -> AppResult<()> {
    store.execute_batch(HOST_SCHEMA)?;

    for sql in ADDITIVE_MIGRATIONS {
        if let Err(e) = store.execute_batch(sql) {
            debug!(statement = sql, error = %e, "Skipping migration (column exists)");
        }
    }

    store.persist()
}
