//! The capability surface handed to plugins.
//!
//! Plugins never touch the database file or the connection directly.
//! Everything flows through [`HostCapabilities`], which keeps the
//! read/write/persist semantics of the shared store in one place.

use std::fmt;
use std::sync::Arc;

use bookshelf_core::AppResult;
use bookshelf_store::{Row, Store};
use serde_json::Value;

/// What a plugin is allowed to do with the host.
pub trait HostCapabilities: Send + Sync + fmt::Debug {
    /// Runs a read-only statement and returns the rows as JSON objects.
    fn query(&self, sql: &str, params: &[Value]) -> AppResult<Vec<Row>>;

    /// Runs a write statement against the in-memory database and returns
    /// the last inserted rowid. Does NOT flush to disk; call
    /// [`HostCapabilities::persist`] once the logical change is complete.
    fn run(&self, sql: &str, params: &[Value]) -> AppResult<i64>;

    /// Flushes the in-memory database to its backing file.
    fn persist(&self) -> AppResult<()>;

    /// Appends one row to the shared activity feed and persists it.
    fn log_activity(
        &self,
        event_type: &str,
        reader_name: Option<&str>,
        book_id: Option<i64>,
        book_title: Option<&str>,
        detail: Option<&str>,
    ) -> AppResult<()>;

    /// Escape hatch: a handle to the shared store itself.
    fn store(&self) -> Arc<Store>;
}

/// The production capability set, backed by the shared [`Store`].
#[derive(Debug, Clone)]
pub struct StoreCapabilities {
    store: Arc<Store>,
}

impl StoreCapabilities {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

impl HostCapabilities for StoreCapabilities {
    fn query(&self, sql: &str, params: &[Value]) -> AppResult<Vec<Row>> {
        self.store.query(sql, params)
    }

    fn run(&self, sql: &str, params: &[Value]) -> AppResult<i64> {
        self.store.run(sql, params)
    }

    fn persist(&self) -> AppResult<()> {
        self.store.persist()
    }

    fn log_activity(
        &self,
        event_type: &str,
        reader_name: Option<&str>,
        book_id: Option<i64>,
        book_title: Option<&str>,
        detail: Option<&str>,
    ) -> AppResult<()> {
        self.store
            .log_activity(event_type, reader_name, book_id, book_title, detail)
    }

    fn store(&self) -> Arc<Store> {
        Arc::clone(&self.store)
    }
}
