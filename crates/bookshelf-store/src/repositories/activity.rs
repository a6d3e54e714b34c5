//! Activity feed repository implementation.

use std::sync::Arc;

use serde_json::{Value, json};

use bookshelf_core::result::AppResult;

use crate::models::ActivityEvent;
use crate::store::Store;

/// Repository over the host-owned activity feed. Appends go through
/// [`Store::log_activity`] so host and plugin writers share one path.
#[derive(Debug, Clone)]
pub struct ActivityRepository {
    store: Arc<Store>,
}

impl ActivityRepository {
    /// Create a new activity repository.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Most recent feed entries, newest first.
    pub fn recent(&self, limit: i64) -> AppResult<Vec<ActivityEvent>> {
        let rows = self.store.query(
            "SELECT * FROM activity ORDER BY created_at DESC, id DESC LIMIT ?1",
            &[json!(limit)],
        )?;
        rows.into_iter()
            .map(|r| serde_json::from_value(Value::Object(r)).map_err(Into::into))
            .collect()
    }
}
