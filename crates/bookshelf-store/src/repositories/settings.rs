//! Settings repository implementation.
//!
//! Key-value settings with defaults layered under whatever the
//! household has stored.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::json;

use bookshelf_core::result::AppResult;

use crate::store::Store;

/// Default settings returned when no stored value exists.
pub const DEFAULTS: &[(&str, &str)] = &[
    ("site_name", "The Family Shelf"),
    ("site_subtitle", "Our shared library & reading log"),
    ("accent_color", "#c0392b"),
    ("gold_color", "#c9a84c"),
    ("dark_romance_mode", "true"),
    ("readers", "[]"),
];

/// Repository for key-value settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    store: Arc<Store>,
}

impl SettingsRepository {
    /// Create a new settings repository.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// All settings: defaults overlaid with stored values.
    pub fn get_all(&self) -> AppResult<BTreeMap<String, String>> {
        let mut result: BTreeMap<String, String> = DEFAULTS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let rows = self.store.query("SELECT key, value FROM settings", &[])?;
        for row in rows {
            if let (Some(key), Some(value)) = (row["key"].as_str(), row["value"].as_str()) {
                result.insert(key.to_string(), value.to_string());
            }
        }
        Ok(result)
    }

    /// One setting, stored value or default.
    pub fn get(&self, key: &str) -> AppResult<Option<String>> {
        let rows = self.store.query(
            "SELECT value FROM settings WHERE key = ?1",
            &[json!(key)],
        )?;
        if let Some(value) = rows.first().and_then(|r| r["value"].as_str()) {
            return Ok(Some(value.to_string()));
        }
        Ok(DEFAULTS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string()))
    }

    /// Upsert several settings and persist once.
    pub fn set_many(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        for (key, value) in entries {
            self.store.run(
                "INSERT INTO settings (key, value) VALUES (?1, ?2) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                &[json!(key), json!(value)],
            )?;
        }
        self.store.persist()
    }
}
