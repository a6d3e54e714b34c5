//! Storage engine configuration.

use serde::{Deserialize, Serialize};

/// Storage engine configuration.
///
/// The database lives in memory and is serialized to `path` on every
/// explicit persist. The parent directory is created at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the database file.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> String {
    "data/bookshelf.db".to_string()
}
