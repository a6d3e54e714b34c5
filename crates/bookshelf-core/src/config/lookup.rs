//! Catalog lookup configuration.

use serde::{Deserialize, Serialize};

/// Open Library lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Base URL of the Open Library API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Base URL for cover images.
    #[serde(default = "default_covers_endpoint")]
    pub covers_endpoint: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            covers_endpoint: default_covers_endpoint(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "https://openlibrary.org".to_string()
}

fn default_covers_endpoint() -> String {
    "https://covers.openlibrary.org".to_string()
}

fn default_timeout() -> u64 {
    8
}
