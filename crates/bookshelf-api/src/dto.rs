//! Small request and response shapes shared across handlers.

use serde::{Deserialize, Serialize};

/// Acknowledgement body for writes that return no entity.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// GET /api/filters
#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    pub genres: Vec<String>,
    pub triggers: Vec<String>,
}

/// GET /api/health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub plugins: usize,
}

/// POST /api/books/{id}/ratings
#[derive(Debug, Deserialize)]
pub struct CreateRatingRequest {
    pub reader_name: String,
    pub stars: i64,
    pub blurb: Option<String>,
}

/// GET /api/lookup?title=...&author=...
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub title: Option<String>,
    #[serde(default)]
    pub author: String,
}

/// GET /api/activity?limit=...
#[derive(Debug, Deserialize)]
pub struct ActivityParams {
    pub limit: Option<i64>,
}

/// A composed HTML fragment for one UI slot.
#[derive(Debug, Serialize)]
pub struct FragmentResponse {
    pub html: String,
}

/// GET /api/ui/nav-tabs/{plugin}
#[derive(Debug, Serialize)]
pub struct NavTabPageResponse {
    pub plugin: String,
    pub label: String,
    pub html: String,
}
