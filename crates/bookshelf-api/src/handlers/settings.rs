use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use bookshelf_core::AppError;

use crate::state::AppState;

/// GET /api/settings
///
/// Defaults overlaid with whatever the household has customized.
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, String>>, AppError> {
    Ok(Json(state.settings.get_all()?))
}

/// PUT /api/settings
///
/// Upserts the given keys and answers with the full merged settings.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(entries): Json<BTreeMap<String, String>>,
) -> Result<Json<BTreeMap<String, String>>, AppError> {
    state.settings.set_many(&entries)?;
    Ok(Json(state.settings.get_all()?))
}
