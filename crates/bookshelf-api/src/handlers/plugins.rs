use axum::Json;
use axum::extract::State;
use bookshelf_plugin::LoadedPlugin;

use crate::state::AppState;

/// GET /api/plugins
///
/// The plugins that survived startup loading, in load order.
pub async fn list_plugins(State(state): State<AppState>) -> Json<Vec<LoadedPlugin>> {
    Json(state.plugins.list().to_vec())
}
