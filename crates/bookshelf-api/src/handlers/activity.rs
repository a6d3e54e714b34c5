use axum::Json;
use axum::extract::{Query, State};
use bookshelf_core::AppError;
use bookshelf_store::models::ActivityEvent;

use crate::dto::ActivityParams;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

/// GET /api/activity?limit=
pub async fn recent_activity(
    State(state): State<AppState>,
    Query(params): Query<ActivityParams>,
) -> Result<Json<Vec<ActivityEvent>>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    Ok(Json(state.activity.recent(limit)?))
}
