//! Server-side composition of plugin UI fragments.
//!
//! The frontend asks these endpoints for slot content instead of
//! talking to individual plugins. A slot nobody fills composes to an
//! empty fragment; a hook that fails is omitted rather than failing
//! the page.

use axum::Json;
use axum::extract::{Path, State};
use bookshelf_core::AppError;
use bookshelf_plugin::ui::{DetailPanel, NavTabEntry};

use crate::dto::{FragmentResponse, NavTabPageResponse};
use crate::state::AppState;

/// GET /api/ui/book-card/{id}
pub async fn book_card(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FragmentResponse>, AppError> {
    let book = state
        .books
        .get(id)?
        .ok_or_else(|| AppError::not_found("Book not found"))?;
    let book = serde_json::to_value(&book)?;
    Ok(Json(FragmentResponse {
        html: state.ui_hooks.render_book_cards(&book),
    }))
}

/// GET /api/ui/book-detail/{id}
pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<DetailPanel>>, AppError> {
    let book = state
        .books
        .get_with_ratings(id)?
        .ok_or_else(|| AppError::not_found("Book not found"))?;
    let book = serde_json::to_value(&book)?;
    Ok(Json(state.ui_hooks.render_book_details(&book).await))
}

/// GET /api/ui/nav-tabs
pub async fn nav_tabs(State(state): State<AppState>) -> Json<Vec<NavTabEntry>> {
    Json(state.ui_hooks.nav_tabs())
}

/// GET /api/ui/nav-tabs/{plugin}
pub async fn nav_tab_page(
    State(state): State<AppState>,
    Path(plugin): Path<String>,
) -> Result<Json<NavTabPageResponse>, AppError> {
    let html = state
        .ui_hooks
        .render_nav_tab(&plugin)
        .await?
        .ok_or_else(|| AppError::not_found("No such tab"))?;
    let label = state
        .ui_hooks
        .nav_tabs()
        .into_iter()
        .find(|tab| tab.plugin == plugin)
        .map(|tab| tab.label)
        .unwrap_or_default();
    Ok(Json(NavTabPageResponse {
        plugin,
        label,
        html,
    }))
}

/// GET /api/ui/stats-widgets
pub async fn stats_widgets(State(state): State<AppState>) -> Json<FragmentResponse> {
    Json(FragmentResponse {
        html: state.ui_hooks.render_stats_widgets().await,
    })
}
