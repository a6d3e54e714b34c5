//! Route definitions for the Family Bookshelf HTTP API.
//!
//! Host routes are organized by domain and mounted under `/api`. Plugin
//! routers arrive pre-built from the loader: APIs under
//! `/api/plugins/{id}`, static assets under `/plugins/{id}`.

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// The complete service: the router behind trailing-slash trimming, so
/// `/api/plugins/{id}` and `/api/plugins/{id}/` hit the same handler.
/// The layer has to wrap the router from outside — applied via
/// `Router::layer` it would run after route matching.
pub type AppService = NormalizePath<Router>;

/// Builds the complete service: host API, plugin APIs, plugin assets.
pub fn build_router(
    state: AppState,
    plugin_api: Option<Router>,
    plugin_assets: Option<Router>,
) -> AppService {
    let api_routes = Router::new()
        .merge(book_routes())
        .merge(rating_routes())
        .merge(activity_routes())
        .merge(settings_routes())
        .merge(lookup_routes())
        .merge(plugin_routes())
        .merge(ui_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    let mut router = Router::new().nest("/api", api_routes.with_state(state));
    if let Some(plugin_api) = plugin_api {
        router = router.nest("/api/plugins", plugin_api);
    }
    if let Some(plugin_assets) = plugin_assets {
        router = router.nest("/plugins", plugin_assets);
    }

    let router = router.layer(TraceLayer::new_for_http()).layer(cors);
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Catalog CRUD plus the filter taxonomy.
fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(handlers::books::list_books))
        .route("/books", post(handlers::books::create_book))
        .route("/books/{id}", get(handlers::books::get_book))
        .route("/books/{id}", patch(handlers::books::update_book))
        .route("/books/{id}", delete(handlers::books::delete_book))
        .route("/filters", get(handlers::books::list_filters))
}

/// Star ratings: one per (book, reader), upserted.
fn rating_routes() -> Router<AppState> {
    Router::new()
        .route("/books/{id}/ratings", post(handlers::ratings::rate_book))
        .route("/ratings/{id}", delete(handlers::ratings::delete_rating))
}

fn activity_routes() -> Router<AppState> {
    Router::new().route("/activity", get(handlers::activity::recent_activity))
}

fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(handlers::settings::get_settings))
        .route("/settings", put(handlers::settings::update_settings))
}

fn lookup_routes() -> Router<AppState> {
    Router::new().route("/lookup", get(handlers::lookup::lookup_book))
}

fn plugin_routes() -> Router<AppState> {
    Router::new().route("/plugins", get(handlers::plugins::list_plugins))
}

/// Server-side composition of plugin UI fragments.
fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/ui/book-card/{id}", get(handlers::ui::book_card))
        .route("/ui/book-detail/{id}", get(handlers::ui::book_detail))
        .route("/ui/nav-tabs", get(handlers::ui::nav_tabs))
        .route("/ui/nav-tabs/{plugin}", get(handlers::ui::nav_tab_page))
        .route("/ui/stats-widgets", get(handlers::ui::stats_widgets))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

fn build_cors_layer(state: &AppState) -> CorsLayer {
    use tower_http::cors::Any;

    let allowed = &state.config.server.cors.allowed_origins;
    if allowed.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<http::HeaderValue> =
            allowed.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    }
}
