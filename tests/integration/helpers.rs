//! Shared test helpers for integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use bookshelf_api::{build_router, AppService, AppState};
use bookshelf_core::config::AppConfig;
use bookshelf_lookup::LookupClient;
use bookshelf_plugin::{BookshelfPlugin, PluginLoader, StoreCapabilities};
use bookshelf_store::repositories::{
    ActivityRepository, BookRepository, RatingRepository, SettingsRepository,
};
use bookshelf_store::{schema, Store};
use plugin_dnf_tracker::DnfTrackerPlugin;
use plugin_spice_o_meter::SpiceOMeterPlugin;

/// Test application context.
pub struct TestApp {
    pub router: AppService,
    pub store: Arc<Store>,
    tmp: TempDir,
}

/// Response captured from a test request.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// App with both bundled plugins installed on disk.
    pub async fn new() -> Self {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        write_manifest(
            &tmp.path().join("plugins/dnf-tracker"),
            json!({
                "id": "dnf-tracker",
                "name": "DNF Tracker",
                "version": "1.0.0",
                "hooks": ["bookCard", "bookDetail", "navTab"],
            }),
        );
        write_manifest(
            &tmp.path().join("plugins/spice-o-meter"),
            json!({
                "id": "spice-o-meter",
                "name": "Spice-o-Meter",
                "version": "1.0.0",
                "hooks": ["bookCard", "bookDetail", "statsWidget"],
            }),
        );
        Self::build(tmp, default_builtins())
    }

    /// App with no plugin directories at all.
    pub async fn without_plugins() -> Self {
        Self::build(TempDir::new().expect("Failed to create temp dir"), vec![])
    }

    /// App over a caller-prepared temp dir (write plugin directories
    /// under `<tmp>/plugins` first).
    pub fn with_plugin_dirs(tmp: TempDir, builtins: Vec<Arc<dyn BookshelfPlugin>>) -> Self {
        Self::build(tmp, builtins)
    }

    fn build(tmp: TempDir, builtins: Vec<Arc<dyn BookshelfPlugin>>) -> Self {
        let store = Arc::new(
            Store::open(tmp.path().join("bookshelf.db")).expect("Failed to open store"),
        );
        schema::initialize(&store).expect("Failed to initialize schema");

        let capabilities = Arc::new(StoreCapabilities::new(Arc::clone(&store)));
        let loader = builtins
            .into_iter()
            .fold(PluginLoader::new(), |loader, plugin| loader.register(plugin));
        let mut outcome = loader.load_all(&tmp.path().join("plugins"), capabilities.clone());
        let plugin_api = outcome.take_api_router();
        let plugin_assets = outcome.take_asset_router();

        let config = AppConfig::default();
        let lookup = Arc::new(LookupClient::new(&config.lookup).expect("Failed to build lookup"));
        let state = AppState {
            config: Arc::new(config),
            store: Arc::clone(&store),
            capabilities,
            books: BookRepository::new(Arc::clone(&store)),
            ratings: RatingRepository::new(Arc::clone(&store)),
            settings: SettingsRepository::new(Arc::clone(&store)),
            activity: ActivityRepository::new(Arc::clone(&store)),
            lookup,
            plugins: Arc::new(outcome.registry),
            ui_hooks: Arc::new(outcome.ui_hooks),
        };

        Self {
            router: build_router(state, plugin_api, plugin_assets),
            store,
            tmp,
        }
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.tmp.path().join("plugins")
    }

    /// Adds a book directly and returns its id.
    pub async fn seed_book(&self, title: &str, author: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/books",
                Some(json!({"title": title, "author": author})),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "seed_book failed");
        response.body["id"].as_i64().expect("book id")
    }

    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if body.is_some() {
            req = req.header("Content-Type", "application/json");
        }
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Raw GET that keeps the body as text (for static assets).
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        (status, String::from_utf8_lossy(&body_bytes).into_owned())
    }
}

/// Both bundled plugins.
pub fn default_builtins() -> Vec<Arc<dyn BookshelfPlugin>> {
    vec![
        Arc::new(DnfTrackerPlugin::new()) as Arc<dyn BookshelfPlugin>,
        Arc::new(SpiceOMeterPlugin::new()) as Arc<dyn BookshelfPlugin>,
    ]
}

/// Writes `manifest.json` into a plugin directory, creating it.
pub fn write_manifest(dir: &Path, manifest: Value) {
    fs::create_dir_all(dir).expect("Failed to create plugin dir");
    fs::write(dir.join("manifest.json"), manifest.to_string())
        .expect("Failed to write manifest");
}
