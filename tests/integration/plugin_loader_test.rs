//! Integration tests for plugin discovery and mounting.

mod helpers;

use std::fs;
use std::sync::Arc;

use axum::Router;
use bookshelf_core::{AppError, AppResult};
use bookshelf_plugin::{BookshelfPlugin, HostCapabilities, PluginManifest};
use http::StatusCode;
use serde_json::json;
use tempfile::TempDir;

use helpers::{default_builtins, write_manifest, TestApp};

#[tokio::test]
async fn both_bundled_plugins_load_and_are_listed() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/plugins", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let plugins = response.body.as_array().expect("plugin list");
    assert_eq!(plugins.len(), 2);
    let ids: Vec<&str> = plugins
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect();
    assert!(ids.contains(&"dnf-tracker"));
    assert!(ids.contains(&"spice-o-meter"));
    assert!(plugins.iter().all(|p| p["enabled"] == json!(true)));
}

#[tokio::test]
async fn plugin_routes_are_mounted_under_their_namespace() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/plugins/dnf-tracker/reasons", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.as_array().expect("reasons").is_empty());

    let response = app
        .request("GET", "/api/plugins/spice-o-meter/books", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn plugin_root_resolves_with_and_without_trailing_slash() {
    let app = TestApp::new().await;

    let bare = app.request("GET", "/api/plugins/dnf-tracker", None).await;
    assert_eq!(bare.status, StatusCode::OK);
    assert_eq!(bare.body, serde_json::json!([]));

    let slashed = app.request("GET", "/api/plugins/dnf-tracker/", None).await;
    assert_eq!(slashed.status, StatusCode::OK);
    assert_eq!(slashed.body, bare.body);
}

#[tokio::test]
async fn missing_plugins_directory_still_serves_the_host() {
    let app = TestApp::without_plugins().await;

    let response = app.request("GET", "/api/plugins", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));

    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["plugins"], json!(0));
}

#[tokio::test]
async fn invalid_plugin_directories_are_skipped() {
    let tmp = TempDir::new().unwrap();
    let plugins = tmp.path().join("plugins");

    // No manifest at all.
    fs::create_dir_all(plugins.join("empty")).unwrap();
    // Unparseable manifest.
    fs::create_dir_all(plugins.join("garbled")).unwrap();
    fs::write(plugins.join("garbled/manifest.json"), "{ nope").unwrap();
    // Manifest without a registered implementation.
    write_manifest(
        &plugins.join("ghost"),
        json!({"id": "ghost", "name": "Ghost"}),
    );
    // A valid one to prove the scan kept going.
    write_manifest(
        &plugins.join("dnf-tracker"),
        json!({"id": "dnf-tracker", "name": "DNF Tracker"}),
    );

    let app = TestApp::with_plugin_dirs(tmp, default_builtins());

    let response = app.request("GET", "/api/plugins", None).await;
    let listed = response.body.as_array().expect("plugin list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], json!("dnf-tracker"));
}

#[tokio::test]
async fn duplicate_plugin_ids_keep_the_first_directory() {
    let tmp = TempDir::new().unwrap();
    let plugins = tmp.path().join("plugins");
    write_manifest(
        &plugins.join("a-dnf"),
        json!({"id": "dnf-tracker", "name": "First"}),
    );
    write_manifest(
        &plugins.join("b-dnf"),
        json!({"id": "dnf-tracker", "name": "Second"}),
    );

    let app = TestApp::with_plugin_dirs(tmp, default_builtins());

    let response = app.request("GET", "/api/plugins", None).await;
    let listed = response.body.as_array().expect("plugin list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], json!("First"));
}

struct ExplodingPlugin;

impl BookshelfPlugin for ExplodingPlugin {
    fn id(&self) -> &'static str {
        "exploding"
    }

    fn init(
        &self,
        _host: Arc<dyn HostCapabilities>,
        _manifest: &PluginManifest,
    ) -> AppResult<Router> {
        Err(AppError::plugin("refused to start"))
    }
}

#[tokio::test]
async fn failed_initializer_does_not_block_later_plugins() {
    let tmp = TempDir::new().unwrap();
    let plugins = tmp.path().join("plugins");
    write_manifest(
        &plugins.join("a-exploding"),
        json!({"id": "exploding", "name": "Exploding"}),
    );
    write_manifest(
        &plugins.join("b-spice"),
        json!({"id": "spice-o-meter", "name": "Spice-o-Meter"}),
    );

    let mut builtins = default_builtins();
    builtins.push(Arc::new(ExplodingPlugin));
    let app = TestApp::with_plugin_dirs(tmp, builtins);

    let response = app.request("GET", "/api/plugins", None).await;
    let listed = response.body.as_array().expect("plugin list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], json!("spice-o-meter"));

    let response = app
        .request("GET", "/api/plugins/spice-o-meter/stats", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn public_assets_are_served_under_the_plugin_namespace() {
    let tmp = TempDir::new().unwrap();
    let plugins = tmp.path().join("plugins");
    write_manifest(
        &plugins.join("dnf-tracker"),
        json!({"id": "dnf-tracker", "name": "DNF Tracker"}),
    );
    fs::create_dir_all(plugins.join("dnf-tracker/public")).unwrap();
    fs::write(
        plugins.join("dnf-tracker/public/dnf.css"),
        ".dnf-badge { color: #888; }",
    )
    .unwrap();

    let app = TestApp::with_plugin_dirs(tmp, default_builtins());

    let (status, body) = app.get_text("/plugins/dnf-tracker/dnf.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(".dnf-badge"));

    // No public dir was created for an unloaded plugin.
    let (status, _) = app.get_text("/plugins/ghost/style.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn declared_hooks_reflect_what_the_plugin_registers() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/plugins", None).await;
    let plugins = response.body.as_array().expect("plugin list");
    let dnf = plugins
        .iter()
        .find(|p| p["id"] == json!("dnf-tracker"))
        .expect("dnf-tracker listed");
    assert_eq!(dnf["hooks"], json!(["bookCard", "bookDetail", "navTab"]));

    let spice = plugins
        .iter()
        .find(|p| p["id"] == json!("spice-o-meter"))
        .expect("spice-o-meter listed");
    assert_eq!(
        spice["hooks"],
        json!(["bookCard", "bookDetail", "statsWidget"])
    );
}
