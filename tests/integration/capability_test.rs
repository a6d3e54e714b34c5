//! Integration tests for the capability surface plugins run on.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn plugin_writes_survive_via_persist() {
    let app = TestApp::new().await;
    let book_id = app.seed_book("Fourth Wing", "Rebecca Yarros").await;

    let response = app
        .request(
            "POST",
            &format!("/api/plugins/dnf-tracker/book/{book_id}"),
            Some(json!({"reader_name": "Ada", "reason": "Too slow"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The plugin table went through query/run/persist on the shared
    // store; read it back through the plugin's own API.
    let response = app
        .request(
            "GET",
            &format!("/api/plugins/dnf-tracker/book/{book_id}"),
            None,
        )
        .await;
    let entries = response.body.as_array().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["reader_name"], json!("Ada"));
}

#[tokio::test]
async fn log_activity_appends_exactly_one_feed_row() {
    let app = TestApp::new().await;
    let book_id = app.seed_book("Dune", "Frank Herbert").await;

    app.request(
        "POST",
        &format!("/api/plugins/dnf-tracker/book/{book_id}"),
        Some(json!({"reader_name": "Ada", "reason": "Too slow"})),
    )
    .await;

    let response = app.request("GET", "/api/activity", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let events = response.body.as_array().expect("activity feed");

    let dnf_events: Vec<_> = events
        .iter()
        .filter(|e| e["type"] == json!("dnf_added"))
        .collect();
    assert_eq!(dnf_events.len(), 1);
    assert_eq!(dnf_events[0]["reader_name"], json!("Ada"));
    assert_eq!(dnf_events[0]["book_title"], json!("Dune"));
    assert_eq!(dnf_events[0]["detail"], json!("Too slow"));
}

#[tokio::test]
async fn plugin_schema_setup_is_idempotent() {
    // Two apps, two loader runs; CREATE TABLE IF NOT EXISTS both times.
    let first = TestApp::new().await;
    let book_id = first.seed_book("Dune", "Frank Herbert").await;
    first
        .request(
            "POST",
            &format!("/api/plugins/spice-o-meter/book/{book_id}"),
            Some(json!({"reader_name": "Ada", "chillies": 4})),
        )
        .await;

    let second = TestApp::new().await;
    let response = second
        .request("GET", "/api/plugins/spice-o-meter/books", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn host_and_plugin_share_one_database() {
    let app = TestApp::new().await;
    let book_id = app.seed_book("Dune", "Frank Herbert").await;

    // Deleting the book through the host API leaves the DNF row
    // orphan-free from the plugin's point of view: its join returns
    // nothing.
    app.request(
        "POST",
        &format!("/api/plugins/dnf-tracker/book/{book_id}"),
        Some(json!({"reader_name": "Ada"})),
    )
    .await;
    app.request("DELETE", &format!("/api/books/{book_id}"), None)
        .await;

    let response = app.request("GET", "/api/plugins/dnf-tracker/", None).await;
    assert_eq!(response.body, json!([]));
}
