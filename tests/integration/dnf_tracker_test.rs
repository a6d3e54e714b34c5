//! Integration tests for the DNF tracker plugin.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn logging_a_dnf_upserts_per_reader() {
    let app = TestApp::new().await;
    let book_id = app.seed_book("Fourth Wing", "Rebecca Yarros").await;
    let path = format!("/api/plugins/dnf-tracker/book/{book_id}");

    let response = app
        .request(
            "POST",
            &path,
            Some(json!({"reader_name": "Ada", "reason": "Too slow", "stopped_at": "Chapter 5"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["ok"], json!(true));

    // Same reader again: entry is replaced, not duplicated.
    let response = app
        .request(
            "POST",
            &path,
            Some(json!({"reader_name": "Ada", "reason": "Not my vibe"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", &path, None).await;
    let entries = response.body.as_array().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["reason"], json!("Not my vibe"));
    // The replacement cleared the previous stopped_at.
    assert_eq!(entries[0]["stopped_at"], json!(null));
}

#[tokio::test]
async fn dnf_requires_a_reader_and_an_existing_book() {
    let app = TestApp::new().await;
    let book_id = app.seed_book("Dune", "Frank Herbert").await;

    let response = app
        .request(
            "POST",
            &format!("/api/plugins/dnf-tracker/book/{book_id}"),
            Some(json!({"reader_name": "  "})),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/plugins/dnf-tracker/book/99999",
            Some(json!({"reader_name": "Ada"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn counts_group_by_book() {
    let app = TestApp::new().await;
    let first = app.seed_book("Alpha", "A").await;
    let second = app.seed_book("Beta", "B").await;

    for reader in ["Ada", "Bea"] {
        app.request(
            "POST",
            &format!("/api/plugins/dnf-tracker/book/{first}"),
            Some(json!({"reader_name": reader})),
        )
        .await;
    }
    app.request(
        "POST",
        &format!("/api/plugins/dnf-tracker/book/{second}"),
        Some(json!({"reader_name": "Ada"})),
    )
    .await;

    let response = app
        .request("GET", "/api/plugins/dnf-tracker/counts", None)
        .await;
    assert_eq!(response.body[first.to_string()], json!(2));
    assert_eq!(response.body[second.to_string()], json!(1));
}

#[tokio::test]
async fn list_joins_book_info_and_parses_genres() {
    let app = TestApp::new().await;
    app.request(
        "POST",
        "/api/books",
        Some(json!({"title": "Alpha", "author": "A", "genres": ["Fantasy"]})),
    )
    .await;

    let response = app.request("GET", "/api/books?search=alpha", None).await;
    let book_id = response.body[0]["id"].as_i64().expect("book id");
    app.request(
        "POST",
        &format!("/api/plugins/dnf-tracker/book/{book_id}"),
        Some(json!({"reader_name": "Ada", "notes": "couldn't."})),
    )
    .await;

    let response = app.request("GET", "/api/plugins/dnf-tracker/", None).await;
    let entries = response.body.as_array().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["title"], json!("Alpha"));
    assert_eq!(entries[0]["genres"], json!(["Fantasy"]));
    assert_eq!(entries[0]["notes"], json!("couldn't."));
}

#[tokio::test]
async fn deleting_an_entry_removes_it() {
    let app = TestApp::new().await;
    let book_id = app.seed_book("Dune", "Frank Herbert").await;
    let path = format!("/api/plugins/dnf-tracker/book/{book_id}");

    app.request("POST", &path, Some(json!({"reader_name": "Ada"})))
        .await;
    let response = app.request("GET", &path, None).await;
    let entry_id = response.body[0]["id"].as_i64().expect("entry id");

    let response = app
        .request(
            "DELETE",
            &format!("/api/plugins/dnf-tracker/{entry_id}"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", &path, None).await;
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn reasons_offers_the_canned_list() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/plugins/dnf-tracker/reasons", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let reasons = response.body.as_array().expect("reasons");
    assert!(reasons.contains(&json!("Too slow")));
    assert!(reasons.contains(&json!("Just not feeling it")));
}
