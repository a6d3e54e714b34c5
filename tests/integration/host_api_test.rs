//! Integration tests for the host catalog API.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn create_and_fetch_a_book() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/books",
            Some(json!({
                "title": "Fourth Wing",
                "author": "Rebecca Yarros",
                "genres": ["Fantasy", "Romance"],
                "trigger_warnings": ["Violence"],
                "published_year": 2023,
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["id"].as_i64().expect("book id");
    assert_eq!(response.body["genres"], json!(["Fantasy", "Romance"]));
    assert_eq!(response.body["status"], json!("finished"));

    let response = app.request("GET", &format!("/api/books/{id}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["title"], json!("Fourth Wing"));
    assert_eq!(response.body["ratings"], json!([]));
}

#[tokio::test]
async fn create_requires_a_title() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/books", Some(json!({"title": "  "})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_title_and_author_conflict() {
    let app = TestApp::new().await;
    app.seed_book("Dune", "Frank Herbert").await;

    let response = app
        .request(
            "POST",
            "/api/books",
            Some(json!({"title": "DUNE", "author": "frank herbert"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn list_filters_by_genre_search_and_sort() {
    let app = TestApp::new().await;

    app.request(
        "POST",
        "/api/books",
        Some(json!({"title": "Alpha", "author": "A", "genres": ["Fantasy"]})),
    )
    .await;
    app.request(
        "POST",
        "/api/books",
        Some(json!({"title": "Beta", "author": "B", "genres": ["Romance"]})),
    )
    .await;

    let response = app.request("GET", "/api/books?genre=fantasy", None).await;
    let books = response.body.as_array().expect("books");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], json!("Alpha"));

    let response = app.request("GET", "/api/books?search=bet", None).await;
    let books = response.body.as_array().expect("books");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], json!("Beta"));

    let response = app.request("GET", "/api/books?sort=title", None).await;
    let books = response.body.as_array().expect("books");
    let titles: Vec<&str> = books.iter().filter_map(|b| b["title"].as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Beta"]);
}

#[tokio::test]
async fn patch_updates_only_the_given_fields() {
    let app = TestApp::new().await;
    let id = app.seed_book("Dune", "Frank Herbert").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/books/{id}"),
            Some(json!({"genres": ["Sci-Fi"], "synopsis": "Sand."})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["genres"], json!(["Sci-Fi"]));
    assert_eq!(response.body["synopsis"], json!("Sand."));
    assert_eq!(response.body["author"], json!("Frank Herbert"));

    let response = app
        .request("PATCH", "/api/books/99999", Some(json!({"synopsis": "x"})))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_book_and_its_ratings() {
    let app = TestApp::new().await;
    let id = app.seed_book("Dune", "Frank Herbert").await;
    app.request(
        "POST",
        &format!("/api/books/{id}/ratings"),
        Some(json!({"reader_name": "Ada", "stars": 5})),
    )
    .await;

    let response = app
        .request("DELETE", &format!("/api/books/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["ok"], json!(true));

    let response = app.request("GET", &format!("/api/books/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rating_upserts_per_reader() {
    let app = TestApp::new().await;
    let id = app.seed_book("Dune", "Frank Herbert").await;

    app.request(
        "POST",
        &format!("/api/books/{id}/ratings"),
        Some(json!({"reader_name": "Ada", "stars": 3, "blurb": "fine"})),
    )
    .await;
    app.request(
        "POST",
        &format!("/api/books/{id}/ratings"),
        Some(json!({"reader_name": "Ada", "stars": 5, "blurb": "grew on me"})),
    )
    .await;

    let response = app.request("GET", &format!("/api/books/{id}"), None).await;
    let ratings = response.body["ratings"].as_array().expect("ratings");
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0]["stars"], json!(5));
    assert_eq!(ratings[0]["blurb"], json!("grew on me"));
}

#[tokio::test]
async fn rating_validation_and_missing_book() {
    let app = TestApp::new().await;
    let id = app.seed_book("Dune", "Frank Herbert").await;

    let response = app
        .request(
            "POST",
            &format!("/api/books/{id}/ratings"),
            Some(json!({"reader_name": "", "stars": 4})),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/books/99999/ratings",
            Some(json!({"reader_name": "Ada", "stars": 4})),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn filters_collect_distinct_tags() {
    let app = TestApp::new().await;
    app.request(
        "POST",
        "/api/books",
        Some(json!({
            "title": "Alpha", "author": "A",
            "genres": ["Fantasy", "Romance"],
            "trigger_warnings": ["Violence"],
        })),
    )
    .await;
    app.request(
        "POST",
        "/api/books",
        Some(json!({"title": "Beta", "author": "B", "genres": ["Fantasy"]})),
    )
    .await;

    let response = app.request("GET", "/api/filters", None).await;
    assert_eq!(response.body["genres"], json!(["Fantasy", "Romance"]));
    assert_eq!(response.body["triggers"], json!(["Violence"]));
}

#[tokio::test]
async fn settings_round_trip_with_defaults() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/settings", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["site_name"], json!("The Family Shelf"));

    let response = app
        .request(
            "PUT",
            "/api/settings",
            Some(json!({"site_name": "Casa de Libros", "accent_color": "#123456"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["site_name"], json!("Casa de Libros"));
    assert_eq!(response.body["accent_color"], json!("#123456"));
    // Untouched defaults remain.
    assert_eq!(response.body["dark_romance_mode"], json!("true"));
}

#[tokio::test]
async fn activity_records_book_and_rating_events() {
    let app = TestApp::new().await;
    let id = app.seed_book("Dune", "Frank Herbert").await;
    app.request(
        "POST",
        &format!("/api/books/{id}/ratings"),
        Some(json!({"reader_name": "Ada", "stars": 4})),
    )
    .await;

    let response = app.request("GET", "/api/activity?limit=10", None).await;
    let events = response.body.as_array().expect("activity");
    let types: Vec<&str> = events.iter().filter_map(|e| e["type"].as_str()).collect();
    assert!(types.contains(&"book_added"));
    assert!(types.contains(&"rating_added"));
}

#[tokio::test]
async fn lookup_requires_a_title() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/lookup", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.request("GET", "/api/lookup?title=", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_version_and_plugin_count() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], json!("ok"));
    assert_eq!(response.body["plugins"], json!(2));
}
