//! Songs API Tests
//!
//! Drives the full router (validation, service, SQLite, error envelopes)
//! through in-process requests:
//! - create/get round trip and id shape
//! - case-insensitive title/performer filtering
//! - full replacement on update
//! - not-found and validation failures leave the table untouched

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use openmusic::db::Database;
use openmusic::config::HttpServerConfig;
use openmusic::http_server::HttpServer;
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

async fn setup() -> (Database, Router) {
    let db = Database::in_memory().await.unwrap();
    db.ensure_schema().await.unwrap();
    let router = HttpServer::with_config(HttpServerConfig::default(), db.clone()).router();
    (db, router)
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(router: &Router, body: Value) -> String {
    let (status, response) = send(router, Method::POST, "/songs", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", response);
    response["data"]["songId"].as_str().unwrap().to_string()
}

async fn row_count(db: &Database) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM songs")
        .fetch_one(db.pool())
        .await
        .unwrap()
}

fn song(title: &str, performer: &str) -> Value {
    json!({
        "title": title,
        "year": 1975,
        "genre": "Rock",
        "performer": performer,
        "duration": 354,
        "albumId": "album-night-at-the-opera"
    })
}

fn ids(response: &Value) -> Vec<String> {
    let mut ids: Vec<String> = response["data"]["songs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    ids
}

// =============================================================================
// Create / Get
// =============================================================================

#[tokio::test]
async fn test_create_then_get_returns_payload_plus_id() {
    let (_db, router) = setup().await;
    let payload = song("Bohemian Rhapsody", "Queen");

    let (status, response) = send(&router, Method::POST, "/songs", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["status"], "success");

    let id = response["data"]["songId"].as_str().unwrap();
    let suffix = id.strip_prefix("song-").unwrap();
    assert_eq!(suffix.len(), 16);
    assert!(suffix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));

    let (status, response) = send(&router, Method::GET, &format!("/songs/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "success");

    let mut expected = payload;
    expected["id"] = json!(id);
    assert_eq!(response["data"]["song"], expected);
}

#[tokio::test]
async fn test_optional_fields_are_returned_as_null() {
    let (_db, router) = setup().await;
    let id = create(
        &router,
        json!({"title": "Imagine", "year": 1971, "genre": "Pop", "performer": "John Lennon"}),
    )
    .await;

    let (_, response) = send(&router, Method::GET, &format!("/songs/{}", id), None).await;
    let song = &response["data"]["song"];
    assert_eq!(song["duration"], Value::Null);
    assert_eq!(song["albumId"], Value::Null);
}

#[tokio::test]
async fn test_get_unknown_id_is_404() {
    let (_db, router) = setup().await;

    let (status, response) = send(&router, Method::GET, "/songs/song-doesnotexist00", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["status"], "fail");
    assert_eq!(response["message"], "Song not found");
}

// =============================================================================
// List / Filter
// =============================================================================

#[tokio::test]
async fn test_list_without_filters_returns_summaries() {
    let (_db, router) = setup().await;
    let mut expected = vec![
        create(&router, song("Bohemian Rhapsody", "Queen")).await,
        create(&router, song("Imagine", "John Lennon")).await,
    ];
    expected.sort();

    let (status, response) = send(&router, Method::GET, "/songs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&response), expected);

    for song in response["data"]["songs"].as_array().unwrap() {
        let fields = song.as_object().unwrap();
        assert_eq!(fields.len(), 3);
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("performer"));
    }
}

#[tokio::test]
async fn test_list_empty_table() {
    let (_db, router) = setup().await;

    let (status, response) = send(&router, Method::GET, "/songs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["data"]["songs"], json!([]));
}

#[tokio::test]
async fn test_title_filter_is_case_insensitive_substring() {
    let (_db, router) = setup().await;
    let rhapsody = create(&router, song("Bohemian Rhapsody", "Queen")).await;
    create(&router, song("Imagine", "John Lennon")).await;

    for uri in ["/songs?title=rhap", "/songs?title=RHAP", "/songs?title=Bohemian"] {
        let (status, response) = send(&router, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&response), vec![rhapsody.clone()], "{}", uri);
    }
}

#[tokio::test]
async fn test_performer_filter() {
    let (_db, router) = setup().await;
    create(&router, song("Bohemian Rhapsody", "Queen")).await;
    let lennon = create(&router, song("Imagine", "John Lennon")).await;

    let (_, response) = send(&router, Method::GET, "/songs?performer=lEnNoN", None).await;
    assert_eq!(ids(&response), vec![lennon]);
}

#[tokio::test]
async fn test_title_and_performer_must_both_match() {
    let (_db, router) = setup().await;
    let both = create(&router, song("Love of My Life", "Queen")).await;
    create(&router, song("Love Me Do", "The Beatles")).await;
    create(&router, song("Killer Queen Live", "Someone Else")).await;

    let (_, response) =
        send(&router, Method::GET, "/songs?title=love&performer=queen", None).await;
    assert_eq!(ids(&response), vec![both]);
}

#[tokio::test]
async fn test_filters_fold_non_ascii_case() {
    let (_db, router) = setup().await;
    let edith = create(&router, song("Édith Ünder", "ÉDITH PIAF")).await;
    create(&router, song("Edith", "Someone Else")).await;

    for uri in [
        "/songs?title=%C3%89dith",
        "/songs?title=%C3%A9DITH",
        "/songs?title=%C3%BCnder",
        "/songs?performer=%C3%89DITH",
        "/songs?performer=%C3%A9dith%20piaf",
    ] {
        let (status, response) = send(&router, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&response), vec![edith.clone()], "{}", uri);
    }
}

#[tokio::test]
async fn test_unreadable_query_string_uses_fail_envelope() {
    let (_db, router) = setup().await;
    create(&router, song("Bohemian Rhapsody", "Queen")).await;

    let (status, response) = send(&router, Method::GET, "/songs?title=a&title=b", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["status"], "fail");
    assert!(response["message"].as_str().unwrap().contains("$query"));
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_replaces_every_field() {
    let (_db, router) = setup().await;
    let id = create(&router, song("Old Title", "Old Performer")).await;

    let replacement = json!({
        "title": "New Title",
        "year": 2001,
        "genre": "Jazz",
        "performer": "New Performer"
    });
    let (status, response) = send(
        &router,
        Method::PUT,
        &format!("/songs/{}", id),
        Some(replacement),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "success");
    assert_eq!(response["message"], "Song updated successfully");

    let (_, response) = send(&router, Method::GET, &format!("/songs/{}", id), None).await;
    assert_eq!(
        response["data"]["song"],
        json!({
            "id": id,
            "title": "New Title",
            "year": 2001,
            "genre": "Jazz",
            "performer": "New Performer",
            "duration": null,
            "albumId": null
        })
    );
}

#[tokio::test]
async fn test_update_unknown_id_is_404_and_inserts_nothing() {
    let (db, router) = setup().await;

    let (status, response) = send(
        &router,
        Method::PUT,
        "/songs/song-doesnotexist00",
        Some(song("A", "B")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["status"], "fail");
    assert_eq!(row_count(&db).await, 0);
}

#[tokio::test]
async fn test_update_with_invalid_payload_is_400() {
    let (_db, router) = setup().await;
    let id = create(&router, song("Original", "Queen")).await;

    let (status, response) = send(
        &router,
        Method::PUT,
        &format!("/songs/{}", id),
        Some(json!({"title": "Changed", "year": 1975, "genre": "Rock"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["status"], "fail");

    let (_, response) = send(&router, Method::GET, &format!("/songs/{}", id), None).await;
    assert_eq!(response["data"]["song"]["title"], "Original");
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let (db, router) = setup().await;
    let id = create(&router, song("Doomed", "Queen")).await;

    let (status, response) = send(&router, Method::DELETE, &format!("/songs/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["message"], "Song deleted successfully");
    assert_eq!(row_count(&db).await, 0);

    let (status, _) = send(&router, Method::GET, &format!("/songs/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_id_is_404_without_mutation() {
    let (db, router) = setup().await;
    create(&router, song("Survivor", "Queen")).await;

    let (status, response) = send(&router, Method::DELETE, "/songs/song-doesnotexist00", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["message"], "Failed to delete song. Id not found");
    assert_eq!(row_count(&db).await, 1);
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_invalid_payloads_are_400_and_insert_nothing() {
    let (db, router) = setup().await;

    let invalid = [
        json!({"year": 1975, "genre": "Rock", "performer": "Queen"}),
        json!({"title": "A", "year": 1975, "genre": "Rock"}),
        json!({"title": "A", "year": "1975", "genre": "Rock", "performer": "Queen"}),
        json!({"title": "A", "year": 1975, "genre": "Rock", "performer": "Queen", "duration": "long"}),
        json!({"title": "A", "year": 1975, "genre": "Rock", "performer": "Queen", "extra": true}),
        json!("not an object"),
    ];

    for body in invalid {
        let (status, response) = send(&router, Method::POST, "/songs", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(response["status"], "fail");
        assert!(response["message"].as_str().unwrap().contains("field"));
    }

    assert_eq!(row_count(&db).await, 0);
}

#[tokio::test]
async fn test_malformed_json_uses_fail_envelope() {
    let (db, router) = setup().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/songs")
        .header("content-type", "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "fail");
    assert_eq!(row_count(&db).await, 0);
}

// =============================================================================
// Infrastructure
// =============================================================================

#[tokio::test]
async fn test_database_failure_is_generic_500() {
    let db = Database::in_memory().await.unwrap();
    let router = HttpServer::with_config(HttpServerConfig::default(), db).router();

    let (status, response) = send(&router, Method::GET, "/songs", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response["status"], "error");
    assert!(!response["message"].as_str().unwrap().contains("songs"));
}

#[tokio::test]
async fn test_health() {
    let (_db, router) = setup().await;

    let (status, response) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "ok");
}
