use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{expect_json, TestApp};

#[tokio::test]
async fn dune_scenario() {
    let app = TestApp::new("books").await;

    let created = expect_json(
        app.post_json("/books", &json!({"title": "Dune", "author": "Herbert"}))
            .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(created["book"]["id"], 1);
    assert_eq!(created["book"]["title"], "Dune");
    assert_eq!(created["book"]["author"], "Herbert");

    let fetched = expect_json(app.get("/book/1").await, StatusCode::OK).await;
    assert_eq!(fetched, created);

    let updated = expect_json(
        app.put_json("/book/1", &json!({"title": "Dune2", "author": "Herbert"}))
            .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(updated["book"]["title"], "Dune2");

    let deleted = expect_json(app.delete("/book/1").await, StatusCode::OK).await;
    assert_eq!(deleted, json!({ "bookdeleted": updated["book"].clone() }));

    let gone = expect_json(app.get("/book/1").await, StatusCode::NOT_FOUND).await;
    assert!(gone.get("book").is_none());
    assert_eq!(gone["error"]["code"], "not_found");
}

#[tokio::test]
async fn list_count_tracks_creates_and_deletes() {
    let app = TestApp::new("books").await;

    let mut ids = Vec::new();
    for n in 0..5 {
        let created = expect_json(
            app.post_json("/books", &json!({"title": format!("Book {n}")}))
                .await,
            StatusCode::CREATED,
        )
        .await;
        ids.push(created["book"]["id"].as_i64().unwrap());
    }
    for id in &ids[..2] {
        expect_json(app.delete(&format!("/book/{id}")).await, StatusCode::OK).await;
    }

    let listed = expect_json(app.get("/books").await, StatusCode::OK).await;
    let listed_ids: Vec<i64> = listed["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["id"].as_i64().unwrap())
        .collect();
    assert_eq!(listed_ids.len(), 3);
    assert!(ids[..2].iter().all(|id| !listed_ids.contains(id)));

    let next = expect_json(
        app.post_json("/books", &json!({"title": "Again"})).await,
        StatusCode::CREATED,
    )
    .await;
    assert!(next["book"]["id"].as_i64().unwrap() > ids[4]);
}

#[tokio::test]
async fn identical_creates_produce_distinct_rows() {
    let app = TestApp::new("books").await;
    let body = json!({"title": "Dune", "author": "Herbert"});

    let first = expect_json(app.post_json("/books", &body).await, StatusCode::CREATED).await;
    let second = expect_json(app.post_json("/books", &body).await, StatusCode::CREATED).await;

    assert_ne!(first["book"]["id"], second["book"]["id"]);
}

#[tokio::test]
async fn full_overwrite_nulls_the_author() {
    let app = TestApp::new("books").await;
    app.post_json("/books", &json!({"title": "Dune", "author": "Herbert"}))
        .await;

    expect_json(
        app.put_json("/book/1", &json!({"title": "A", "author": null}))
            .await,
        StatusCode::OK,
    )
    .await;

    let fetched = expect_json(app.get("/book/1").await, StatusCode::OK).await;
    assert_eq!(fetched["book"]["author"], Value::Null);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = TestApp::new("books").await;
    let response = app.get("/books").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn put_to_missing_id_is_not_found_whatever_the_body() {
    let app = TestApp::new("books").await;

    let untitled = expect_json(
        app.put_json("/book/999", &json!({"author": "x"})).await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(untitled["error"]["code"], "not_found");

    let not_json = app.send_raw("PUT", "/book/999", None, "x").await;
    assert_eq!(not_json.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_body_gets_the_error_envelope() {
    let app = TestApp::new("books").await;

    let body = expect_json(
        app.send_raw("POST", "/books", Some("application/json"), "{not json")
            .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["error"]["code"], "bad_request");
    assert!(body["error"]["trace_id"].is_string());

    app.post_json("/books", &json!({"title": "Dune"})).await;
    let existing = expect_json(
        app.send_raw("PUT", "/book/1", Some("application/json"), "{not json")
            .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(existing["error"]["code"], "bad_request");

    let listed = expect_json(app.get("/books").await, StatusCode::OK).await;
    assert_eq!(listed["books"][0]["title"], "Dune");
}

#[tokio::test]
async fn missing_content_type_is_a_bad_request() {
    let app = TestApp::new("books").await;

    let body = expect_json(
        app.send_raw("POST", "/books", None, r#"{"title": "Dune"}"#)
            .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["error"]["code"], "bad_request");
}
