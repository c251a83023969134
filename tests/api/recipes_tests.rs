use axum::http::StatusCode;
use serde_json::json;

use crate::common::{expect_json, TestApp};

#[tokio::test]
async fn recipe_scenario() {
    let app = TestApp::new("recipes").await;

    let created = expect_json(
        app.post_json(
            "/recipes",
            &json!({"title": "Shakshuka", "ingredients": "eggs, tomatoes, peppers"}),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let recipe = &created["recipe"];
    assert_eq!(recipe["id"], 1);
    assert!(recipe["dates_made"].as_str().is_some_and(|s| !s.is_empty()));

    let listed = expect_json(app.get("/recipes").await, StatusCode::OK).await;
    assert_eq!(listed, json!({ "recipes": [recipe.clone()] }));

    let deleted = expect_json(app.delete("/recipe/1").await, StatusCode::OK).await;
    assert_eq!(deleted["recipe_deleted"], *recipe);

    expect_json(app.get("/recipe/1").await, StatusCode::NOT_FOUND).await;
    expect_json(
        app.put_json("/recipe/1", &json!({"title": "Shakshuka"}))
            .await,
        StatusCode::NOT_FOUND,
    )
    .await;
}

#[tokio::test]
async fn recipes_service_does_not_serve_books() {
    let app = TestApp::new("recipes").await;
    assert_eq!(app.get("/books").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_title_is_a_validation_error() {
    let app = TestApp::new("recipes").await;

    let body = expect_json(
        app.post_json("/recipes", &json!({"ingredients": "water"}))
            .await,
        StatusCode::UNPROCESSABLE_ENTITY,
    )
    .await;
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn put_to_missing_recipe_is_not_found() {
    let app = TestApp::new("recipes").await;

    let untitled = expect_json(
        app.put_json("/recipe/999", &json!({"ingredients": "eggs"}))
            .await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(untitled["error"]["code"], "not_found");

    let not_json = app.send_raw("PUT", "/recipe/999", None, "x").await;
    assert_eq!(not_json.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_recipe_body_is_a_bad_request() {
    let app = TestApp::new("recipes").await;

    let body = expect_json(
        app.send_raw("POST", "/recipes", Some("application/json"), "{not json")
            .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["error"]["code"], "bad_request");
}
