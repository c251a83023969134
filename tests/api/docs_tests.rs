use axum::http::StatusCode;

use crate::common::{expect_json, TestApp};

#[tokio::test]
async fn healthz_is_ok() {
    let app = TestApp::new("books").await;
    assert_eq!(app.get("/healthz").await.status(), StatusCode::OK);
    assert_eq!(app.get("/books/health").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn openapi_document_describes_the_service() {
    let app = TestApp::new("books").await;

    let doc = expect_json(app.get("/docs/openapi.json").await, StatusCode::OK).await;
    assert_eq!(doc["info"]["title"], "A book API");
    assert!(doc["paths"]["/books"]["get"].is_object());
    assert!(doc["paths"]["/book/{id}"]["put"].is_object());
    assert!(doc["components"]["schemas"]["Book"].is_object());
    assert!(doc["paths"]["/recipes"].is_null());
}

#[tokio::test]
async fn recipes_document_has_its_own_title() {
    let app = TestApp::new("recipes").await;

    let doc = expect_json(app.get("/docs/openapi.json").await, StatusCode::OK).await;
    assert_eq!(doc["info"]["title"], "A recipe API");
    assert!(doc["paths"]["/recipe/{id}"]["delete"].is_object());
}

#[tokio::test]
async fn root_points_at_the_docs() {
    let app = TestApp::new("recipes").await;

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()["location"], "/swagger-ui/");
}
