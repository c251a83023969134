//! Common Test Utilities

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use shelf_app::app::Service;
use shelf_kernel::{settings::Settings, ModuleRegistry};

/// One service mounted on the production router over an in-memory database
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    pub async fn new(service: &str) -> Self {
        let settings = Settings::default();
        let mut registry = ModuleRegistry::new();
        shelf_app::modules::register(&mut registry, service).unwrap();

        let db = shelf_db::connect_in_memory().await.unwrap();
        let service = Service::with_pool(registry, service, db).await.unwrap();
        let ctx = service.ctx(&settings);
        service.registry.init_modules(&ctx).await.unwrap();

        Self {
            router: shelf_http::build_router(&service.registry, &ctx),
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> Response {
        self.send_json("POST", uri, body).await
    }

    pub async fn put_json(&self, uri: &str, body: &Value) -> Response {
        self.send_json("PUT", uri, body).await
    }

    /// Send `body` verbatim, with an optional content type
    pub async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    async fn send_json(&self, method: &str, uri: &str, body: &Value) -> Response {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

/// Assert the status and decode the JSON body
pub async fn expect_json(response: Response, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
