pub mod models;
pub mod repository;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;
use shelf_kernel::{InitCtx, Migration, Module};

use repository::SqliteBookRepository;

/// Books service: CRUD over the `books` table
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for BooksModule {
    fn default() -> Self {
        Self::new()
    }
}

/// Schema for the `books` table
pub fn migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_init",
        up: r#"
            CREATE TABLE IF NOT EXISTS books (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                title      VARCHAR(90) NOT NULL,
                author     VARCHAR(75),
                date_added DATETIME NOT NULL
            );
            "#,
    }]
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    fn title(&self) -> &'static str {
        "A book API"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books")
            .fetch_one(ctx.db)
            .await?;

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books = count,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self, ctx: &InitCtx<'_>) -> Router {
        routes::router(Arc::new(SqliteBookRepository::new(ctx.db.clone())))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let book_ref = json!({ "$ref": "#/components/schemas/Book" });
        let payload_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/BookPayload" }
                }
            }
        });
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        }]);
        let error_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let envelope = |description: &str, key: &str, schema: serde_json::Value| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": {
                            "type": "object",
                            "properties": { key: schema },
                            "required": [key]
                        }
                    }
                }
            })
        };

        Some(json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "Get all Books",
                        "tags": ["Books"],
                        "responses": {
                            "200": envelope("List of books", "books", json!({ "type": "array", "items": book_ref })),
                            "500": error_response("Internal server error")
                        }
                    },
                    "post": {
                        "summary": "Create a new Book",
                        "tags": ["Books"],
                        "requestBody": payload_body,
                        "responses": {
                            "201": envelope("Created book", "book", book_ref.clone()),
                            "422": error_response("Validation error")
                        }
                    }
                },
                "/book/{id}": {
                    "get": {
                        "summary": "Get one Book by id",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "responses": {
                            "200": envelope("Book", "book", book_ref.clone()),
                            "404": error_response("Book not found")
                        }
                    },
                    "put": {
                        "summary": "Update a book",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "requestBody": payload_body,
                        "responses": {
                            "200": envelope("Updated book", "book", book_ref.clone()),
                            "404": error_response("Book not found"),
                            "422": error_response("Validation error")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "responses": {
                            "200": envelope("Deleted book", "bookdeleted", book_ref.clone()),
                            "404": error_response("Book not found")
                        }
                    }
                },
                "/books/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": { "text/plain": { "schema": { "type": "string" } } }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "title": { "type": "string", "maxLength": 90 },
                            "author": { "type": ["string", "null"], "maxLength": 75 },
                            "date_added": { "type": "string", "format": "date-time" }
                        },
                        "required": ["id", "title", "author", "date_added"]
                    },
                    "BookPayload": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string", "minLength": 1, "maxLength": 90 },
                            "author": { "type": ["string", "null"], "maxLength": 75 }
                        },
                        "required": ["title"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        migrations()
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BooksModule::new())
}
