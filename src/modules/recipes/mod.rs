pub mod models;
pub mod repository;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;
use shelf_kernel::{InitCtx, Migration, Module};

use repository::SqliteRecipeRepository;

/// Recipes service: CRUD over the `recipes` table
pub struct RecipesModule;

impl RecipesModule {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for RecipesModule {
    fn default() -> Self {
        Self::new()
    }
}

/// Schema for the `recipes` table
pub fn migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_init",
        up: r#"
            CREATE TABLE IF NOT EXISTS recipes (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                title       VARCHAR(90) NOT NULL,
                ingredients TEXT,
                dates_made  TEXT NOT NULL
            );
            "#,
    }]
}

#[async_trait]
impl Module for RecipesModule {
    fn name(&self) -> &'static str {
        "recipes"
    }

    fn title(&self) -> &'static str {
        "A recipe API"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
            .fetch_one(ctx.db)
            .await?;

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            recipes = count,
            "recipes module initialized"
        );
        Ok(())
    }

    fn routes(&self, ctx: &InitCtx<'_>) -> Router {
        routes::router(Arc::new(SqliteRecipeRepository::new(ctx.db.clone())))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let recipe_ref = json!({ "$ref": "#/components/schemas/Recipe" });
        let payload_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/RecipePayload" }
                }
            }
        });
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        }]);
        let not_found = json!({
            "description": "Recipe not found",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let envelope = |key: &str, schema: &serde_json::Value| {
            json!({
                "description": "OK",
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
                "/recipes": {
                    "get": {
                        "summary": "Get all Recipes",
                        "tags": ["Recipes"],
                        "responses": {
                            "200": envelope("recipes", &json!({ "type": "array", "items": recipe_ref }))
                        }
                    },
                    "post": {
                        "summary": "Create a new recipe",
                        "tags": ["Recipes"],
                        "requestBody": payload_body,
                        "responses": {
                            "201": envelope("recipe", &recipe_ref)
                        }
                    }
                },
                "/recipe/{id}": {
                    "get": {
                        "summary": "Get a Recipe by id",
                        "tags": ["Recipes"],
                        "parameters": id_param,
                        "responses": {
                            "200": envelope("recipe", &recipe_ref),
                            "404": not_found
                        }
                    },
                    "put": {
                        "summary": "Update a recipe",
                        "tags": ["Recipes"],
                        "parameters": id_param,
                        "requestBody": payload_body,
                        "responses": {
                            "200": envelope("recipe", &recipe_ref),
                            "404": not_found
                        }
                    },
                    "delete": {
                        "summary": "Delete a recipe",
                        "tags": ["Recipes"],
                        "parameters": id_param,
                        "responses": {
                            "200": envelope("recipe_deleted", &recipe_ref),
                            "404": not_found
                        }
                    }
                },
                "/recipes/health": {
                    "get": {
                        "summary": "Recipes health check",
                        "tags": ["Recipes"],
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
                    "Recipe": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "title": { "type": "string", "maxLength": 90 },
                            "ingredients": { "type": ["string", "null"] },
                            "dates_made": { "type": "string" }
                        },
                        "required": ["id", "title", "ingredients", "dates_made"]
                    },
                    "RecipePayload": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string", "minLength": 1, "maxLength": 90 },
                            "ingredients": { "type": ["string", "null"] }
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

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "recipes module stopped");
        Ok(())
    }
}

/// Create a new instance of the recipes module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(RecipesModule::new())
}
