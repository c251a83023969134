//! Persistence for recipes.

use async_trait::async_trait;
use sqlx::SqlitePool;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use shelf_http::error::AppError;

use super::models::{Recipe, RecipeFields};

#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Recipe>, AppError>;

    /// Store a new recipe; `dates_made` is stamped with the current time.
    async fn insert(&self, fields: RecipeFields) -> Result<Recipe, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, AppError>;

    async fn update(&self, id: i64, fields: RecipeFields) -> Result<Option<Recipe>, AppError>;

    async fn delete(&self, id: i64) -> Result<Option<Recipe>, AppError>;
}

pub struct SqliteRecipeRepository {
    pool: SqlitePool,
}

impl SqliteRecipeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn creation_stamp() -> Result<String, AppError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|err| AppError::Internal(err.into()))
}

#[async_trait]
impl RecipeRepository for SqliteRecipeRepository {
    async fn find_all(&self) -> Result<Vec<Recipe>, AppError> {
        let recipes = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, title, ingredients, dates_made
            FROM recipes
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(recipes)
    }

    async fn insert(&self, fields: RecipeFields) -> Result<Recipe, AppError> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (title, ingredients, dates_made)
            VALUES (?, ?, ?)
            RETURNING id, title, ingredients, dates_made
            "#,
        )
        .bind(fields.title)
        .bind(fields.ingredients)
        .bind(creation_stamp()?)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(recipe_id = recipe.id, "recipe created");
        Ok(recipe)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, AppError> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, title, ingredients, dates_made
            FROM recipes
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(recipe)
    }

    async fn update(&self, id: i64, fields: RecipeFields) -> Result<Option<Recipe>, AppError> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            UPDATE recipes
            SET title = ?, ingredients = ?
            WHERE id = ?
            RETURNING id, title, ingredients, dates_made
            "#,
        )
        .bind(fields.title)
        .bind(fields.ingredients)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if recipe.is_some() {
            tracing::info!(recipe_id = id, "recipe updated");
        }
        Ok(recipe)
    }

    async fn delete(&self, id: i64) -> Result<Option<Recipe>, AppError> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            DELETE FROM recipes
            WHERE id = ?
            RETURNING id, title, ingredients, dates_made
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if recipe.is_some() {
            tracing::info!(recipe_id = id, "recipe deleted");
        }
        Ok(recipe)
    }
}
