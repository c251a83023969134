//! HTTP handlers for the recipes resource.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use shelf_http::error::AppError;

use super::models::{
    RecipeDeletedEnvelope, RecipeEnvelope, RecipeFields, RecipePayload, RecipesEnvelope,
};
use super::repository::RecipeRepository;

pub type SharedRecipeRepository = Arc<dyn RecipeRepository>;

/// Collection routes at `/recipes`, item routes at `/recipe/{id}`
pub fn router(repository: SharedRecipeRepository) -> Router {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/recipe/{id}",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
        .route("/recipes/health", get(health_check))
        .with_state(repository)
}

async fn health_check() -> &'static str {
    "recipes module is healthy"
}

fn not_found(id: i64) -> AppError {
    AppError::not_found(format!("recipe {id} not found"))
}

async fn list_recipes(
    State(repository): State<SharedRecipeRepository>,
) -> Result<Json<RecipesEnvelope>, AppError> {
    let recipes = repository.find_all().await?;
    Ok(Json(RecipesEnvelope { recipes }))
}

async fn create_recipe(
    State(repository): State<SharedRecipeRepository>,
    payload: Result<Json<RecipePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<RecipeEnvelope>), AppError> {
    let Json(payload) = payload?;
    let recipe = repository.insert(RecipeFields::try_from(payload)?).await?;
    Ok((StatusCode::CREATED, Json(RecipeEnvelope { recipe })))
}

async fn get_recipe(
    State(repository): State<SharedRecipeRepository>,
    Path(id): Path<i64>,
) -> Result<Json<RecipeEnvelope>, AppError> {
    let recipe = repository.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(RecipeEnvelope { recipe }))
}

async fn update_recipe(
    State(repository): State<SharedRecipeRepository>,
    Path(id): Path<i64>,
    payload: Result<Json<RecipePayload>, JsonRejection>,
) -> Result<Json<RecipeEnvelope>, AppError> {
    if repository.find_by_id(id).await?.is_none() {
        return Err(not_found(id));
    }

    let Json(payload) = payload?;
    let fields = RecipeFields::try_from(payload)?;
    let recipe = repository
        .update(id, fields)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(RecipeEnvelope { recipe }))
}

async fn delete_recipe(
    State(repository): State<SharedRecipeRepository>,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDeletedEnvelope>, AppError> {
    let recipe_deleted = repository.delete(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(RecipeDeletedEnvelope { recipe_deleted }))
}
