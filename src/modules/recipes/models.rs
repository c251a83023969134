use serde::{Deserialize, Serialize};
use validator::Validate;

use shelf_http::error::AppError;

/// A row of the `recipes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    /// Free-form ingredient list
    pub ingredients: Option<String>,
    /// Free-form text; holds the creation instant unless edited in storage
    pub dates_made: String,
}

/// Request body accepted by create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RecipePayload {
    #[validate(
        required(message = "title is required"),
        length(min = 1, max = 90, message = "title must be 1-90 characters")
    )]
    pub title: Option<String>,
    pub ingredients: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeFields {
    pub title: String,
    pub ingredients: Option<String>,
}

impl TryFrom<RecipePayload> for RecipeFields {
    type Error = AppError;

    fn try_from(payload: RecipePayload) -> Result<Self, Self::Error> {
        payload.validate()?;

        Ok(Self {
            title: payload.title.unwrap_or_default(),
            ingredients: payload.ingredients,
        })
    }
}

/// `{"recipes": [...]}`
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipesEnvelope {
    pub recipes: Vec<Recipe>,
}

/// `{"recipe": {...}}`
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeEnvelope {
    pub recipe: Recipe,
}

/// `{"recipe_deleted": {...}}`
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeDeletedEnvelope {
    pub recipe_deleted: Recipe,
}
