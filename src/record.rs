// src/record.rs

//! Output shape for recipes returned by the API

use crate::db::models::Recipe;
use crate::nutrients::Nutrients;
use serde::Serialize;

/// A recipe as returned to clients, with nutrients decoded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeRecord {
    pub id: i64,
    pub cuisine: Option<String>,
    pub title: Option<String>,
    pub rating: Option<f64>,
    pub prep_time: Option<i64>,
    pub cook_time: Option<i64>,
    pub total_time: Option<i64>,
    pub description: Option<String>,
    pub nutrients: Nutrients,
    pub serves: Option<String>,
}

impl RecipeRecord {
    /// Shape a stored row, decoding its nutrients blob
    pub fn from_recipe(recipe: Recipe) -> Self {
        let nutrients = Nutrients::decode(recipe.nutrients.as_deref());
        Self::with_nutrients(recipe, nutrients)
    }

    /// Shape a stored row whose nutrients were already decoded
    pub(crate) fn with_nutrients(recipe: Recipe, nutrients: Nutrients) -> Self {
        Self {
            id: recipe.id.unwrap_or_default(),
            cuisine: recipe.cuisine,
            title: recipe.title,
            rating: recipe.rating,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            total_time: recipe.total_time,
            description: recipe.description,
            nutrients,
            serves: recipe.serves,
        }
    }
}

impl From<Recipe> for RecipeRecord {
    fn from(recipe: Recipe) -> Self {
        Self::from_recipe(recipe)
    }
}
