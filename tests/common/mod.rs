// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use cookbook::db;
use cookbook::db::models::Recipe;
use tempfile::TempDir;

/// (title, cuisine, rating, total_time, nutrients JSON)
type Fixture = (
    &'static str,
    Option<&'static str>,
    Option<f64>,
    Option<i64>,
    Option<&'static str>,
);

/// Fixture rows; ids are assigned 1..=8 in this order.
pub const FIXTURES: [Fixture; 8] = [
    ("Sweet Potato Pie", Some("Southern Recipes"), Some(4.8), Some(115), Some(r#"{"calories": "389 kcal", "fatContent": "21 g"}"#)),
    ("Spaghetti Carbonara", Some("Italian"), Some(4.6), Some(30), Some(r#"{"calories": "612 kcal"}"#)),
    ("Chicken Parmesan", Some("Italian-American"), Some(4.7), Some(60), Some(r#"{"calories": "745 kcal"}"#)),
    ("Caprese Salad", Some("italian"), None, Some(10), Some(r#"{"calories": "210 kcal"}"#)),
    ("Garden Pasta Salad", Some("Salad"), Some(4.6), Some(25), Some("{}")),
    ("Mystery Casserole", None, None, None, Some("oops, not json")),
    ("Tomato Soup", Some("Soups"), Some(3.9), Some(45), Some(r#"{"calories": "approx. 400 kcal"}"#)),
    ("Pasta e Fagioli", Some("ITALIAN"), Some(4.2), Some(50), Some(r#"{"calories": "400 kcal"}"#)),
];

/// Create a test database seeded with [`FIXTURES`].
///
/// Returns (TempDir, db_path) - keep the TempDir alive to prevent cleanup.
pub fn setup_recipe_db() -> (TempDir, String) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir
        .path()
        .join("recipes.db")
        .to_str()
        .unwrap()
        .to_string();

    db::init(&db_path).unwrap();
    let mut conn = db::open(&db_path).unwrap();

    db::transaction(&mut conn, |tx| {
        for (title, cuisine, rating, total_time, nutrients) in FIXTURES {
            let mut recipe = Recipe {
                title: Some(title.to_string()),
                cuisine: cuisine.map(str::to_string),
                rating,
                total_time,
                nutrients: nutrients.map(str::to_string),
                serves: Some("4".to_string()),
                ..Recipe::default()
            };
            recipe.insert(tx)?;
        }
        Ok(())
    })
    .unwrap();

    (temp_dir, db_path)
}

/// Ids of a result set, in order
pub fn ids(records: &[cookbook::RecipeRecord]) -> Vec<i64> {
    records.iter().map(|r| r.id).collect()
}
