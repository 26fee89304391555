// src/db/schema.rs

//! Schema for the recipe store
//!
//! The table is created idempotently; there is no migration path.

use crate::error::Result;
use rusqlite::Connection;
use tracing::debug;

/// Name of the recipe table
pub const RECIPES_TABLE: &str = "US_recipes";

/// Columns selected for every recipe read, in `Recipe::from_row` order
pub const RECIPE_COLUMNS: &str =
    "id, cuisine, title, rating, prep_time, cook_time, total_time, description, nutrients, serves";

/// Create the recipe table and its indexes if they do not exist yet
pub fn create(conn: &Connection) -> Result<()> {
    debug!("Ensuring {} schema", RECIPES_TABLE);

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS US_recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            cuisine TEXT,
            title TEXT,
            rating REAL,
            prep_time INTEGER,
            cook_time INTEGER,
            total_time INTEGER,
            description TEXT,
            nutrients TEXT,  -- JSON object, nutrient name -> free text
            serves TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_recipes_rating ON US_recipes(rating);
        CREATE INDEX IF NOT EXISTS idx_recipes_title ON US_recipes(title);
        CREATE INDEX IF NOT EXISTS idx_recipes_cuisine ON US_recipes(cuisine);
        ",
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create(&conn).unwrap();
        create(&conn).unwrap();

        let indexes: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND tbl_name = 'US_recipes' AND name LIKE 'idx_recipes_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(indexes, 3);
    }
}
