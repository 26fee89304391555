// src/db/models/recipe.rs

//! Recipe model - one row of the `US_recipes` table

use crate::db::schema::RECIPE_COLUMNS;
use crate::error::Result;
use rusqlite::types::Value;
use rusqlite::{Connection, Row, params, params_from_iter};

/// A recipe as stored in the database
///
/// `nutrients` holds the serialized JSON text exactly as stored; decoding
/// happens in [`crate::nutrients::Nutrients`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recipe {
    pub id: Option<i64>,
    pub cuisine: Option<String>,
    pub title: Option<String>,
    pub rating: Option<f64>,
    pub prep_time: Option<i64>,
    pub cook_time: Option<i64>,
    pub total_time: Option<i64>,
    pub description: Option<String>,
    pub nutrients: Option<String>,
    pub serves: Option<String>,
}

impl Recipe {
    /// Insert this recipe into the database
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        conn.execute(
            "INSERT INTO US_recipes (cuisine, title, rating, prep_time, cook_time, total_time, description, nutrients, serves)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                &self.cuisine,
                &self.title,
                &self.rating,
                &self.prep_time,
                &self.cook_time,
                &self.total_time,
                &self.description,
                &self.nutrients,
                &self.serves,
            ],
        )?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Count every recipe in the store
    pub fn count(conn: &Connection) -> Result<i64> {
        let total = conn.query_row("SELECT COUNT(*) FROM US_recipes", [], |row| row.get(0))?;
        Ok(total)
    }

    /// One page of recipes, best rated first
    ///
    /// Unrated recipes sort after every rated one; `id` breaks ties so that
    /// consecutive pages never overlap.
    pub fn list_page(conn: &Connection, limit: i64, offset: i64) -> Result<Vec<Self>> {
        let sql = format!(
            "SELECT {RECIPE_COLUMNS} FROM US_recipes
             ORDER BY rating IS NULL ASC, rating DESC, id ASC
             LIMIT ?1 OFFSET ?2"
        );
        let mut stmt = conn.prepare(&sql)?;

        let recipes = stmt
            .query_map(params![limit, offset], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(recipes)
    }

    /// Recipes matching a conjunctive WHERE clause
    ///
    /// `clause` must only contain `?` placeholders for user input; an empty
    /// clause selects every row.
    pub fn find_where(conn: &Connection, clause: &str, bind: &[Value]) -> Result<Vec<Self>> {
        let mut sql = format!("SELECT {RECIPE_COLUMNS} FROM US_recipes");
        if !clause.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(clause);
        }
        sql.push_str(" ORDER BY id");

        let mut stmt = conn.prepare(&sql)?;
        let recipes = stmt
            .query_map(params_from_iter(bind.iter()), Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(recipes)
    }

    /// Remove every recipe, returning how many rows were deleted
    pub fn delete_all(conn: &Connection) -> Result<usize> {
        let deleted = conn.execute("DELETE FROM US_recipes", [])?;
        Ok(deleted)
    }

    /// Convert a database row to a Recipe
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            cuisine: row.get(1)?,
            title: row.get(2)?,
            rating: row.get(3)?,
            prep_time: row.get(4)?,
            cook_time: row.get(5)?,
            total_time: row.get(6)?,
            description: row.get(7)?,
            nutrients: row.get(8)?,
            serves: row.get(9)?,
        })
    }
}
