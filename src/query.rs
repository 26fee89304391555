// src/query.rs

//! Read operations over the recipe store: rating-ordered listing and
//! multi-criteria search

use crate::db::models::Recipe;
use crate::error::Result;
use crate::filter::{self, CalorieFilter, SearchFilters};
use crate::nutrients::Nutrients;
use crate::record::RecipeRecord;
use rusqlite::Connection;
use serde::Serialize;
use tracing::debug;

/// Default page number for listings
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size for listings
pub const DEFAULT_LIMIT: i64 = 10;

/// One page of the rating-ordered listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
    /// Number of recipes in the whole store
    pub total: i64,
    pub data: Vec<RecipeRecord>,
}

/// List recipes best rated first, unrated last
///
/// `page` and `limit` are clamped to at least 1.
pub fn list(conn: &Connection, page: i64, limit: i64) -> Result<Page> {
    let page = page.max(1);
    let limit = limit.max(1);
    let offset = (page - 1).saturating_mul(limit);

    let total = Recipe::count(conn)?;
    let data = Recipe::list_page(conn, limit, offset)?
        .into_iter()
        .map(RecipeRecord::from_recipe)
        .collect();

    Ok(Page {
        page,
        limit,
        total,
        data,
    })
}

/// Search recipes
///
/// Title, cuisine, total time and rating are evaluated by SQLite in one
/// query; the calorie condition is then applied to the retrieved rows.
/// Results are not paginated.
pub fn search(conn: &Connection, filters: &SearchFilters) -> Result<Vec<RecipeRecord>> {
    let compiled = filter::compile(filters);
    let (clause, bind) = compiled.where_clause();
    let calories = CalorieFilter::new(compiled.residual);

    match compiled.residual {
        Some(condition) => debug!("Searching recipes: where=[{}] calories {}", clause, condition),
        None => debug!("Searching recipes: where=[{}]", clause),
    }

    let rows = Recipe::find_where(conn, &clause, &bind)?;
    let fetched = rows.len();

    let records: Vec<RecipeRecord> = rows
        .into_iter()
        .filter_map(|recipe| {
            let nutrients = Nutrients::decode(recipe.nutrients.as_deref());
            calories
                .matches(&nutrients)
                .then(|| RecipeRecord::with_nutrients(recipe, nutrients))
        })
        .collect();

    if calories.is_active() {
        debug!(
            "Calorie filter kept {} of {} rows",
            records.len(),
            fetched
        );
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{self, schema};

    fn store(rows: &[(&str, Option<f64>, Option<&str>)]) -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        schema::create(&conn).unwrap();
        db::register_functions(&conn).unwrap();
        for (title, rating, nutrients) in rows {
            Recipe {
                title: Some(title.to_string()),
                rating: *rating,
                nutrients: nutrients.map(str::to_string),
                ..Recipe::default()
            }
            .insert(&conn)
            .unwrap();
        }
        conn
    }

    #[test]
    fn test_list_clamps_page_and_limit() {
        let conn = store(&[("A", Some(1.0), None), ("B", Some(2.0), None)]);

        let page = list(&conn, 0, -5).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 1);
        assert_eq!(page.total, 2);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].title.as_deref(), Some("B"));
    }

    #[test]
    fn test_list_past_the_end() {
        let conn = store(&[("A", Some(1.0), None)]);

        let page = list(&conn, 5, 10).unwrap();
        assert_eq!(page.total, 1);
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_list_huge_page_does_not_overflow() {
        let conn = store(&[("A", Some(1.0), None)]);
        let page = list(&conn, i64::MAX, i64::MAX).unwrap();
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_search_applies_residual_after_query() {
        let conn = store(&[
            ("Light Soup", Some(4.0), Some(r#"{"calories":"150 kcal"}"#)),
            ("Heavy Stew", Some(4.5), Some(r#"{"calories":"650 kcal"}"#)),
            ("Mystery Stew", Some(5.0), Some("not json")),
        ]);

        let found = search(
            &conn,
            &SearchFilters {
                title: Some("stew".to_string()),
                calories: Some(">=400".to_string()),
                ..SearchFilters::default()
            },
        )
        .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title.as_deref(), Some("Heavy Stew"));
        assert_eq!(found[0].nutrients.text("calories").as_deref(), Some("650 kcal"));
    }

    #[test]
    fn test_search_decodes_nutrients_without_calorie_filter() {
        let conn = store(&[
            ("Good", None, Some(r#"{"calories":"150 kcal"}"#)),
            ("Broken", None, Some("{")),
        ]);

        let found = search(&conn, &SearchFilters::default()).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].nutrients.text("calories").as_deref(), Some("150 kcal"));
        assert_eq!(found[1].nutrients, Nutrients::default());
    }
}
