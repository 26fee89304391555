// src/server/handlers/recipes.rs
//! Recipe listing and search endpoints

use crate::db;
use crate::filter::SearchFilters;
use crate::query::{self, DEFAULT_LIMIT, DEFAULT_PAGE, Page};
use crate::record::RecipeRecord;
use crate::server::SharedState;
use crate::server::handlers::ApiResult;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use tracing::debug;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Raw query-string pairs, in request order
///
/// Extracted as pairs rather than a struct so that repeated keys never
/// reject the request; the first occurrence of a key wins.
pub type QueryPairs = Vec<(String, String)>;

fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, value)| value.clone())
}

/// Query parameters for the listing
///
/// Kept as raw strings so that unparseable values fall back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Default)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            page: first_value(pairs, "page"),
            limit: first_value(pairs, "limit"),
        }
    }

    pub fn page(&self) -> i64 {
        parse_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        parse_or(self.limit.as_deref(), DEFAULT_LIMIT)
    }
}

fn parse_or(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

/// Search response body
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub data: Vec<RecipeRecord>,
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /api/US_recipes?page&limit
///
/// Recipes ordered by rating (unrated last), one page at a time.
pub async fn list_recipes(
    State(state): State<SharedState>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult<Json<Page>> {
    let db_path = state.config.db_path.clone();
    let params = ListParams::from_pairs(&pairs);
    let (page, limit) = (params.page(), params.limit());
    debug!("Listing recipes: page={} limit={}", page, limit);

    let result = tokio::task::spawn_blocking(move || -> crate::Result<Page> {
        let conn = db::open(&db_path)?;
        query::list(&conn, page, limit)
    })
    .await?;

    Ok(Json(result?))
}

/// GET /api/US_recipes/search?calories&title&cuisine&total_time&rating
///
/// Every parameter is optional; unparseable numeric filters are ignored.
pub async fn search_recipes(
    State(state): State<SharedState>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult<Json<SearchResponse>> {
    let db_path = state.config.db_path.clone();
    let filters = SearchFilters {
        title: first_value(&pairs, "title"),
        cuisine: first_value(&pairs, "cuisine"),
        total_time: first_value(&pairs, "total_time"),
        rating: first_value(&pairs, "rating"),
        calories: first_value(&pairs, "calories"),
    };

    let result = tokio::task::spawn_blocking(move || -> crate::Result<Vec<RecipeRecord>> {
        let conn = db::open(&db_path)?;
        query::search(&conn, &filters)
    })
    .await?;

    Ok(Json(SearchResponse { data: result? }))
}
