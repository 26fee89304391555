// src/server/routes.rs
//! Axum router configuration for the cookbook API

use crate::server::SharedState;
use crate::server::handlers::recipes;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Create the main application router
pub fn create_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/api/health", get(recipes::health))
        .route("/api/US_recipes", get(recipes::list_recipes))
        .route("/api/US_recipes/search", get(recipes::search_recipes))
        .layer(cors)
        .with_state(state)
}

/// CORS for the read-only API: GET from any origin unless a list is configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
