pub mod recipes;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /meals endpoints (mounted at /meals)
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/recipes", get(recipes::list_meal_recipes))
}

#[derive(OpenApi)]
#[openapi(paths(recipes::list_meal_recipes))]
pub struct ApiDoc;
