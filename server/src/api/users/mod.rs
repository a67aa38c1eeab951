pub mod recipes;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /users endpoints (mounted at /users)
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/recipes", get(recipes::list_user_recipes))
}

#[derive(OpenApi)]
#[openapi(paths(recipes::list_user_recipes))]
pub struct ApiDoc;
