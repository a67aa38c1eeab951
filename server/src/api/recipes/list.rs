use crate::api::{ApiError, ErrorResponse};
use crate::models::Recipe;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "Every stored recipe", body = Vec<Recipe>),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    )
)]
pub async fn list_recipes(State(store): State<AppState>) -> impl IntoResponse {
    match store.list_all() {
        Ok(recipes) => (StatusCode::OK, Json(recipes)).into_response(),
        Err(e) => ApiError::new("Couldn't get recipes", e).into_response(),
    }
}
