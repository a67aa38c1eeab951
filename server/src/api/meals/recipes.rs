use crate::api::{ApiError, ErrorResponse};
use crate::models::Recipe;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    get,
    path = "/meals/{id}/recipes",
    tag = "meals",
    params(
        ("id" = i32, Path, description = "Meal ID")
    ),
    responses(
        (status = 200, description = "Recipes planned for the meal", body = Vec<Recipe>),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    )
)]
pub async fn list_meal_recipes(
    State(store): State<AppState>,
    Path(meal_id): Path<i32>,
) -> impl IntoResponse {
    match store.list_by_meal(meal_id) {
        Ok(recipes) => (StatusCode::OK, Json(recipes)).into_response(),
        Err(e) => ApiError::new("Couldn't get meal recipes", e).into_response(),
    }
}
