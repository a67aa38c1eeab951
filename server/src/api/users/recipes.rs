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
    path = "/users/{id}/recipes",
    tag = "users",
    params(
        ("id" = i32, Path, description = "Owning user ID")
    ),
    responses(
        (status = 200, description = "Recipes owned by the user, possibly empty", body = Vec<Recipe>),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    )
)]
pub async fn list_user_recipes(
    State(store): State<AppState>,
    Path(user_id): Path<i32>,
) -> impl IntoResponse {
    match store.list_by_owner(user_id) {
        Ok(recipes) => (StatusCode::OK, Json(recipes)).into_response(),
        Err(e) => ApiError::new("Couldn't get recipes", e).into_response(),
    }
}
