use crate::api::{json_rejection_response, ApiError, ErrorResponse};
use crate::models::{Recipe, RecipeDraft};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Replaces every mutable field; omitted image or ingredients are stored as "".
#[utoipa::path(
    put,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = RecipeDraft,
    responses(
        (status = 200, description = "Recipe updated successfully", body = Recipe),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 422, description = "Body is missing required fields", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(store): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<RecipeDraft>, JsonRejection>,
) -> impl IntoResponse {
    let Json(draft) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_response(rejection),
    };

    match store.update(id, &draft) {
        Ok(recipe) => (StatusCode::OK, Json(recipe)).into_response(),
        Err(e) => ApiError::new("Unable to update recipe", e).into_response(),
    }
}
