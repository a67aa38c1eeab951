use crate::api::{error_response, json_rejection_response, ApiError, ErrorResponse};
use crate::models::RecipeDraft;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    /// Owning user; must reference an existing user.
    pub user_id: Option<i32>,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    pub instructions: String,
}

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created, returns its identifier", body = i32),
        (status = 400, description = "Missing owner or malformed body", body = ErrorResponse),
        (status = 422, description = "Body is missing required fields", body = ErrorResponse),
        (status = 409, description = "Owner does not exist", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(store): State<AppState>,
    payload: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_response(rejection),
    };

    let Some(owner_id) = request.user_id else {
        return error_response(StatusCode::BAD_REQUEST, "userId is required");
    };

    let draft = RecipeDraft {
        name: request.name,
        image: request.image,
        ingredients: request.ingredients,
        instructions: request.instructions,
    };

    match store.insert(&draft, owner_id) {
        Ok(recipe_id) => {
            tracing::info!(recipe_id, owner_id, "recipe created");
            (StatusCode::CREATED, Json(recipe_id)).into_response()
        }
        Err(e) => ApiError::new("Unable to add recipe", e).into_response(),
    }
}
