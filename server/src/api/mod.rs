pub mod meals;
pub mod recipes;
pub mod testing;
pub mod users;

use crate::models::{Recipe, RecipeDraft};
use crate::store::StoreError;
use crate::AppState;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// A store failure tagged with the user-facing summary of what was attempted.
///
/// Status and message are chosen from the failure kind alone; the underlying
/// detail is logged and never returned.
#[derive(Debug)]
pub struct ApiError {
    summary: &'static str,
    source: StoreError,
}

impl ApiError {
    pub fn new(summary: &'static str, source: StoreError) -> Self {
        Self { summary, source }
    }

    fn status_and_detail(&self) -> (StatusCode, &'static str) {
        match self.source {
            StoreError::Connection(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Unable to connect to the database",
            ),
            StoreError::Integrity(_) => {
                (StatusCode::CONFLICT, "Action would violate data integrity")
            }
            StoreError::Syntax(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Invalid statement"),
            StoreError::NotFound(_) => (StatusCode::NOT_FOUND, "Recipe not found"),
            StoreError::Mapping(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Stored recipe could not be read",
            ),
            StoreError::Query(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        tracing::error!(error = %self.source, status = status.as_u16(), "{}", self.summary);

        (
            status,
            Json(ErrorResponse {
                error: format!("{}: {}", self.summary, detail),
            }),
        )
            .into_response()
    }
}

/// Shorthand for handler-level rejections that never reach the store.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Malformed or mistyped request bodies, reported in the usual error shape.
pub fn json_rejection_response(rejection: JsonRejection) -> Response {
    let message = rejection.body_text();
    tracing::warn!(status = rejection.status().as_u16(), "{}", message);
    error_response(rejection.status(), &message)
}

/// All API routes, without state or middleware.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/recipes", recipes::router())
        .nest("/users", users::router())
        .nest("/meals", meals::router())
        .nest("/test", testing::router())
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Larder", description = "Recipe management API"),
        components(schemas(ErrorResponse, Recipe, RecipeDraft))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        recipes::ApiDoc::openapi(),
        users::ApiDoc::openapi(),
        meals::ApiDoc::openapi(),
        testing::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: StoreError) -> StatusCode {
        ApiError::new("Unable to add recipe", err)
            .into_response()
            .status()
    }

    #[test]
    fn test_error_kinds_map_to_distinct_statuses() {
        assert_eq!(
            status_of(StoreError::Connection("refused".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(StoreError::Integrity("fk".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(StoreError::Syntax("bad".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_of(StoreError::NotFound(4)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(StoreError::Mapping("shape".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_openapi_lists_every_route() {
        let spec = openapi();
        for path in [
            "/recipes",
            "/recipes/{id}",
            "/users/{id}/recipes",
            "/meals/{id}/recipes",
            "/test/ping",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
