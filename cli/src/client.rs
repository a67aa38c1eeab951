//! Thin HTTP client for the Larder API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// A recipe as returned by the server.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub image: String,
    pub ingredients: String,
    pub instructions: String,
}

/// Body of `POST /recipes`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub user_id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    pub instructions: String,
}

/// Which recipes `list` should fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeFilter {
    All,
    Owner(i32),
    Meal(i32),
}

impl RecipeFilter {
    pub fn path(&self) -> String {
        match self {
            RecipeFilter::All => "/recipes".to_string(),
            RecipeFilter::Owner(id) => format!("/users/{id}/recipes"),
            RecipeFilter::Meal(id) => format!("/meals/{id}/recipes"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct PingResponse {
    message: String,
}

pub struct LarderClient {
    http: reqwest::Client,
    base_url: String,
}

impl LarderClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn ping(&self) -> Result<String, ClientError> {
        let response = self.http.get(self.url("/test/ping")).send().await?;
        let body: PingResponse = check(response).await?.json().await?;
        Ok(body.message)
    }

    /// Create a recipe and return its identifier.
    pub async fn add_recipe(&self, recipe: &NewRecipe) -> Result<i32, ClientError> {
        let response = self
            .http
            .post(self.url("/recipes"))
            .json(recipe)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn list_recipes(&self, filter: RecipeFilter) -> Result<Vec<Recipe>, ClientError> {
        let response = self.http.get(self.url(&filter.path())).send().await?;
        Ok(check(response).await?.json().await?)
    }
}

/// Turn non-2xx responses into [`ClientError::Api`] using the server's error body.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
