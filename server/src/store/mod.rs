//! Recipe persistence.
//!
//! Handlers talk to a [`RecipeStore`]; production uses [`PgRecipeStore`],
//! handler tests use an in-memory fake.

mod error;
#[cfg(test)]
pub mod memory;
mod pg;

pub use error::StoreError;
pub use pg::PgRecipeStore;

use crate::models::{Recipe, RecipeDraft};

/// Data access for recipes.
///
/// Implementations hold no per-request state. Each call is an independent
/// round trip except `update`, which writes and re-reads in one transaction.
pub trait RecipeStore: Send + Sync {
    /// Insert a recipe owned by `owner_id` and return its new identifier.
    ///
    /// A missing image or ingredient text is stored as "".
    fn insert(&self, draft: &RecipeDraft, owner_id: i32) -> Result<i32, StoreError>;

    /// Every recipe, in identifier order.
    fn list_all(&self) -> Result<Vec<Recipe>, StoreError>;

    /// Recipes owned by `owner_id`. Empty when the owner has none.
    fn list_by_owner(&self, owner_id: i32) -> Result<Vec<Recipe>, StoreError>;

    /// The recipe with identifier `id`, or `None`.
    fn get_by_id(&self, id: i32) -> Result<Option<Recipe>, StoreError>;

    /// Replace name, image, ingredients and instructions of recipe `id` and
    /// return the stored result. Fails with [`StoreError::NotFound`] when no
    /// recipe has that identifier.
    fn update(&self, id: i32, draft: &RecipeDraft) -> Result<Recipe, StoreError>;

    /// Recipes linked to `meal_id` through `meal_recipes`.
    fn list_by_meal(&self, meal_id: i32) -> Result<Vec<Recipe>, StoreError>;
}
