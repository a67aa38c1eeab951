use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored recipe, exactly as one row of `recipes`.
///
/// Every query that returns recipes selects `Recipe::as_select()`, so the
/// column list and the field mapping live in one place.
#[derive(Queryable, Selectable, Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[diesel(column_name = recipe_id)]
    pub id: i32,
    pub user_id: i32,
    #[diesel(column_name = recipe_name)]
    pub name: String,
    #[diesel(column_name = recipe_image)]
    pub image: String,
    /// Free-form ingredient text, stored as-is.
    #[diesel(column_name = recipe_ingredients)]
    pub ingredients: String,
    pub instructions: String,
}

/// The mutable content of a recipe, as supplied by a caller.
///
/// Used both for inserts and for full-field updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    pub instructions: String,
}

impl RecipeDraft {
    /// Image reference to persist; a missing image is stored as "".
    pub fn image_or_default(&self) -> &str {
        self.image.as_deref().unwrap_or("")
    }

    pub fn ingredients_or_default(&self) -> &str {
        self.ingredients.as_deref().unwrap_or("")
    }
}

#[derive(Insertable, Debug, PartialEq, Eq)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub user_id: i32,
    pub recipe_name: &'a str,
    pub recipe_image: &'a str,
    pub recipe_ingredients: &'a str,
    pub instructions: &'a str,
}

impl<'a> NewRecipe<'a> {
    /// Attach the owner and fill defaults before the row is written.
    pub fn from_draft(draft: &'a RecipeDraft, owner_id: i32) -> Self {
        Self {
            user_id: owner_id,
            recipe_name: &draft.name,
            recipe_image: draft.image_or_default(),
            recipe_ingredients: draft.ingredients_or_default(),
            instructions: &draft.instructions,
        }
    }
}

/// Full replacement of a recipe's mutable columns. Owner and id never change.
#[derive(AsChangeset, Debug, PartialEq, Eq)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipeChanges<'a> {
    pub recipe_name: &'a str,
    pub recipe_image: &'a str,
    pub recipe_ingredients: &'a str,
    pub instructions: &'a str,
}

impl<'a> RecipeChanges<'a> {
    pub fn from_draft(draft: &'a RecipeDraft) -> Self {
        Self {
            recipe_name: &draft.name,
            recipe_image: draft.image_or_default(),
            recipe_ingredients: draft.ingredients_or_default(),
            instructions: &draft.instructions,
        }
    }
}
