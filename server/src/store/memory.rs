//! In-memory [`RecipeStore`] for handler tests.

use super::{RecipeStore, StoreError};
use crate::models::{NewRecipe, Recipe, RecipeChanges, RecipeDraft};
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Default)]
struct State {
    recipes: Vec<Recipe>,
    users: HashSet<i32>,
    meal_recipes: Vec<(i32, i32)>,
    next_id: i32,
}

/// Mirrors the Postgres store's behavior, including the owner foreign key.
/// `failing` makes every call return the given error.
#[derive(Default)]
pub struct MemoryRecipeStore {
    state: Mutex<State>,
    failing: Option<StoreError>,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: StoreError) -> Self {
        Self {
            failing: Some(error),
            ..Self::default()
        }
    }

    pub fn with_user(self, user_id: i32) -> Self {
        self.state.lock().unwrap().users.insert(user_id);
        self
    }

    pub fn link_meal(&self, meal_id: i32, recipe_id: i32) {
        self.state
            .lock()
            .unwrap()
            .meal_recipes
            .push((meal_id, recipe_id));
    }

    fn check(&self) -> Result<(), StoreError> {
        match &self.failing {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl RecipeStore for MemoryRecipeStore {
    fn insert(&self, draft: &RecipeDraft, owner_id: i32) -> Result<i32, StoreError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        if !state.users.contains(&owner_id) {
            return Err(StoreError::Integrity(format!(
                "user {owner_id} does not exist"
            )));
        }

        let row = NewRecipe::from_draft(draft, owner_id);
        state.next_id += 1;
        let id = state.next_id;
        state.recipes.push(Recipe {
            id,
            user_id: row.user_id,
            name: row.recipe_name.to_string(),
            image: row.recipe_image.to_string(),
            ingredients: row.recipe_ingredients.to_string(),
            instructions: row.instructions.to_string(),
        });
        Ok(id)
    }

    fn list_all(&self) -> Result<Vec<Recipe>, StoreError> {
        self.check()?;
        Ok(self.state.lock().unwrap().recipes.clone())
    }

    fn list_by_owner(&self, owner_id: i32) -> Result<Vec<Recipe>, StoreError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state
            .recipes
            .iter()
            .filter(|r| r.user_id == owner_id)
            .cloned()
            .collect())
    }

    fn get_by_id(&self, id: i32) -> Result<Option<Recipe>, StoreError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state.recipes.iter().find(|r| r.id == id).cloned())
    }

    fn update(&self, id: i32, draft: &RecipeDraft) -> Result<Recipe, StoreError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let recipe = state
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let changes = RecipeChanges::from_draft(draft);
        recipe.name = changes.recipe_name.to_string();
        recipe.image = changes.recipe_image.to_string();
        recipe.ingredients = changes.recipe_ingredients.to_string();
        recipe.instructions = changes.instructions.to_string();
        Ok(recipe.clone())
    }

    fn list_by_meal(&self, meal_id: i32) -> Result<Vec<Recipe>, StoreError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        let ids: HashSet<i32> = state
            .meal_recipes
            .iter()
            .filter(|(meal, _)| *meal == meal_id)
            .map(|(_, recipe)| *recipe)
            .collect();
        Ok(state
            .recipes
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect())
    }
}
