use super::{RecipeStore, StoreError};
use crate::db::DbPool;
use crate::models::{NewRecipe, Recipe, RecipeChanges, RecipeDraft};
use crate::schema::{meal_recipes, recipes};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use tracing::span::EnteredSpan;

type PgPooled = PooledConnection<ConnectionManager<PgConnection>>;

/// [`RecipeStore`] backed by Postgres through a shared r2d2 pool.
pub struct PgRecipeStore {
    pool: DbPool,
}

impl PgRecipeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PgPooled, StoreError> {
        Ok(self.pool.get()?)
    }
}

/// One span per SQL round trip; `telemetry::DbQueryCountingLayer` counts these.
fn query_span(operation: &'static str) -> EnteredSpan {
    tracing::info_span!("db.query", db.operation = operation).entered()
}

impl RecipeStore for PgRecipeStore {
    fn insert(&self, draft: &RecipeDraft, owner_id: i32) -> Result<i32, StoreError> {
        let new_recipe = NewRecipe::from_draft(draft, owner_id);
        let mut conn = self.conn()?;

        let _span = query_span("insert_recipe");
        let recipe_id: i32 = diesel::insert_into(recipes::table)
            .values(&new_recipe)
            .returning(recipes::recipe_id)
            .get_result(&mut conn)?;

        tracing::debug!(recipe_id, owner_id, "inserted recipe");
        Ok(recipe_id)
    }

    fn list_all(&self) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.conn()?;

        let _span = query_span("list_recipes");
        let rows = recipes::table
            .select(Recipe::as_select())
            .order(recipes::recipe_id.asc())
            .load(&mut conn)?;
        Ok(rows)
    }

    fn list_by_owner(&self, owner_id: i32) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.conn()?;

        let _span = query_span("list_recipes_by_owner");
        let rows = recipes::table
            .filter(recipes::user_id.eq(owner_id))
            .select(Recipe::as_select())
            .order(recipes::recipe_id.asc())
            .load(&mut conn)?;
        Ok(rows)
    }

    fn get_by_id(&self, id: i32) -> Result<Option<Recipe>, StoreError> {
        let mut conn = self.conn()?;

        let _span = query_span("get_recipe");
        let recipe = recipes::table
            .find(id)
            .select(Recipe::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(recipe)
    }

    fn update(&self, id: i32, draft: &RecipeDraft) -> Result<Recipe, StoreError> {
        let changes = RecipeChanges::from_draft(draft);
        let mut conn = self.conn()?;

        // Write and confirmatory read share a transaction so a concurrent
        // writer cannot slip between them.
        conn.transaction::<_, StoreError, _>(|conn| {
            let updated = {
                let _span = query_span("update_recipe");
                diesel::update(recipes::table.find(id))
                    .set(&changes)
                    .execute(conn)?
            };

            if updated == 0 {
                return Err(StoreError::NotFound(id));
            }

            let _span = query_span("get_recipe");
            let recipe = recipes::table
                .find(id)
                .select(Recipe::as_select())
                .first(conn)?;
            Ok(recipe)
        })
    }

    fn list_by_meal(&self, meal_id: i32) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.conn()?;

        let in_meal = meal_recipes::table
            .filter(meal_recipes::meal_id.eq(meal_id))
            .select(meal_recipes::recipe_id);

        let _span = query_span("list_recipes_by_meal");
        let rows = recipes::table
            .filter(recipes::recipe_id.eq_any(in_meal))
            .select(Recipe::as_select())
            .order(recipes::recipe_id.asc())
            .load(&mut conn)?;
        Ok(rows)
    }
}
