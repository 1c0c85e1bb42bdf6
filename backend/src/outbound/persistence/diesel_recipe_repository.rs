//! PostgreSQL-backed `RecipeRepository` implementation using Diesel ORM.
//!
//! Listings order by `id DESC` so the newest recipe comes first. Search uses
//! `LIKE` with escaped wildcards, which is case-sensitive in PostgreSQL.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecipePersistenceError, RecipeRepository};
use crate::domain::{
    NewRecipe, Recipe, RecipeChanges, RecipeContent, RecipeId, RecipeLines, RecipeTitle,
    StoragePath, UserId,
};

use super::diesel_error_mapping::{
    DieselFailure, classify_diesel_error, contains_pattern, pool_error_message,
};
use super::models::{NewRecipeRow, RecipeRow, RecipeUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::recipes;

/// Diesel-backed implementation of the recipe repository port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipePersistenceError {
    RecipePersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(
    error: diesel::result::Error,
    operation: &str,
    title: Option<&RecipeTitle>,
) -> RecipePersistenceError {
    match classify_diesel_error(error, operation) {
        DieselFailure::UniqueViolation { .. } => match title {
            Some(title) => RecipePersistenceError::duplicate_title(title.as_ref()),
            None => RecipePersistenceError::query("unique constraint violated"),
        },
        DieselFailure::Connection(message) => RecipePersistenceError::connection(message),
        DieselFailure::Query(message) => RecipePersistenceError::query(message),
    }
}

/// Convert a stored row into a recipe. Stored text is already normalised.
fn row_to_recipe(row: RecipeRow) -> Result<Recipe, RecipePersistenceError> {
    let RecipeRow {
        id,
        title,
        ingredients,
        steps,
        photo,
        about,
        user_id,
    } = row;
    let corrupt = |detail: String| {
        RecipePersistenceError::query(format!("stored recipe {id} is invalid: {detail}"))
    };

    let recipe_id = RecipeId::new(id).map_err(|err| corrupt(err.to_string()))?;
    let owner = UserId::new(user_id).map_err(|err| corrupt(err.to_string()))?;
    let content = RecipeContent {
        title: RecipeTitle::new(title).map_err(|err| corrupt(err.to_string()))?,
        ingredients: RecipeLines::parse(&ingredients),
        steps: RecipeLines::parse(&steps),
        about,
    };

    Ok(Recipe::new(recipe_id, content, photo.map(StoragePath::new), owner))
}

fn rows_to_recipes(rows: Vec<RecipeRow>) -> Result<Vec<Recipe>, RecipePersistenceError> {
    rows.into_iter().map(row_to_recipe).collect()
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn create(&self, recipe: &NewRecipe) -> Result<RecipeId, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let content = &recipe.content;

        let row = NewRecipeRow {
            title: content.title.as_ref(),
            ingredients: content.ingredients.to_text(),
            steps: content.steps.to_text(),
            photo: recipe.photo.as_str(),
            about: content.about.as_deref(),
            user_id: recipe.owner.get(),
        };

        let id: i32 = diesel::insert_into(recipes::table)
            .values(&row)
            .returning(recipes::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "insert recipe", Some(&content.title)))?;

        RecipeId::new(id).map_err(|err| RecipePersistenceError::query(err.to_string()))
    }

    async fn title_exists(&self, title: &RecipeTitle) -> Result<bool, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            recipes::table.filter(recipes::title.eq(title.as_ref())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, "check recipe title", None))
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = recipes::table
            .find(id.get())
            .select(RecipeRow::as_select())
            .first::<RecipeRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find recipe", None))?;

        row.map(row_to_recipe).transpose()
    }

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::user_id.eq(owner.get()))
            .order(recipes::id.desc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list recipes by owner", None))?;

        rows_to_recipes(rows)
    }

    async fn search(&self, query: &str) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = contains_pattern(query);

        let rows: Vec<RecipeRow> = recipes::table
            .filter(
                recipes::title
                    .like(pattern.clone())
                    .or(recipes::about.like(pattern)),
            )
            .order(recipes::id.desc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "search recipes", None))?;

        rows_to_recipes(rows)
    }

    async fn list_all(&self) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecipeRow> = recipes::table
            .order(recipes::id.desc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list recipes", None))?;

        rows_to_recipes(rows)
    }

    async fn update(
        &self,
        id: RecipeId,
        changes: &RecipeChanges,
    ) -> Result<bool, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let content = &changes.content;

        let update = RecipeUpdate {
            title: content.title.as_ref(),
            ingredients: content.ingredients.to_text(),
            steps: content.steps.to_text(),
            photo: changes.photo.as_ref().map(StoragePath::as_str),
            about: Some(content.about.as_deref()),
        };

        let affected = diesel::update(recipes::table.find(id.get()))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "update recipe", Some(&content.title)))?;

        Ok(affected > 0)
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(recipes::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "delete recipe", None))?;

        Ok(affected > 0)
    }
}
