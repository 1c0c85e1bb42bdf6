//! Port for recipe persistence and search.

use async_trait::async_trait;

use crate::domain::{NewRecipe, Recipe, RecipeChanges, RecipeId, RecipeTitle, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipePersistenceError {
        /// Another recipe already uses the title.
        DuplicateTitle { title: String } => "recipe title already exists: {title}",
        /// Repository connection could not be established.
        Connection { message: String } => "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "recipe repository query failed: {message}",
    }
}

/// Port for recipe CRUD and listing.
///
/// Mutations are unconditional; callers decide who may perform them.
/// Every listing is ordered newest first (descending id).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Insert a recipe and return its new identifier.
    async fn create(&self, recipe: &NewRecipe) -> Result<RecipeId, RecipePersistenceError>;

    /// Whether any recipe already uses `title` (exact match).
    async fn title_exists(&self, title: &RecipeTitle) -> Result<bool, RecipePersistenceError>;

    /// Fetch a recipe by identifier.
    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipePersistenceError>;

    /// Recipes owned by `owner`.
    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Recipe>, RecipePersistenceError>;

    /// Recipes whose title or description contains `query`
    /// (case-sensitive substring).
    async fn search(&self, query: &str) -> Result<Vec<Recipe>, RecipePersistenceError>;

    /// Every recipe.
    async fn list_all(&self) -> Result<Vec<Recipe>, RecipePersistenceError>;

    /// Replace the editable fields of a recipe. Returns `false` when no row
    /// matched `id`.
    async fn update(
        &self,
        id: RecipeId,
        changes: &RecipeChanges,
    ) -> Result<bool, RecipePersistenceError>;

    /// Remove a recipe permanently. Returns `false` when no row matched `id`.
    async fn delete(&self, id: RecipeId) -> Result<bool, RecipePersistenceError>;
}
