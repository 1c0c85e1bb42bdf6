//! Mutex-backed `RecipeRepository`.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{RecipePersistenceError, RecipeRepository};
use crate::domain::{NewRecipe, Recipe, RecipeChanges, RecipeId, RecipeTitle, UserId};

#[derive(Debug, Default)]
struct State {
    next_id: i32,
    recipes: BTreeMap<RecipeId, Recipe>,
}

impl State {
    fn title_taken(&self, title: &RecipeTitle, except: Option<RecipeId>) -> bool {
        self.recipes
            .values()
            .any(|recipe| recipe.title() == title && Some(recipe.id()) != except)
    }

    /// Recipes passing `keep`, newest first.
    fn newest_first(&self, keep: impl Fn(&Recipe) -> bool) -> Vec<Recipe> {
        self.recipes
            .values()
            .rev()
            .filter(|recipe| keep(recipe))
            .cloned()
            .collect()
    }
}

/// In-memory recipe store.
#[derive(Debug, Default)]
pub struct MemoryRecipeRepository {
    state: Mutex<State>,
}

impl MemoryRecipeRepository {
    fn lock(&self) -> Result<MutexGuard<'_, State>, RecipePersistenceError> {
        self.state
            .lock()
            .map_err(|_| RecipePersistenceError::query("recipe store lock poisoned"))
    }
}

#[async_trait]
impl RecipeRepository for MemoryRecipeRepository {
    async fn create(&self, recipe: &NewRecipe) -> Result<RecipeId, RecipePersistenceError> {
        let mut state = self.lock()?;
        if state.title_taken(&recipe.content.title, None) {
            return Err(RecipePersistenceError::duplicate_title(
                recipe.content.title.as_ref(),
            ));
        }

        state.next_id += 1;
        let id = RecipeId::new(state.next_id)
            .map_err(|err| RecipePersistenceError::query(err.to_string()))?;
        state.recipes.insert(
            id,
            Recipe::new(
                id,
                recipe.content.clone(),
                Some(recipe.photo.clone()),
                recipe.owner,
            ),
        );
        Ok(id)
    }

    async fn title_exists(&self, title: &RecipeTitle) -> Result<bool, RecipePersistenceError> {
        Ok(self.lock()?.title_taken(title, None))
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipePersistenceError> {
        Ok(self.lock()?.recipes.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Recipe>, RecipePersistenceError> {
        Ok(self.lock()?.newest_first(|recipe| recipe.owner() == owner))
    }

    async fn search(&self, query: &str) -> Result<Vec<Recipe>, RecipePersistenceError> {
        Ok(self.lock()?.newest_first(|recipe| recipe.matches(query)))
    }

    async fn list_all(&self) -> Result<Vec<Recipe>, RecipePersistenceError> {
        Ok(self.lock()?.newest_first(|_| true))
    }

    async fn update(
        &self,
        id: RecipeId,
        changes: &RecipeChanges,
    ) -> Result<bool, RecipePersistenceError> {
        let mut state = self.lock()?;
        if state.title_taken(&changes.content.title, Some(id)) {
            return Err(RecipePersistenceError::duplicate_title(
                changes.content.title.as_ref(),
            ));
        }
        let Some(current) = state.recipes.get(&id) else {
            return Ok(false);
        };

        let photo = changes
            .photo
            .clone()
            .or_else(|| current.photo().cloned());
        let updated = Recipe::new(id, changes.content.clone(), photo, current.owner());
        state.recipes.insert(id, updated);
        Ok(true)
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, RecipePersistenceError> {
        Ok(self.lock()?.recipes.remove(&id).is_some())
    }
}
