//! Recipe lifecycle service.
//!
//! Implements the [`RecipeLifecycle`] driving port on top of the recipe, user,
//! and image ports. Every mutation authorises the actor through
//! [`can_mutate`] before touching storage, normalises text, and stores the
//! photo only once all checks have passed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    ImageStore, ImageStoreError, RecipeError, RecipeLifecycle, RecipeListing,
    RecipePersistenceError, RecipeRepository, UserPersistenceError, UserProfile, UserRepository,
};
use crate::domain::{
    ImageUpload, ImageValidationError, NewRecipe, Recipe, RecipeChanges, RecipeContent,
    RecipeDraft, RecipeId, StoragePath, UserId, ValidatedImage, can_mutate,
};

fn map_recipe_store_error(error: RecipePersistenceError) -> RecipeError {
    match error {
        RecipePersistenceError::DuplicateTitle { title } => RecipeError::DuplicateTitle { title },
        RecipePersistenceError::Connection { message } => RecipeError::Unavailable { message },
        RecipePersistenceError::Query { message } => RecipeError::Internal { message },
    }
}

fn map_user_store_error(error: UserPersistenceError) -> RecipeError {
    match error {
        UserPersistenceError::Connection { message } => RecipeError::Unavailable { message },
        other => RecipeError::Internal {
            message: other.to_string(),
        },
    }
}

fn map_image_store_error(error: ImageStoreError) -> RecipeError {
    RecipeError::Internal {
        message: error.to_string(),
    }
}

/// Validate an attached photo. A missing photo or an empty filename is
/// reported separately from a refused one.
fn validate_photo(photo: Option<ImageUpload>) -> Result<ValidatedImage, RecipeError> {
    let upload = photo.ok_or(RecipeError::MissingImageName)?;
    ValidatedImage::try_from_upload(upload).map_err(|err| match err {
        ImageValidationError::EmptyName => RecipeError::MissingImageName,
        other => RecipeError::InvalidImage(other),
    })
}

/// Recipe service implementing the lifecycle driving port.
#[derive(Clone)]
pub struct RecipeLifecycleService<R, U, I> {
    recipes: Arc<R>,
    users: Arc<U>,
    images: Arc<I>,
}

impl<R, U, I> RecipeLifecycleService<R, U, I> {
    /// Create a service over the recipe, user, and image ports.
    pub fn new(recipes: Arc<R>, users: Arc<U>, images: Arc<I>) -> Self {
        Self {
            recipes,
            users,
            images,
        }
    }
}

impl<R, U, I> RecipeLifecycleService<R, U, I>
where
    R: RecipeRepository,
    I: ImageStore,
{
    /// Load a recipe the actor may change. Missing and forbidden recipes are
    /// indistinguishable to the caller.
    async fn load_mutable(&self, actor: UserId, id: RecipeId) -> Result<Recipe, RecipeError> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await
            .map_err(map_recipe_store_error)?
            .ok_or(RecipeError::NotFound)?;

        if !can_mutate(actor, &recipe) {
            debug!(
                recipe_id = %id,
                actor = %actor,
                owner = %recipe.owner(),
                "ownership check denied recipe mutation"
            );
            return Err(RecipeError::NotFound);
        }
        Ok(recipe)
    }

    async fn store_photo(&self, image: &ValidatedImage) -> Result<StoragePath, RecipeError> {
        let path = self
            .images
            .store(image)
            .await
            .map_err(map_image_store_error)?;
        info!(path = %path, "stored recipe photo");
        Ok(path)
    }
}

#[async_trait]
impl<R, U, I> RecipeLifecycle for RecipeLifecycleService<R, U, I>
where
    R: RecipeRepository,
    U: UserRepository,
    I: ImageStore,
{
    async fn create_recipe(
        &self,
        actor: UserId,
        draft: RecipeDraft,
        photo: Option<ImageUpload>,
    ) -> Result<RecipeId, RecipeError> {
        let content = RecipeContent::try_from_draft(draft).map_err(RecipeError::InvalidRecipe)?;

        if self
            .recipes
            .title_exists(&content.title)
            .await
            .map_err(map_recipe_store_error)?
        {
            return Err(RecipeError::DuplicateTitle {
                title: content.title.to_string(),
            });
        }

        let image = validate_photo(photo)?;
        let photo = self.store_photo(&image).await?;

        let id = self
            .recipes
            .create(&NewRecipe {
                content,
                photo,
                owner: actor,
            })
            .await
            .map_err(map_recipe_store_error)?;
        info!(recipe_id = %id, owner = %actor, "recipe created");
        Ok(id)
    }

    async fn edit_recipe(
        &self,
        actor: UserId,
        id: RecipeId,
        draft: RecipeDraft,
        photo: Option<ImageUpload>,
    ) -> Result<(), RecipeError> {
        let current = self.load_mutable(actor, id).await?;
        let content = RecipeContent::try_from_draft(draft).map_err(RecipeError::InvalidRecipe)?;

        if content.title != *current.title()
            && self
                .recipes
                .title_exists(&content.title)
                .await
                .map_err(map_recipe_store_error)?
        {
            return Err(RecipeError::DuplicateTitle {
                title: content.title.to_string(),
            });
        }

        let photo = match photo {
            Some(upload) => {
                let image = validate_photo(Some(upload))?;
                Some(self.store_photo(&image).await?)
            }
            None => None,
        };

        let updated = self
            .recipes
            .update(id, &RecipeChanges { content, photo })
            .await
            .map_err(map_recipe_store_error)?;
        if !updated {
            return Err(RecipeError::NotFound);
        }
        info!(recipe_id = %id, actor = %actor, "recipe updated");
        Ok(())
    }

    async fn delete_recipe(&self, actor: UserId, id: RecipeId) -> Result<(), RecipeError> {
        self.load_mutable(actor, id).await?;

        let deleted = self
            .recipes
            .delete(id)
            .await
            .map_err(map_recipe_store_error)?;
        if !deleted {
            return Err(RecipeError::NotFound);
        }
        info!(recipe_id = %id, actor = %actor, "recipe deleted");
        Ok(())
    }

    async fn browse(&self, query: Option<String>) -> Result<RecipeListing, RecipeError> {
        let query = query.filter(|text| !text.trim().is_empty());
        let recipes = match query.as_deref() {
            Some(text) => self.recipes.search(text).await,
            None => self.recipes.list_all().await,
        }
        .map_err(map_recipe_store_error)?;

        Ok(RecipeListing { query, recipes })
    }

    async fn recipe_detail(&self, viewer: UserId, id: RecipeId) -> Result<Recipe, RecipeError> {
        debug!(recipe_id = %id, viewer = %viewer, "recipe detail requested");
        self.recipes
            .find_by_id(id)
            .await
            .map_err(map_recipe_store_error)?
            .ok_or(RecipeError::NotFound)
    }

    async fn user_profile(
        &self,
        viewer: UserId,
        user_id: UserId,
    ) -> Result<UserProfile, RecipeError> {
        debug!(user_id = %user_id, viewer = %viewer, "user profile requested");
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_store_error)?
            .ok_or(RecipeError::UserNotFound)?;
        let recipes = self
            .recipes
            .find_by_owner(user_id)
            .await
            .map_err(map_recipe_store_error)?;

        Ok(UserProfile { user, recipes })
    }
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;
