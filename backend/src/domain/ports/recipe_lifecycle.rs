//! Driving port for the recipe lifecycle: create, edit, delete, browse, and
//! the authenticated detail/profile reads.
//!
//! Inbound adapters pass the acting user explicitly on every call; the port
//! never reads ambient session state.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, ImageUpload, ImageValidationError, Recipe, RecipeDraft, RecipeId,
    RecipeValidationError, User, UserId,
};

/// Failures reported by recipe lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeError {
    /// Another recipe already uses the title.
    #[error("a recipe titled `{title}` already exists")]
    DuplicateTitle { title: String },
    /// No photo was attached, or its filename was empty.
    #[error("a photo with a filename is required")]
    MissingImageName,
    /// The photo filename was refused.
    #[error("invalid photo: {0}")]
    InvalidImage(ImageValidationError),
    /// The recipe text failed validation.
    #[error("invalid recipe: {0}")]
    InvalidRecipe(RecipeValidationError),
    /// The recipe does not exist or the actor may not change it.
    #[error("recipe not found")]
    NotFound,
    /// The requested user does not exist.
    #[error("user not found")]
    UserNotFound,
    /// A backing store could not be reached.
    #[error("recipe storage is unavailable: {message}")]
    Unavailable { message: String },
    /// A backing store failed while handling the request.
    #[error("recipe storage failed: {message}")]
    Internal { message: String },
}

impl RecipeError {
    /// Stable snake_case label for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateTitle { .. } => "duplicate_title",
            Self::MissingImageName => "missing_image_name",
            Self::InvalidImage(_) => "invalid_image",
            Self::InvalidRecipe(_) => "invalid_recipe",
            Self::NotFound => "not_found",
            Self::UserNotFound => "user_not_found",
            Self::Unavailable { .. } => "unavailable",
            Self::Internal { .. } => "internal",
        }
    }
}

impl From<RecipeError> for Error {
    fn from(err: RecipeError) -> Self {
        let message = err.to_string();
        let mapped = match &err {
            RecipeError::DuplicateTitle { .. } => Error::conflict(message),
            RecipeError::MissingImageName
            | RecipeError::InvalidImage(_)
            | RecipeError::InvalidRecipe(_) => Error::invalid_request(message),
            RecipeError::NotFound | RecipeError::UserNotFound => Error::not_found(message),
            RecipeError::Unavailable { .. } => Error::service_unavailable(message),
            RecipeError::Internal { .. } => Error::internal(message),
        };
        mapped.with_details(json!({ "code": err.kind() }))
    }
}

/// Result of browsing the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeListing {
    /// Search text that was applied, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Matching recipes, newest first.
    pub recipes: Vec<Recipe>,
}

impl RecipeListing {
    /// True when a search ran and matched nothing.
    pub fn nothing_found(&self) -> bool {
        self.query.is_some() && self.recipes.is_empty()
    }
}

/// A user and the recipes they own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user: User,
    /// Owned recipes, newest first.
    pub recipes: Vec<Recipe>,
}

/// Domain use-case port for recipe management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeLifecycle: Send + Sync {
    /// Publish a recipe owned by `actor`.
    async fn create_recipe(
        &self,
        actor: UserId,
        draft: RecipeDraft,
        photo: Option<ImageUpload>,
    ) -> Result<RecipeId, RecipeError>;

    /// Replace a recipe's fields. A `None` photo keeps the current one.
    async fn edit_recipe(
        &self,
        actor: UserId,
        id: RecipeId,
        draft: RecipeDraft,
        photo: Option<ImageUpload>,
    ) -> Result<(), RecipeError>;

    /// Permanently remove a recipe.
    async fn delete_recipe(&self, actor: UserId, id: RecipeId) -> Result<(), RecipeError>;

    /// List every recipe, or those matching `query` when it is non-blank.
    async fn browse(&self, query: Option<String>) -> Result<RecipeListing, RecipeError>;

    /// Read one recipe.
    async fn recipe_detail(&self, viewer: UserId, id: RecipeId) -> Result<Recipe, RecipeError>;

    /// Read a user and their recipes.
    async fn user_profile(
        &self,
        viewer: UserId,
        user_id: UserId,
    ) -> Result<UserProfile, RecipeError>;
}
