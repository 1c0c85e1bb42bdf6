//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts;
mod credential_store;
mod image_store;
mod recipe_lifecycle;
mod recipe_repository;
mod user_repository;

#[cfg(test)]
pub use accounts::MockAccounts;
pub use accounts::{AccountError, Accounts};
#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::{CredentialStore, CredentialStoreError};
#[cfg(test)]
pub use image_store::MockImageStore;
pub use image_store::{ImageStore, ImageStoreError};
#[cfg(test)]
pub use recipe_lifecycle::MockRecipeLifecycle;
pub use recipe_lifecycle::{RecipeError, RecipeLifecycle, RecipeListing, UserProfile};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipePersistenceError, RecipeRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
