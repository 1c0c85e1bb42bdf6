//! Domain primitives, aggregates, and lifecycle services.
//!
//! Purpose: define strongly typed recipe and user entities, the ownership
//! gate, and the services that orchestrate them through the [`ports`]. Types
//! are immutable once validated and document their invariants in Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - User / Recipe: persisted aggregates.
//! - RecipeLifecycleService / AccountService: driving port implementations.
//! - can_mutate / SUPERUSER_ID: the ownership gate.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod image;
pub mod ownership;
pub mod ports;
pub mod recipe;
pub mod recipe_service;
pub mod text;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    CredentialHash, LoginCredentials, LoginValidationError, NewUser, RegistrationDraft,
    RegistrationValidationError, UserAccount, ValidRegistration,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::image::{
    ALLOWED_IMAGE_EXTENSIONS, ImageExtension, ImageUpload, ImageValidationError, StoragePath,
    ValidatedImage, validate_image_name,
};
pub use self::ownership::{SUPERUSER_ID, can_mutate};
pub use self::recipe::{
    NewRecipe, Recipe, RecipeChanges, RecipeContent, RecipeDraft, RecipeId, RecipeTitle,
    RecipeValidationError,
};
pub use self::recipe_service::RecipeLifecycleService;
pub use self::text::{RecipeLines, normalize_lines};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Age, Email, PersonName, User, UserId, UserProfileFields, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use galleta::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
