//! Wiring of driven adapters into the HTTP state.

use std::sync::Arc;

use tracing::info;

use galleta::domain::ports::{ImageStore, RecipeRepository, UserRepository};
use galleta::domain::{AccountService, RecipeLifecycleService};
use galleta::inbound::http::state::HttpState;
use galleta::outbound::credentials::Argon2CredentialStore;
use galleta::outbound::images::CapStdImageStore;
use galleta::outbound::memory::{MemoryRecipeRepository, MemoryUserRepository};
use galleta::outbound::persistence::{DieselRecipeRepository, DieselUserRepository};

use super::ServerConfig;

/// Assemble both lifecycle services over one set of repositories.
fn wire<R, U, I>(recipes: Arc<R>, users: Arc<U>, images: Arc<I>) -> HttpState
where
    R: RecipeRepository + 'static,
    U: UserRepository + 'static,
    I: ImageStore + 'static,
{
    let accounts = AccountService::new(Arc::clone(&users), Arc::new(Argon2CredentialStore));
    let lifecycle = RecipeLifecycleService::new(recipes, users, images);
    HttpState::new(Arc::new(accounts), Arc::new(lifecycle))
}

/// Build the HTTP state, backed by PostgreSQL when a pool is configured and
/// by process memory otherwise.
///
/// # Errors
/// Fails when the upload directory cannot be created or opened.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let images = Arc::new(CapStdImageStore::open(&config.upload_dir)?);
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            wire(
                Arc::new(DieselRecipeRepository::new(pool.clone())),
                Arc::new(DieselUserRepository::new(pool.clone())),
                images,
            )
        }
        None => {
            info!("no database configured; using in-memory repositories");
            wire(
                Arc::new(MemoryRecipeRepository::default()),
                Arc::new(MemoryUserRepository::default()),
                images,
            )
        }
    };
    Ok(state)
}
