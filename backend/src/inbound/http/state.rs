//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving ports,
//! so they can be exercised against in-memory adapters.

use std::sync::Arc;

use crate::domain::ports::{Accounts, RecipeLifecycle};

/// Driving ports available to HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn Accounts>,
    pub recipes: Arc<dyn RecipeLifecycle>,
}

impl HttpState {
    /// Bundle the account and recipe ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use galleta::domain::{AccountService, RecipeLifecycleService};
    /// use galleta::inbound::http::state::HttpState;
    /// use galleta::outbound::credentials::Argon2CredentialStore;
    /// use galleta::outbound::images::CapStdImageStore;
    /// use galleta::outbound::memory::{MemoryRecipeRepository, MemoryUserRepository};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let users = Arc::new(MemoryUserRepository::default());
    /// let images = Arc::new(CapStdImageStore::open("static/img/uploads")?);
    /// let state = HttpState::new(
    ///     Arc::new(AccountService::new(users.clone(), Arc::new(Argon2CredentialStore))),
    ///     Arc::new(RecipeLifecycleService::new(
    ///         Arc::new(MemoryRecipeRepository::default()),
    ///         users,
    ///         images,
    ///     )),
    /// );
    /// let _recipes = state.recipes.clone();
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(accounts: Arc<dyn Accounts>, recipes: Arc<dyn RecipeLifecycle>) -> Self {
        Self { accounts, recipes }
    }
}
