//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use tempfile::TempDir;

use crate::domain::ports::{CredentialStore, CredentialStoreError};
use crate::domain::{AccountService, CredentialHash, RecipeLifecycleService};
use crate::inbound::http::state::HttpState;
use crate::outbound::images::CapStdImageStore;
use crate::outbound::memory::{MemoryRecipeRepository, MemoryUserRepository};

/// Session middleware with a fresh key and the `Secure` flag off for plain
/// HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Reversible stand-in for Argon2 so handler tests stay fast.
#[derive(Debug, Default)]
pub struct PlainCredentialStore;

impl CredentialStore for PlainCredentialStore {
    fn hash(&self, password: &str) -> Result<CredentialHash, CredentialStoreError> {
        Ok(CredentialHash::from_phc(format!("plain${password}")))
    }

    fn verify(&self, password: &str, hash: &CredentialHash) -> bool {
        hash.as_str().strip_prefix("plain$") == Some(password)
    }
}

/// In-memory wiring for handler tests. The upload directory lives as long as
/// this value does.
pub struct TestBackend {
    pub state: HttpState,
    pub uploads: TempDir,
}

impl TestBackend {
    pub fn new() -> Self {
        let uploads = tempfile::tempdir().expect("create upload dir");
        let images = Arc::new(CapStdImageStore::open(uploads.path()).expect("open upload dir"));
        let users = Arc::new(MemoryUserRepository::default());
        let recipes = Arc::new(MemoryRecipeRepository::default());
        let state = HttpState::new(
            Arc::new(AccountService::new(users.clone(), Arc::new(PlainCredentialStore))),
            Arc::new(RecipeLifecycleService::new(recipes, users, images)),
        );
        Self { state, uploads }
    }
}

/// Extract the `session` cookie a response set.
pub fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}
