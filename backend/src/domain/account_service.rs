//! Account registration and login service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountError, Accounts, CredentialStore, UserPersistenceError, UserRepository,
};
use crate::domain::{
    CredentialHash, Email, LoginCredentials, NewUser, RegistrationDraft,
    RegistrationValidationError, UserId, ValidRegistration,
};

fn map_user_store_error(error: UserPersistenceError) -> AccountError {
    match error {
        UserPersistenceError::DuplicateEmail { email } => AccountError::DuplicateEmail { email },
        UserPersistenceError::Connection { message } => AccountError::Unavailable { message },
        UserPersistenceError::Query { message } => AccountError::Internal { message },
    }
}

fn map_validation_error(error: RegistrationValidationError) -> AccountError {
    match error {
        RegistrationValidationError::PasswordMismatch => AccountError::PasswordMismatch,
        other => AccountError::InvalidRegistration {
            message: other.to_string(),
        },
    }
}

/// Account service implementing the [`Accounts`] driving port.
#[derive(Clone)]
pub struct AccountService<U, C> {
    users: Arc<U>,
    credentials: Arc<C>,
}

impl<U, C> AccountService<U, C> {
    /// Create a service over the user repository and credential store.
    pub fn new(users: Arc<U>, credentials: Arc<C>) -> Self {
        Self { users, credentials }
    }
}

impl<U, C> AccountService<U, C>
where
    C: CredentialStore + 'static,
{
    /// Hash on the blocking pool; Argon2 is deliberately slow.
    async fn hash_password(
        &self,
        password: Zeroizing<String>,
    ) -> Result<CredentialHash, AccountError> {
        let store = Arc::clone(&self.credentials);
        tokio::task::spawn_blocking(move || store.hash(password.as_str()))
            .await
            .map_err(|err| AccountError::Internal {
                message: format!("password hashing task failed: {err}"),
            })?
            .map_err(|err| AccountError::Internal {
                message: err.to_string(),
            })
    }

    async fn verify_password(
        &self,
        password: Zeroizing<String>,
        hash: CredentialHash,
    ) -> Result<bool, AccountError> {
        let store = Arc::clone(&self.credentials);
        tokio::task::spawn_blocking(move || store.verify(password.as_str(), &hash))
            .await
            .map_err(|err| AccountError::Internal {
                message: format!("password verification task failed: {err}"),
            })
    }
}

#[async_trait]
impl<U, C> Accounts for AccountService<U, C>
where
    U: UserRepository,
    C: CredentialStore + 'static,
{
    async fn register_user(&self, draft: RegistrationDraft) -> Result<UserId, AccountError> {
        let registration = ValidRegistration::try_from_draft(draft).map_err(map_validation_error)?;

        let email = &registration.fields().email;
        if self
            .users
            .find_account_by_email(email)
            .await
            .map_err(map_user_store_error)?
            .is_some()
        {
            return Err(AccountError::DuplicateEmail {
                email: email.to_string(),
            });
        }

        let credential = self
            .hash_password(Zeroizing::new(registration.password().to_owned()))
            .await?;
        let id = self
            .users
            .create(&NewUser {
                fields: registration.into_fields(),
                credential,
            })
            .await
            .map_err(map_user_store_error)?;

        info!(user_id = %id, "user registered");
        Ok(id)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<UserId, AccountError> {
        let Ok(email) = Email::new(credentials.email()) else {
            debug!("login rejected: malformed email");
            return Err(AccountError::InvalidCredentials);
        };

        let Some(account) = self
            .users
            .find_account_by_email(&email)
            .await
            .map_err(map_user_store_error)?
        else {
            debug!("login rejected: unknown email");
            return Err(AccountError::InvalidCredentials);
        };

        let verified = self
            .verify_password(
                Zeroizing::new(credentials.password().to_owned()),
                account.credential,
            )
            .await?;
        if !verified {
            debug!(user_id = %account.user.id(), "login rejected: wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        Ok(account.user.id())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
