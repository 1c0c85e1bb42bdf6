//! Driving port for registration and login.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{Error, LoginCredentials, RegistrationDraft, UserId};

/// Failures reported by account operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    /// A registration field was blank or out of range.
    #[error("invalid registration: {message}")]
    InvalidRegistration { message: String },
    /// The two password entries differ.
    #[error("passwords do not match")]
    PasswordMismatch,
    /// The email already belongs to an account.
    #[error("an account already exists for {email}")]
    DuplicateEmail { email: String },
    /// Unknown email or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// A backing store could not be reached.
    #[error("account storage is unavailable: {message}")]
    Unavailable { message: String },
    /// A backing store or the hasher failed.
    #[error("account storage failed: {message}")]
    Internal { message: String },
}

impl AccountError {
    /// Stable snake_case label for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRegistration { .. } => "invalid_registration",
            Self::PasswordMismatch => "password_mismatch",
            Self::DuplicateEmail { .. } => "duplicate_email",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Unavailable { .. } => "unavailable",
            Self::Internal { .. } => "internal",
        }
    }
}

impl From<AccountError> for Error {
    fn from(err: AccountError) -> Self {
        let message = err.to_string();
        let mapped = match &err {
            AccountError::InvalidRegistration { .. } | AccountError::PasswordMismatch => {
                Error::invalid_request(message)
            }
            AccountError::DuplicateEmail { .. } => Error::conflict(message),
            AccountError::InvalidCredentials => Error::unauthorized(message),
            AccountError::Unavailable { .. } => Error::service_unavailable(message),
            AccountError::Internal { .. } => Error::internal(message),
        };
        mapped.with_details(json!({ "code": err.kind() }))
    }
}

/// Domain use-case port for account management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Accounts: Send + Sync {
    /// Create an account and return its identifier.
    async fn register_user(&self, draft: RegistrationDraft) -> Result<UserId, AccountError>;

    /// Validate credentials and return the authenticated user id.
    async fn login(&self, credentials: &LoginCredentials) -> Result<UserId, AccountError>;
}
