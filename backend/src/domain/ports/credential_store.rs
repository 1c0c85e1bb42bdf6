//! Port for one-way password hashing.

use crate::domain::CredentialHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised while producing a credential hash.
    pub enum CredentialStoreError {
        /// The hasher rejected its parameters or could not draw a salt.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Hashes and verifies user passwords.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// Produce a salted hash of `password`.
    fn hash(&self, password: &str) -> Result<CredentialHash, CredentialStoreError>;

    /// Check `password` against `hash`. Malformed hashes never verify.
    fn verify(&self, password: &str, hash: &CredentialHash) -> bool;
}
