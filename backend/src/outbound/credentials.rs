//! Argon2id credential store.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::domain::CredentialHash;
use crate::domain::ports::{CredentialStore, CredentialStoreError};

/// Hashes passwords with Argon2id using the crate's default parameters and a
/// fresh random salt per call. Hashes are PHC strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2CredentialStore;

impl CredentialStore for Argon2CredentialStore {
    fn hash(&self, password: &str) -> Result<CredentialHash, CredentialStoreError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| CredentialStoreError::hashing(err.to_string()))?;
        Ok(CredentialHash::from_phc(hash.to_string()))
    }

    fn verify(&self, password: &str, hash: &CredentialHash) -> bool {
        let Ok(parsed) = PasswordHash::new(hash.as_str()) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
