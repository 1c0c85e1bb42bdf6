//! Authentication primitives: login credentials, registration drafts, and
//! stored credential hashes.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{Age, Email, PersonName, User, UserProfileFields, UserValidationError};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by the account service.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use galleta::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada@example.com ", "secret").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string used for the account lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Salted one-way password hash in PHC string format.
///
/// Never holds plaintext. Produced by a
/// [`CredentialStore`](crate::domain::ports::CredentialStore) and persisted
/// verbatim.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Wrap a stored PHC string. No parsing happens here; malformed values
    /// simply never verify.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// PHC string as stored.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialHash(..)")
    }
}

/// Raw registration form contents, before any validation.
#[derive(Debug, Clone)]
pub struct RegistrationDraft {
    pub email: String,
    pub password: Zeroizing<String>,
    pub password_again: Zeroizing<String>,
    pub surname: String,
    pub name: String,
    pub age: i32,
}

/// Reasons a registration draft is rejected before touching storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// A profile field failed validation.
    #[error(transparent)]
    Field(#[from] UserValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// The repeated password differs from the first entry.
    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Registration draft whose fields passed validation and whose passwords
/// match.
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    fields: UserProfileFields,
    password: Zeroizing<String>,
}

impl ValidRegistration {
    /// Validate a draft. Field checks run first, then the password
    /// confirmation check.
    ///
    /// # Examples
    /// ```
    /// use galleta::domain::{RegistrationDraft, RegistrationValidationError, ValidRegistration};
    /// use zeroize::Zeroizing;
    ///
    /// let draft = RegistrationDraft {
    ///     email: "ada@example.com".into(),
    ///     password: Zeroizing::new("secret".into()),
    ///     password_again: Zeroizing::new("secrett".into()),
    ///     surname: "Lovelace".into(),
    ///     name: "Ada".into(),
    ///     age: 36,
    /// };
    /// let err = ValidRegistration::try_from_draft(draft).unwrap_err();
    /// assert_eq!(err, RegistrationValidationError::PasswordMismatch);
    /// ```
    pub fn try_from_draft(draft: RegistrationDraft) -> Result<Self, RegistrationValidationError> {
        let RegistrationDraft {
            email,
            password,
            password_again,
            surname,
            name,
            age,
        } = draft;

        let fields = UserProfileFields {
            email: Email::new(email)?,
            surname: PersonName::new(surname, "surname")?,
            name: PersonName::new(name, "name")?,
            age: Age::new(age)?,
        };
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        if password.as_str() != password_again.as_str() {
            return Err(RegistrationValidationError::PasswordMismatch);
        }

        Ok(Self { fields, password })
    }

    /// Validated profile fields.
    pub fn fields(&self) -> &UserProfileFields {
        &self.fields
    }

    /// Plaintext password to hash.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Give up the profile fields once the password has been hashed.
    pub fn into_fields(self) -> UserProfileFields {
        self.fields
    }
}

/// Stored user together with their credential hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub user: User,
    pub credential: CredentialHash,
}

/// User row awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub fields: UserProfileFields,
    pub credential: CredentialHash,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn draft(password: &str, password_again: &str) -> RegistrationDraft {
        RegistrationDraft {
            email: "ada@example.com".into(),
            password: Zeroizing::new(password.into()),
            password_again: Zeroizing::new(password_again.into()),
            surname: "Lovelace".into(),
            name: "Ada".into(),
            age: 36,
        }
    }

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("ada@example.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn mismatched_passwords_are_rejected() {
        let err = ValidRegistration::try_from_draft(draft("secret", "secrett"))
            .expect_err("mismatch must fail");
        assert_eq!(err, RegistrationValidationError::PasswordMismatch);
    }

    #[rstest]
    fn field_errors_take_precedence_over_password_mismatch() {
        let mut invalid = draft("secret", "other");
        invalid.age = 0;
        let err = ValidRegistration::try_from_draft(invalid).expect_err("age must fail");
        assert_eq!(
            err,
            RegistrationValidationError::Field(UserValidationError::InvalidAge)
        );
    }

    #[rstest]
    fn matching_passwords_validate() {
        let valid = ValidRegistration::try_from_draft(draft("secret", "secret"))
            .expect("valid registration");
        assert_eq!(valid.password(), "secret");
        assert_eq!(valid.fields().email.as_ref(), "ada@example.com");
    }

    #[rstest]
    fn credential_hash_debug_hides_contents() {
        let hash = CredentialHash::from_phc("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA");
        assert_eq!(format!("{hash:?}"), "CredentialHash(..)");
    }
}
