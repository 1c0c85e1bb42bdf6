//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must be a positive integer")]
    InvalidId,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must contain an @ sign")]
    InvalidEmail,
    #[error("{field} must not be empty")]
    EmptyName { field: &'static str },
    #[error("age must be a positive integer")]
    InvalidAge,
}

/// Stable numeric user identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UserId(i32);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use galleta::domain::UserId;
    ///
    /// assert!(UserId::new(7).is_ok());
    /// assert!(UserId::new(0).is_err());
    /// ```
    pub fn new(id: i32) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Wrap an identifier already known to be valid (store-assigned or
    /// reserved constants).
    pub(crate) const fn from_trusted(id: i32) -> Self {
        Self(id)
    }

    /// Raw integer value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i32 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Login/contact email. Compared case-sensitively, exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`]; surrounding whitespace is trimmed.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !trimmed.contains('@') {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Given name or surname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Validate a name, naming `field` in the error when it is blank.
    pub fn new(value: impl AsRef<str>, field: &'static str) -> Result<Self, UserValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName { field });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Age in whole years; always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age(i32);

impl Age {
    /// Validate and construct an [`Age`].
    pub fn new(years: i32) -> Result<Self, UserValidationError> {
        if years <= 0 {
            return Err(UserValidationError::InvalidAge);
        }
        Ok(Self(years))
    }

    /// Raw number of years.
    pub fn get(self) -> i32 {
        self.0
    }
}

/// Registered application user.
///
/// The password credential is deliberately absent; it only travels inside
/// [`crate::domain::UserAccount`] between the user repository and the
/// account service.
///
/// ## Invariants
/// - `id` is positive.
/// - `email`, `surname`, and `name` are non-blank.
/// - `age` is positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    #[schema(value_type = i32, example = 2)]
    id: UserId,
    #[schema(value_type = String, example = "ada@example.com")]
    email: Email,
    #[schema(value_type = String, example = "Lovelace")]
    surname: PersonName,
    #[schema(value_type = String, example = "Ada")]
    name: PersonName,
    #[schema(value_type = i32, example = 36)]
    age: Age,
}

/// Validated profile fields shared by [`User`] and new-user drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfileFields {
    pub email: Email,
    pub surname: PersonName,
    pub name: PersonName,
    pub age: Age,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(id: UserId, fields: UserProfileFields) -> Self {
        let UserProfileFields {
            email,
            surname,
            name,
            age,
        } = fields;
        Self {
            id,
            email,
            surname,
            name,
            age,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Family name.
    pub fn surname(&self) -> &str {
        self.surname.as_ref()
    }

    /// Given name.
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Age in years.
    pub fn age(&self) -> i32 {
        self.age.get()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: i32,
    email: String,
    surname: String,
    name: String,
    age: i32,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            email,
            surname,
            name,
            age,
        } = value;
        Self {
            id: id.get(),
            email: email.into(),
            surname: surname.0,
            name: name.0,
            age: age.get(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let fields = UserProfileFields {
            email: Email::new(value.email)?,
            surname: PersonName::new(value.surname, "surname")?,
            name: PersonName::new(value.name, "name")?,
            age: Age::new(value.age)?,
        };
        Ok(Self::new(UserId::new(value.id)?, fields))
    }
}
