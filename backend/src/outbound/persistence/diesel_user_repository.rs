//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    Age, CredentialHash, Email, NewUser, PersonName, User, UserAccount, UserId,
    UserProfileFields,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(
    error: diesel::result::Error,
    operation: &str,
    email: Option<&Email>,
) -> UserPersistenceError {
    match classify_diesel_error(error, operation) {
        DieselFailure::UniqueViolation { .. } => match email {
            Some(email) => UserPersistenceError::duplicate_email(email.as_str()),
            None => UserPersistenceError::query("unique constraint violated"),
        },
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

/// Convert a stored row into a validated account.
fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let UserRow {
        id,
        email,
        password_hash,
        surname,
        name,
        age,
    } = row;
    let invalid = |err: crate::domain::UserValidationError| {
        UserPersistenceError::query(format!("stored user {id} is invalid: {err}"))
    };

    let fields = UserProfileFields {
        email: Email::new(email).map_err(invalid)?,
        surname: PersonName::new(surname, "surname").map_err(invalid)?,
        name: PersonName::new(name, "name").map_err(invalid)?,
        age: Age::new(age).map_err(invalid)?,
    };
    let user_id = UserId::new(id).map_err(invalid)?;

    Ok(UserAccount {
        user: User::new(user_id, fields),
        credential: CredentialHash::from_phc(password_hash),
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &NewUser) -> Result<UserId, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            email: user.fields.email.as_str(),
            password_hash: user.credential.as_str(),
            surname: user.fields.surname.as_ref(),
            name: user.fields.name.as_ref(),
            age: user.fields.age.get(),
        };

        let id: i32 = diesel::insert_into(users::table)
            .values(&row)
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "insert user", Some(&user.fields.email)))?;

        UserId::new(id).map_err(|err| UserPersistenceError::query(err.to_string()))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find user by id", None))?;

        row.map(|row| row_to_account(row).map(|account| account.user))
            .transpose()
    }

    async fn find_account_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find user by email", None))?;

        row.map(row_to_account).transpose()
    }
}
