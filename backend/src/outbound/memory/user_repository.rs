//! Mutex-backed `UserRepository`.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, NewUser, User, UserAccount, UserId};

#[derive(Debug, Default)]
struct State {
    next_id: i32,
    accounts: BTreeMap<UserId, UserAccount>,
}

/// In-memory user store.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    state: Mutex<State>,
}

impl MemoryUserRepository {
    fn lock(&self) -> Result<MutexGuard<'_, State>, UserPersistenceError> {
        self.state
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<UserId, UserPersistenceError> {
        let mut state = self.lock()?;
        if state
            .accounts
            .values()
            .any(|account| account.user.email() == &user.fields.email)
        {
            return Err(UserPersistenceError::duplicate_email(
                user.fields.email.as_str(),
            ));
        }

        state.next_id += 1;
        let id = UserId::new(state.next_id)
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        state.accounts.insert(
            id,
            UserAccount {
                user: User::new(id, user.fields.clone()),
                credential: user.credential.clone(),
            },
        );
        Ok(id)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()?
            .accounts
            .get(&id)
            .map(|account| account.user.clone()))
    }

    async fn find_account_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self
            .lock()?
            .accounts
            .values()
            .find(|account| account.user.email() == email)
            .cloned())
    }
}
