//! Get-or-create lookup for review authors.

use std::sync::Arc;

use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, Error, User, Username};

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Resolves token identities to persisted users.
#[derive(Clone)]
pub struct UserService<U> {
    user_repo: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> UserService<U> {
    pub fn new(user_repo: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }
}

impl<U> UserService<U>
where
    U: UserRepository,
{
    /// Return the user keyed by `(name, email)`, creating it on first use.
    pub async fn get_or_create(&self, name: &Username, email: &Email) -> Result<User, Error> {
        if let Some(user) = self
            .user_repo
            .find_by_identity(name, email)
            .await
            .map_err(map_user_error)?
        {
            return Ok(user);
        }

        debug!(username = %name, "creating user on first review");
        self.user_repo
            .create(name, email, self.clock.utc())
            .await
            .map_err(map_user_error)
    }
}
