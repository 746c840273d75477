//! Port abstraction for review author persistence.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Email, User, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the user with this exact username and email pair.
    async fn find_by_identity(
        &self,
        name: &Username,
        email: &Email,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a user, returning the stored row when the pair already exists.
    async fn create(
        &self,
        name: &Username,
        email: &Email,
        created_at: DateTime<Utc>,
    ) -> Result<User, UserPersistenceError>;
}

/// Fixture repository that echoes new users back with id `1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_identity(
        &self,
        _name: &Username,
        _email: &Email,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }

    async fn create(
        &self,
        name: &Username,
        email: &Email,
        created_at: DateTime<Utc>,
    ) -> Result<User, UserPersistenceError> {
        Ok(User {
            id: 1,
            name: name.clone(),
            email: email.clone(),
            created_at,
        })
    }
}
