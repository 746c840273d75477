//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::on_constraint;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, User, Username};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        name,
        email,
        created_at,
    } = row;
    let name = Username::new(name)
        .map_err(|err| UserPersistenceError::query(format!("stored user {id}: {err}")))?;
    let email = Email::new(email)
        .map_err(|err| UserPersistenceError::query(format!("stored user {id}: {err}")))?;
    Ok(User {
        id,
        name,
        email,
        created_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_identity(
        &self,
        name: &Username,
        email: &Email,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(users::name.eq(name.as_ref()))
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_user)
            .transpose()
    }

    async fn create(
        &self,
        name: &Username,
        email: &Email,
        created_at: DateTime<Utc>,
    ) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted = diesel::insert_into(users::table)
            .values(NewUserRow {
                name: name.as_ref(),
                email: email.as_ref(),
                created_at,
            })
            .on_conflict(on_constraint("users_name_email_key"))
            .do_nothing()
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let row = match inserted {
            Some(row) => row,
            None => users::table
                .filter(users::name.eq(name.as_ref()))
                .filter(users::email.eq(email.as_ref()))
                .select(UserRow::as_select())
                .first(&mut conn)
                .await
                .map_err(map_diesel_error)?,
        };
        row_to_user(row)
    }
}
