//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Account deletion removes the user's pantry items and the user row inside a
//! single transaction, so a failure part-way leaves both tables untouched.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{PasswordHash, ProfileChanges, User, UserAccount, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewUserRow, ProfileChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{pantry_items, users};

/// Diesel-backed implementation of the `UserRepository` port.
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

fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    let failure = classify_diesel_error(&error);
    match failure {
        DieselFailure::Connection => UserPersistenceError::connection(failure.describe()),
        _ => UserPersistenceError::query(failure.describe()),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    User::try_from_strings(&row.user_id, &row.user_name).map_err(|err| {
        UserPersistenceError::query(format!("stored user {} is invalid: {err}", row.user_id))
    })
}

/// Outcome of the cascade-delete transaction body.
///
/// `UserMissing` aborts the transaction so the item deletion rolls back.
#[derive(Debug)]
enum CascadeError {
    Diesel(DieselError),
    UserMissing,
}

impl From<DieselError> for CascadeError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user = account.user();
        let row = NewUserRow {
            user_id: user.id().as_ref(),
            user_name: user.display_name().as_ref(),
            password_hash: account.password_hash().as_ref(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| match classify_diesel_error(&err) {
                DieselFailure::UniqueViolation => UserPersistenceError::duplicate(user.id().as_ref()),
                _ => map_diesel_error(err),
            })
    }

    async fn find_password_hash(
        &self,
        id: &UserId,
    ) -> Result<Option<PasswordHash>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let stored: Option<String> = users::table
            .filter(users::user_id.eq(id.as_ref()))
            .select(users::password_hash)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        stored
            .map(|encoded| {
                PasswordHash::new(encoded).map_err(|err| {
                    UserPersistenceError::query(format!("stored hash for {id} is invalid: {err}"))
                })
            })
            .transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::user_id.eq(id.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn update_profile(
        &self,
        id: &UserId,
        changes: &ProfileChanges,
    ) -> Result<bool, UserPersistenceError> {
        if changes.is_empty() {
            // Diesel rejects an empty changeset; report existence instead.
            return self.find_by_id(id).await.map(|user| user.is_some());
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = ProfileChangeset {
            user_name: changes.display_name.as_ref().map(|name| name.as_ref()),
            password_hash: changes.password_hash.as_ref().map(|hash| hash.as_ref()),
        };

        let updated = diesel::update(users::table.filter(users::user_id.eq(id.as_ref())))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn delete_with_items(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user_id = id.as_ref().to_owned();

        let result = conn
            .transaction::<_, CascadeError, _>(|conn| {
                async move {
                    let items = diesel::delete(
                        pantry_items::table.filter(pantry_items::user_id.eq(user_id.as_str())),
                    )
                    .execute(conn)
                    .await?;

                    let removed =
                        diesel::delete(users::table.filter(users::user_id.eq(user_id.as_str())))
                            .execute(conn)
                            .await?;

                    if removed == 0 {
                        return Err(CascadeError::UserMissing);
                    }
                    Ok(items)
                }
                .scope_boxed()
            })
            .await;

        match result {
            Ok(items) => {
                debug!(user_id = %id, items, "user and pantry deleted");
                Ok(true)
            }
            Err(CascadeError::UserMissing) => Ok(false),
            Err(CascadeError::Diesel(err)) => Err(map_diesel_error(err)),
        }
    }
}
