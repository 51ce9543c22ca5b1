//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{PasswordHash, ProfileChanges, User, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A user with the same id already exists.
        Duplicate { user_id: String } => "user {user_id} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with `Duplicate` when the id is taken.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;

    /// Fetch the stored password hash for a user.
    async fn find_password_hash(
        &self,
        id: &UserId,
    ) -> Result<Option<PasswordHash>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Apply column changes. Returns `false` when no user matched.
    async fn update_profile(
        &self,
        id: &UserId,
        changes: &ProfileChanges,
    ) -> Result<bool, UserPersistenceError>;

    /// Delete the user and every pantry item they own in one transaction.
    ///
    /// Returns `false` when no user matched; nothing is deleted in that case.
    async fn delete_with_items(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}
