//! Port abstraction for pantry item persistence.
//!
//! Every operation is scoped to the owning user; an item is only visible to
//! and mutable by the user it was added for.
use async_trait::async_trait;

use crate::domain::{PantryItem, PantryItemId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by pantry repository adapters.
    pub enum PantryPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "pantry repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "pantry repository query failed: {message}",
        /// An item with the same id already exists.
        Duplicate { item_id: String } => "pantry item {item_id} already exists",
        /// The owning user does not exist.
        MissingOwner { user_id: String } => "pantry owner {user_id} does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PantryRepository: Send + Sync {
    /// Insert a new item for `owner`.
    async fn insert(
        &self,
        owner: &UserId,
        item: &PantryItem,
    ) -> Result<(), PantryPersistenceError>;

    /// Overwrite every mutable field of the item. Returns `false` when no
    /// item with that id belongs to `owner`.
    async fn update(
        &self,
        owner: &UserId,
        item: &PantryItem,
    ) -> Result<bool, PantryPersistenceError>;

    /// Delete the item if it exists. Returns whether a row was removed.
    async fn delete(
        &self,
        owner: &UserId,
        item_id: &PantryItemId,
    ) -> Result<bool, PantryPersistenceError>;

    /// All items of `owner`, ordered by added date then id.
    async fn list(&self, owner: &UserId) -> Result<Vec<PantryItem>, PantryPersistenceError>;
}
