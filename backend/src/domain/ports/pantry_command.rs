//! Driving port for pantry inventory mutations.

use async_trait::async_trait;

use crate::domain::{Error, PantryItem, PantryItemId, UserId};

/// Domain use-case port for pantry mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PantryCommand: Send + Sync {
    /// Add a new item for `owner`.
    async fn add_item(&self, owner: &UserId, item: &PantryItem) -> Result<(), Error>;

    /// Replace an existing item of `owner`.
    async fn update_item(&self, owner: &UserId, item: &PantryItem) -> Result<(), Error>;

    /// Remove an item of `owner`. Removing a missing item succeeds.
    async fn delete_item(&self, owner: &UserId, item_id: &PantryItemId) -> Result<(), Error>;
}
