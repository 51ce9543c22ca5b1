//! Pantry domain service implementing the inventory driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{PantryCommand, PantryPersistenceError, PantryQuery, PantryRepository};
use crate::domain::{Error, PantryItem, PantryItemId, UserId};

/// Pantry service implementing [`PantryCommand`] and [`PantryQuery`].
#[derive(Clone)]
pub struct PantryService<R> {
    items: Arc<R>,
}

impl<R> PantryService<R> {
    /// Create a new service over the given repository.
    pub fn new(items: Arc<R>) -> Self {
        Self { items }
    }
}

fn map_pantry_persistence_error(error: PantryPersistenceError) -> Error {
    match error {
        PantryPersistenceError::Connection { message } => {
            Error::internal(format!("pantry repository unavailable: {message}"))
        }
        PantryPersistenceError::Query { message } => {
            Error::internal(format!("pantry repository error: {message}"))
        }
        PantryPersistenceError::Duplicate { .. } => Error::conflict("Item already exists"),
        PantryPersistenceError::MissingOwner { .. } => Error::not_found("User not found"),
    }
}

#[async_trait]
impl<R> PantryCommand for PantryService<R>
where
    R: PantryRepository,
{
    async fn add_item(&self, owner: &UserId, item: &PantryItem) -> Result<(), Error> {
        self.items
            .insert(owner, item)
            .await
            .map_err(map_pantry_persistence_error)?;
        debug!(user_id = %owner, item_id = %item.id(), "pantry item added");
        Ok(())
    }

    async fn update_item(&self, owner: &UserId, item: &PantryItem) -> Result<(), Error> {
        let updated = self
            .items
            .update(owner, item)
            .await
            .map_err(map_pantry_persistence_error)?;
        if !updated {
            return Err(Error::not_found("Item not found"));
        }
        Ok(())
    }

    async fn delete_item(&self, owner: &UserId, item_id: &PantryItemId) -> Result<(), Error> {
        let removed = self
            .items
            .delete(owner, item_id)
            .await
            .map_err(map_pantry_persistence_error)?;
        debug!(user_id = %owner, %item_id, removed, "pantry item delete");
        Ok(())
    }
}

#[async_trait]
impl<R> PantryQuery for PantryService<R>
where
    R: PantryRepository,
{
    async fn list_items(&self, owner: &UserId) -> Result<Vec<PantryItem>, Error> {
        self.items
            .list(owner)
            .await
            .map_err(map_pantry_persistence_error)
    }
}
