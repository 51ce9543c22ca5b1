//! Driving port for listing pantry items.

use async_trait::async_trait;

use crate::domain::{Error, PantryItem, UserId};

/// Domain use-case port for pantry reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PantryQuery: Send + Sync {
    /// Every item of `owner`, ordered by added date then id.
    async fn list_items(&self, owner: &UserId) -> Result<Vec<PantryItem>, Error>;
}
