//! Driving port for user profile updates and deletion.

use async_trait::async_trait;

use crate::domain::{Error, ProfileUpdate, UserId};

/// Domain use-case port for profile mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileCommand: Send + Sync {
    /// Apply a partial update, or fail with `NotFound`.
    async fn update_profile(&self, user_id: &UserId, update: &ProfileUpdate) -> Result<(), Error>;

    /// Delete the user and all their pantry items, or fail with `NotFound`.
    async fn delete_profile(&self, user_id: &UserId) -> Result<(), Error>;
}
