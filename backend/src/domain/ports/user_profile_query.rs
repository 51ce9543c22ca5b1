//! Driving port for user profile reads.

use async_trait::async_trait;

use crate::domain::{DisplayName, Error, UserId};

/// Domain use-case port for profile reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Display name of the user, or `NotFound`.
    async fn display_name(&self, user_id: &UserId) -> Result<DisplayName, Error>;
}
