//! Driving port for account creation.

use async_trait::async_trait;

use crate::domain::{Error, NewAccount, UserId};

/// Domain use-case port for account creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Create the account. A taken user id fails with
    /// [`crate::domain::ErrorCode::Conflict`].
    async fn register(&self, account: &NewAccount) -> Result<UserId, Error>;
}
