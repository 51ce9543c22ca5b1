//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this to authenticate credentials without knowing
//! how they are stored or hashed.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown users and wrong passwords fail with the same
    /// [`crate::domain::ErrorCode::Unauthorized`] error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
