//! Driven port for password hashing.
//!
//! Adapters must not run hashing on the calling async worker.

use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashers.
    pub enum PasswordHashError {
        /// Hashing failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Hashes and verifies passwords.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh random salt.
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against a stored hash.
    async fn verify(&self, password: &str, hash: &PasswordHash)
    -> Result<bool, PasswordHashError>;
}

/// Reversible stand-in hasher for tests; stores `plain$<password>`.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

#[cfg(any(test, feature = "test-support"))]
impl FixturePasswordHasher {
    const PREFIX: &'static str = "plain$";

    /// Encode `password` synchronously, for seeding stores.
    pub fn encode(password: &str) -> Result<PasswordHash, PasswordHashError> {
        PasswordHash::new(format!("{}{password}", Self::PREFIX))
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    /// Synchronous counterpart of [`PasswordHasher::verify`].
    pub fn matches(password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let stored = hash
            .as_ref()
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| PasswordHashError::malformed_hash("missing fixture prefix"))?;
        Ok(stored == password)
    }
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl PasswordHasher for FixturePasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        Self::encode(password)
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        Self::matches(password, hash)
    }
}
