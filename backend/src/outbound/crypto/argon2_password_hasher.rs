//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashes are PHC strings (`$argon2id$v=19$...`) with a fresh 16-byte salt
//! drawn from the thread-local CSPRNG. Hashing and verification run on the
//! tokio blocking pool.

use argon2::Argon2;
use argon2::password_hash::{
    Error as PhcError, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _,
    SaltString,
};
use async_trait::async_trait;
use rand::RngCore;
use tokio::task::{JoinError, spawn_blocking};
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

const SALT_LEN: usize = 16;

/// Argon2id hasher with the crate's default cost parameters.
#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Hasher with default Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn hash_blocking(&self, password: &[u8]) -> Result<PasswordHash, PasswordHashError> {
        let mut salt_bytes = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;

        let encoded = self
            .argon2
            .hash_password(password, &salt)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
            .to_string();
        PasswordHash::new(encoded).map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify_blocking(&self, password: &[u8], hash: &str) -> Result<bool, PasswordHashError> {
        let parsed =
            PhcHash::new(hash).map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
        match self.argon2.verify_password(password, &parsed) {
            Ok(()) => Ok(true),
            Err(PhcError::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::hash(err.to_string())),
        }
    }
}

fn map_join_error(err: JoinError) -> PasswordHashError {
    PasswordHashError::hash(format!("hashing task did not complete: {err}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let hasher = self.clone();
        let password = Zeroizing::new(password.as_bytes().to_vec());
        spawn_blocking(move || hasher.hash_blocking(&password))
            .await
            .map_err(map_join_error)?
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let hasher = self.clone();
        let password = Zeroizing::new(password.as_bytes().to_vec());
        let stored = hash.as_ref().to_owned();
        spawn_blocking(move || hasher.verify_blocking(&password, &stored))
            .await
            .map_err(map_join_error)?
    }
}
