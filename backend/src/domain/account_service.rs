//! Account domain service: signup and login.
//!
//! Implements the [`SignupService`] and [`LoginService`] driving ports over a
//! [`UserRepository`] and a [`PasswordHasher`]. Plaintext passwords never
//! leave this service; only their hashes reach the repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, SignupService, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Error, LoginCredentials, NewAccount, User, UserAccount, UserId};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Account service implementing the signup and login driving ports.
#[derive(Clone)]
pub struct AccountService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AccountService<R, H> {
    /// Create a new service with the given repository and hasher.
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { .. } => Error::conflict("User already exists"),
    }
}

pub(crate) fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<R, H> SignupService for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, account: &NewAccount) -> Result<UserId, Error> {
        let hash = self
            .hasher
            .hash(account.password())
            .await
            .map_err(map_hash_error)?;
        let user = User::new(account.user_id().clone(), account.display_name().clone());
        self.users
            .insert(&UserAccount::new(user, hash))
            .await
            .map_err(map_user_persistence_error)?;
        debug!(user_id = %account.user_id(), "account created");
        Ok(account.user_id().clone())
    }
}

#[async_trait]
impl<R, H> LoginService for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let stored = self
            .users
            .find_password_hash(credentials.user_id())
            .await
            .map_err(map_user_persistence_error)?;
        let Some(hash) = stored else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &hash)
            .await
            .map_err(map_hash_error)?;
        if verified {
            Ok(credentials.user_id().clone())
        } else {
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FixturePasswordHasher, MockPasswordHasher, MockUserRepository};
    use crate::domain::{ErrorCode, PasswordHash};
    use rstest::rstest;

    fn service(
        repo: MockUserRepository,
    ) -> AccountService<MockUserRepository, FixturePasswordHasher> {
        AccountService::new(Arc::new(repo), Arc::new(FixturePasswordHasher))
    }

    fn credentials(password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts("u1", password).expect("credentials shape")
    }

    #[rstest]
    #[tokio::test]
    async fn register_stores_hash_not_plaintext() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .withf(|account| {
                account.user().id().as_ref() == "u1"
                    && account.user().display_name().as_ref() == "Ada"
                    && account.password_hash().as_ref() == "plain$pw"
            })
            .times(1)
            .return_once(|_| Ok(()));

        let account = NewAccount::try_from_parts("Ada", "u1", " pw ").expect("valid signup");
        let id = service(repo).register(&account).await.expect("signup");
        assert_eq!(id.as_ref(), "u1");
    }

    #[rstest]
    #[tokio::test]
    async fn register_maps_duplicate_to_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .return_once(|_| Err(UserPersistenceError::duplicate("u1")));

        let account = NewAccount::try_from_parts("", "u1", "pw").expect("valid signup");
        let err = service(repo).register(&account).await.expect_err("conflict");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), "User already exists");
    }

    #[rstest]
    #[tokio::test]
    async fn register_surfaces_hash_failure_as_internal() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .return_once(|_| Err(PasswordHashError::hash("out of memory")));
        let mut repo = MockUserRepository::new();
        repo.expect_insert().never();
        let service = AccountService::new(Arc::new(repo), Arc::new(hasher));

        let account = NewAccount::try_from_parts("", "u1", "pw").expect("valid signup");
        let err = service.register(&account).await.expect_err("hash failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[case("pw", true)]
    #[case("wrong", false)]
    #[case("PW", false)]
    #[tokio::test]
    async fn authenticate_checks_password(#[case] attempt: &str, #[case] accepted: bool) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_password_hash()
            .return_once(|_| Ok(Some(PasswordHash::new("plain$pw").expect("hash"))));

        let result = service(repo).authenticate(&credentials(attempt)).await;
        match (accepted, result) {
            (true, Ok(id)) => assert_eq!(id.as_ref(), "u1"),
            (false, Err(err)) => {
                assert_eq!(err.code(), ErrorCode::Unauthorized);
                assert_eq!(err.message(), INVALID_CREDENTIALS);
            }
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(id)) => panic!("expected failure, got success: {id}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_user_matches_wrong_password_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_password_hash().return_once(|_| Ok(None));

        let err = service(repo)
            .authenticate(&credentials("pw"))
            .await
            .expect_err("unknown user");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[rstest]
    #[tokio::test]
    async fn store_failure_is_internal() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_password_hash()
            .return_once(|_| Err(UserPersistenceError::connection("refused")));

        let err = service(repo)
            .authenticate(&credentials("pw"))
            .await
            .expect_err("store failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
