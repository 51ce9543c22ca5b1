//! Profile domain service: read the display name, apply partial updates and
//! delete accounts together with their pantry.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::account_service::{map_hash_error, map_user_persistence_error};
use crate::domain::ports::{PasswordHasher, UserProfileCommand, UserProfileQuery, UserRepository};
use crate::domain::{DisplayName, Error, ProfileChanges, ProfileUpdate, UserId};

const USER_NOT_FOUND: &str = "User not found";

/// Profile service implementing the profile driving ports.
#[derive(Clone)]
pub struct ProfileService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> ProfileService<R, H> {
    /// Create a new service with the given repository and hasher.
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<R, H> UserProfileQuery for ProfileService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn display_name(&self, user_id: &UserId) -> Result<DisplayName, Error> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;
        Ok(user.display_name().clone())
    }
}

#[async_trait]
impl<R, H> UserProfileCommand for ProfileService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn update_profile(&self, user_id: &UserId, update: &ProfileUpdate) -> Result<(), Error> {
        let password_hash = match update.password() {
            Some(password) => Some(
                self.hasher
                    .hash(password)
                    .await
                    .map_err(map_hash_error)?,
            ),
            None => None,
        };
        let changes = ProfileChanges {
            display_name: update.display_name().cloned(),
            password_hash,
        };

        let updated = self
            .users
            .update_profile(user_id, &changes)
            .await
            .map_err(map_user_persistence_error)?;
        if !updated {
            return Err(Error::not_found(USER_NOT_FOUND));
        }
        debug!(%user_id, "profile updated");
        Ok(())
    }

    async fn delete_profile(&self, user_id: &UserId) -> Result<(), Error> {
        let deleted = self
            .users
            .delete_with_items(user_id)
            .await
            .map_err(map_user_persistence_error)?;
        if !deleted {
            return Err(Error::not_found(USER_NOT_FOUND));
        }
        debug!(%user_id, "profile deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FixturePasswordHasher, MockUserRepository, UserPersistenceError};
    use crate::domain::{ErrorCode, User};
    use rstest::{fixture, rstest};

    type Service = ProfileService<MockUserRepository, FixturePasswordHasher>;

    fn service(repo: MockUserRepository) -> Service {
        ProfileService::new(Arc::new(repo), Arc::new(FixturePasswordHasher))
    }

    #[fixture]
    fn user_id() -> UserId {
        UserId::new("u1").expect("user id")
    }

    #[rstest]
    #[tokio::test]
    async fn display_name_returns_stored_name(user_id: UserId) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .return_once(|_| Ok(Some(User::try_from_strings("u1", "Ada").expect("user"))));

        let name = service(repo).display_name(&user_id).await.expect("name");
        assert_eq!(name.as_ref(), "Ada");
    }

    #[rstest]
    #[tokio::test]
    async fn display_name_for_missing_user_is_not_found(user_id: UserId) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().return_once(|_| Ok(None));

        let err = service(repo)
            .display_name(&user_id)
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), USER_NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn update_hashes_password_and_keeps_name_untouched(user_id: UserId) {
        let mut repo = MockUserRepository::new();
        repo.expect_update_profile()
            .withf(|_, changes| {
                changes.display_name.is_none()
                    && changes
                        .password_hash
                        .as_ref()
                        .is_some_and(|hash| hash.as_ref() == "plain$new")
            })
            .times(1)
            .return_once(|_, _| Ok(true));

        let update = ProfileUpdate::try_from_parts(None, Some("new")).expect("update");
        service(repo)
            .update_profile(&user_id, &update)
            .await
            .expect("updated");
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_missing_user_is_not_found(user_id: UserId) {
        let mut repo = MockUserRepository::new();
        repo.expect_update_profile().return_once(|_, _| Ok(false));

        let update = ProfileUpdate::try_from_parts(Some("Grace"), None).expect("update");
        let err = service(repo)
            .update_profile(&user_id, &update)
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(true, None)]
    #[case(false, Some(ErrorCode::NotFound))]
    #[tokio::test]
    async fn delete_reports_whether_user_existed(
        user_id: UserId,
        #[case] existed: bool,
        #[case] expected: Option<ErrorCode>,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_delete_with_items()
            .times(1)
            .return_once(move |_| Ok(existed));

        let result = service(repo).delete_profile(&user_id).await;
        assert_eq!(result.err().map(|err| err.code()), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_failure_is_internal(user_id: UserId) {
        let mut repo = MockUserRepository::new();
        repo.expect_delete_with_items()
            .return_once(|_| Err(UserPersistenceError::query("deadlock detected")));

        let err = service(repo)
            .delete_profile(&user_id)
            .await
            .expect_err("failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
