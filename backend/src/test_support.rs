//! Test utilities for the backend crate.
//!
//! In-memory repositories sharing one store, used by unit tests in `src/` and
//! by the HTTP scenarios under `tests/` (through the `test-support` feature).
//! They honour the same contracts as the Diesel adapters: item ids are
//! globally unique, items need an existing owner, listing orders by added
//! date with undated items last, and account deletion is all-or-nothing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    FixturePasswordHasher, PantryPersistenceError, PantryRepository, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    AccountService, ExpiryPredictor, PantryItem, PantryItemId, PantryService, PasswordHash,
    ProfileChanges, ProfileService, User, UserAccount, UserId,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: PasswordHash,
}

#[derive(Debug, Clone)]
struct StoredItem {
    owner: String,
    item: PantryItem,
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    users: HashMap<String, StoredUser>,
    items: HashMap<String, StoredItem>,
    fail_after_item_delete: bool,
}

/// Shared in-memory backing store.
///
/// Cloning yields another handle onto the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// User repository over this store.
    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            store: self.clone(),
        }
    }

    /// Pantry repository over this store.
    pub fn pantry(&self) -> InMemoryPantryRepository {
        InMemoryPantryRepository {
            store: self.clone(),
        }
    }

    /// Make the next account deletion fail after the items are removed.
    ///
    /// The deletion rolls back, leaving both users and items intact.
    pub fn inject_fault_after_item_delete(&self) {
        self.lock().fail_after_item_delete = true;
    }

    /// Store an account whose password hash comes from
    /// [`FixturePasswordHasher`].
    pub fn seed_user(&self, user_id: &str, display_name: &str, password: &str) {
        let user = User::try_from_strings(user_id, display_name)
            .unwrap_or_else(|err| panic!("invalid seed user {user_id}: {err}"));
        let password_hash = FixturePasswordHasher::encode(password)
            .unwrap_or_else(|err| panic!("fixture hash failed: {err}"));
        self.lock().users.insert(
            user.id().as_ref().to_owned(),
            StoredUser {
                user,
                password_hash,
            },
        );
    }

    /// Store an item for `owner` without checking the owner exists.
    pub fn seed_item(&self, owner: &str, item: PantryItem) {
        self.lock().items.insert(
            item.id().as_ref().to_owned(),
            StoredItem {
                owner: owner.to_owned(),
                item,
            },
        );
    }

    /// Display name of a stored user.
    pub fn display_name(&self, user_id: &str) -> Option<String> {
        self.lock()
            .users
            .get(user_id)
            .map(|stored| stored.user.display_name().as_ref().to_owned())
    }

    /// Stored password hash of a user.
    pub fn password_hash(&self, user_id: &str) -> Option<PasswordHash> {
        self.lock()
            .users
            .get(user_id)
            .map(|stored| stored.password_hash.clone())
    }

    /// Number of stored users.
    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    /// Number of items owned by `owner`.
    pub fn item_count(&self, owner: &str) -> usize {
        self.lock()
            .items
            .values()
            .filter(|stored| stored.owner == owner)
            .count()
    }

    /// A stored item, regardless of owner.
    pub fn item(&self, item_id: &str) -> Option<PantryItem> {
        self.lock()
            .items
            .get(item_id)
            .map(|stored| stored.item.clone())
    }

    /// HTTP state wired to real services over this store.
    ///
    /// Passwords go through [`FixturePasswordHasher`].
    pub fn http_state(&self, predictor: ExpiryPredictor) -> HttpState {
        let users = Arc::new(self.users());
        let hasher = Arc::new(FixturePasswordHasher);
        let accounts = Arc::new(AccountService::new(users.clone(), hasher.clone()));
        let profiles = Arc::new(ProfileService::new(users, hasher));
        let pantry = Arc::new(PantryService::new(Arc::new(self.pantry())));

        HttpState::new(
            HttpStatePorts {
                signup: accounts.clone(),
                login: accounts,
                profile: profiles.clone(),
                profile_query: profiles,
                pantry: pantry.clone(),
                pantry_query: pantry,
            },
            Arc::new(predictor),
        )
    }
}

/// In-memory [`UserRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut state = self.store.lock();
        let key = account.user().id().as_ref().to_owned();
        if state.users.contains_key(&key) {
            return Err(UserPersistenceError::duplicate(key));
        }
        state.users.insert(
            key,
            StoredUser {
                user: account.user().clone(),
                password_hash: account.password_hash().clone(),
            },
        );
        Ok(())
    }

    async fn find_password_hash(
        &self,
        id: &UserId,
    ) -> Result<Option<PasswordHash>, UserPersistenceError> {
        Ok(self.store.password_hash(id.as_ref()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .store
            .lock()
            .users
            .get(id.as_ref())
            .map(|stored| stored.user.clone()))
    }

    async fn update_profile(
        &self,
        id: &UserId,
        changes: &ProfileChanges,
    ) -> Result<bool, UserPersistenceError> {
        let mut state = self.store.lock();
        let Some(stored) = state.users.get_mut(id.as_ref()) else {
            return Ok(false);
        };
        if let Some(name) = &changes.display_name {
            stored.user = User::new(stored.user.id().clone(), name.clone());
        }
        if let Some(hash) = &changes.password_hash {
            stored.password_hash = hash.clone();
        }
        Ok(true)
    }

    async fn delete_with_items(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut state = self.store.lock();
        let snapshot = state.clone();

        state.items.retain(|_, stored| stored.owner != id.as_ref());
        if state.fail_after_item_delete {
            *state = StoreState {
                fail_after_item_delete: false,
                ..snapshot
            };
            return Err(UserPersistenceError::query("injected failure"));
        }
        if state.users.remove(id.as_ref()).is_none() {
            *state = snapshot;
            return Ok(false);
        }
        Ok(true)
    }
}

/// In-memory [`PantryRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryPantryRepository {
    store: InMemoryStore,
}

#[async_trait]
impl PantryRepository for InMemoryPantryRepository {
    async fn insert(&self, owner: &UserId, item: &PantryItem) -> Result<(), PantryPersistenceError> {
        let mut state = self.store.lock();
        let key = item.id().as_ref().to_owned();
        if state.items.contains_key(&key) {
            return Err(PantryPersistenceError::duplicate(key));
        }
        if !state.users.contains_key(owner.as_ref()) {
            return Err(PantryPersistenceError::missing_owner(owner.as_ref()));
        }
        state.items.insert(
            key,
            StoredItem {
                owner: owner.as_ref().to_owned(),
                item: item.clone(),
            },
        );
        Ok(())
    }

    async fn update(&self, owner: &UserId, item: &PantryItem) -> Result<bool, PantryPersistenceError> {
        let mut state = self.store.lock();
        match state.items.get_mut(item.id().as_ref()) {
            Some(stored) if stored.owner == owner.as_ref() => {
                stored.item = item.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(
        &self,
        owner: &UserId,
        item_id: &PantryItemId,
    ) -> Result<bool, PantryPersistenceError> {
        let mut state = self.store.lock();
        let owned = state
            .items
            .get(item_id.as_ref())
            .is_some_and(|stored| stored.owner == owner.as_ref());
        if owned {
            state.items.remove(item_id.as_ref());
        }
        Ok(owned)
    }

    async fn list(&self, owner: &UserId) -> Result<Vec<PantryItem>, PantryPersistenceError> {
        let state = self.store.lock();
        let mut items: Vec<PantryItem> = state
            .items
            .values()
            .filter(|stored| stored.owner == owner.as_ref())
            .map(|stored| stored.item.clone())
            .collect();
        // Postgres sorts NULL last in ascending order.
        items.sort_by(|a, b| {
            (a.added_date().is_none(), a.added_date(), a.id().as_ref()).cmp(&(
                b.added_date().is_none(),
                b.added_date(),
                b.id().as_ref(),
            ))
        });
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PantryItemDraft;
    use rstest::{fixture, rstest};

    fn item(id: &str, added: Option<&str>) -> PantryItem {
        PantryItem::try_from_draft(PantryItemDraft {
            id: id.to_owned(),
            name: format!("item {id}"),
            quantity: 1.0,
            unit: "pcs".to_owned(),
            category: "dairy".to_owned(),
            added_date: added.map(str::to_owned),
            ..PantryItemDraft::default()
        })
        .expect("valid item")
    }

    fn uid(raw: &str) -> UserId {
        UserId::new(raw).expect("user id")
    }

    #[fixture]
    fn store() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.seed_user("u1", "Ada", "pw");
        store
    }

    #[rstest]
    #[tokio::test]
    async fn list_orders_by_added_date_with_undated_last(store: InMemoryStore) {
        store.seed_item("u1", item("c", None));
        store.seed_item("u1", item("b", Some("2024-05-02")));
        store.seed_item("u1", item("a", Some("2024-05-02")));
        store.seed_item("u1", item("z", Some("2024-05-01")));

        let ids: Vec<String> = store
            .pantry()
            .list(&uid("u1"))
            .await
            .expect("list")
            .iter()
            .map(|item| item.id().as_ref().to_owned())
            .collect();
        assert_eq!(ids, ["z", "a", "b", "c"]);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_unknown_owner_and_duplicate_ids(store: InMemoryStore) {
        let pantry = store.pantry();
        pantry.insert(&uid("u1"), &item("i1", None)).await.expect("insert");

        assert_eq!(
            pantry.insert(&uid("u1"), &item("i1", None)).await,
            Err(PantryPersistenceError::duplicate("i1"))
        );
        assert_eq!(
            pantry.insert(&uid("ghost"), &item("i2", None)).await,
            Err(PantryPersistenceError::missing_owner("ghost"))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn items_are_scoped_to_their_owner(store: InMemoryStore) {
        store.seed_user("u2", "Grace", "pw");
        store.seed_item("u1", item("i1", None));
        let pantry = store.pantry();
        let id = PantryItemId::new("i1").expect("item id");

        assert!(!pantry.update(&uid("u2"), &item("i1", None)).await.expect("update"));
        assert!(!pantry.delete(&uid("u2"), &id).await.expect("delete"));
        assert_eq!(store.item_count("u1"), 1);
        assert!(pantry.delete(&uid("u1"), &id).await.expect("delete"));
        assert_eq!(store.item_count("u1"), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn injected_fault_rolls_back_the_cascade(store: InMemoryStore) {
        store.seed_item("u1", item("i1", None));
        store.inject_fault_after_item_delete();

        let err = store
            .users()
            .delete_with_items(&uid("u1"))
            .await
            .expect_err("injected");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.item_count("u1"), 1);

        assert!(store.users().delete_with_items(&uid("u1")).await.expect("retry"));
        assert_eq!(store.user_count(), 0);
        assert_eq!(store.item_count("u1"), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_missing_user_keeps_orphan_items(store: InMemoryStore) {
        store.seed_item("ghost", item("i9", None));

        let deleted = store
            .users()
            .delete_with_items(&uid("ghost"))
            .await
            .expect("delete");
        assert!(!deleted);
        assert_eq!(store.item_count("ghost"), 1);
    }
}
