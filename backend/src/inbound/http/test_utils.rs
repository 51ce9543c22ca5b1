//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::{test, web};
use serde_json::Value;

use crate::domain::ports::{FixturePasswordHasher, FixtureShelfLifeModel};
use crate::domain::{ExpiryPredictor, PantryItem, PantryItemDraft};
use crate::inbound::http::state::HttpState;
use crate::test_support::InMemoryStore;

/// Shelf life returned by the fixture model used in handler tests.
pub const FIXTURE_DAYS: f64 = 10.0;

/// In-memory store plus a predictor, ready to back handler tests.
#[derive(Clone)]
pub struct TestStore {
    store: InMemoryStore,
    predictor: ExpiryPredictor,
}

impl Default for TestStore {
    fn default() -> Self {
        Self {
            store: InMemoryStore::new(),
            predictor: ExpiryPredictor::loaded(Arc::new(FixtureShelfLifeModel::new(FIXTURE_DAYS))),
        }
    }
}

impl TestStore {
    /// Store holding a single account.
    pub fn with_user(user_id: &str, display_name: &str, password: &str) -> Self {
        let store = Self::default();
        store.store.seed_user(user_id, display_name, password);
        store
    }

    /// Replace the predictor.
    pub fn with_predictor(mut self, predictor: ExpiryPredictor) -> Self {
        self.predictor = predictor;
        self
    }

    /// Handler state over this store.
    pub fn http_state(&self) -> web::Data<HttpState> {
        web::Data::new(self.store.http_state(self.predictor.clone()))
    }

    /// Underlying store handle.
    pub fn inner(&self) -> &InMemoryStore {
        &self.store
    }

    pub fn display_name(&self, user_id: &str) -> Option<String> {
        self.store.display_name(user_id)
    }

    /// Whether `password` verifies against the stored hash.
    pub fn password_matches(&self, user_id: &str, password: &str) -> bool {
        self.store
            .password_hash(user_id)
            .is_some_and(|hash| FixturePasswordHasher::matches(password, &hash) == Ok(true))
    }

    /// Seed a minimal item for `owner`.
    pub fn add_item(&self, owner: &str, item_id: &str, name: &str) {
        let item = PantryItem::try_from_draft(PantryItemDraft {
            id: item_id.to_owned(),
            name: name.to_owned(),
            quantity: 1.0,
            unit: "pcs".to_owned(),
            category: "dairy".to_owned(),
            ..PantryItemDraft::default()
        })
        .expect("valid seed item");
        self.store.seed_item(owner, item);
    }

    pub fn item_count(&self, owner: &str) -> usize {
        self.store.item_count(owner)
    }
}

/// Deserialize a response body as JSON.
pub async fn read_json(response: ServiceResponse) -> Value {
    let bytes = test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("JSON body")
}
