//! Builders wiring Diesel repositories and the Argon2 hasher into the
//! domain services behind [`HttpState`].

use std::sync::Arc;

use actix_web::web;

use pantry_backend::domain::{AccountService, PantryService, ProfileService};
use pantry_backend::inbound::http::state::{HttpState, HttpStatePorts};
use pantry_backend::outbound::crypto::Argon2PasswordHasher;
use pantry_backend::outbound::persistence::{DieselPantryRepository, DieselUserRepository};

use super::ServerConfig;

pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let users = Arc::new(DieselUserRepository::new(config.db_pool.clone()));
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let accounts = Arc::new(AccountService::new(users.clone(), hasher.clone()));
    let profiles = Arc::new(ProfileService::new(users, hasher));
    let pantry = Arc::new(PantryService::new(Arc::new(DieselPantryRepository::new(
        config.db_pool.clone(),
    ))));

    web::Data::new(HttpState::new(
        HttpStatePorts {
            signup: accounts.clone(),
            login: accounts,
            profile: profiles.clone(),
            profile_query: profiles,
            pantry: pantry.clone(),
            pantry_query: pantry,
        },
        config.predictor.clone(),
    ))
}
