//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Service`, `*Command`, `*Query`) are called by inbound
//! adapters. Driven ports (`*Repository`, [`PasswordHasher`],
//! [`ShelfLifeModel`]) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod pantry_command;
mod pantry_query;
mod pantry_repository;
mod password_hasher;
mod shelf_life_model;
mod signup_service;
mod user_profile_command;
mod user_profile_query;
mod user_repository;

pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use pantry_command::MockPantryCommand;
pub use pantry_command::PantryCommand;
#[cfg(test)]
pub use pantry_query::MockPantryQuery;
pub use pantry_query::PantryQuery;
#[cfg(test)]
pub use pantry_repository::MockPantryRepository;
pub use pantry_repository::{PantryPersistenceError, PantryRepository};
#[cfg(any(test, feature = "test-support"))]
pub use password_hasher::FixturePasswordHasher;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use shelf_life_model::MockShelfLifeModel;
pub use shelf_life_model::{
    FixtureShelfLifeModel, InferenceError, ShelfLifeFeatures, ShelfLifeModel,
};
#[cfg(test)]
pub use signup_service::MockSignupService;
pub use signup_service::SignupService;
#[cfg(test)]
pub use user_profile_command::MockUserProfileCommand;
pub use user_profile_command::UserProfileCommand;
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
