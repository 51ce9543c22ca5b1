//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` so they depend only on domain
//! ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ExpiryPredictor;
use crate::domain::ports::{
    LoginService, PantryCommand, PantryQuery, SignupService, UserProfileCommand, UserProfileQuery,
};

/// Parameter object bundling the driving ports used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileCommand>,
    pub profile_query: Arc<dyn UserProfileQuery>,
    pub pantry: Arc<dyn PantryCommand>,
    pub pantry_query: Arc<dyn PantryQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileCommand>,
    pub profile_query: Arc<dyn UserProfileQuery>,
    pub pantry: Arc<dyn PantryCommand>,
    pub pantry_query: Arc<dyn PantryQuery>,
    pub predictor: Arc<ExpiryPredictor>,
}

impl HttpState {
    /// Construct state from the ports bundle and the startup-loaded predictor.
    pub fn new(ports: HttpStatePorts, predictor: Arc<ExpiryPredictor>) -> Self {
        let HttpStatePorts {
            signup,
            login,
            profile,
            profile_query,
            pantry,
            pantry_query,
        } = ports;
        Self {
            signup,
            login,
            profile,
            profile_query,
            pantry,
            pantry_query,
            predictor,
        }
    }
}
