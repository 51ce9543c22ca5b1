//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use pantry_backend::domain::ExpiryPredictor;
use pantry_backend::outbound::persistence::DbPool;

/// Everything the server needs beyond its health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) predictor: Arc<ExpiryPredictor>,
}

impl ServerConfig {
    /// Server bound to `bind_addr`, persisting through `db_pool`.
    ///
    /// Predictions stay disabled until [`Self::with_predictor`] supplies a
    /// loaded model.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            db_pool,
            predictor: Arc::new(ExpiryPredictor::disabled("no model configured")),
        }
    }

    /// Attach the startup-loaded predictor.
    #[must_use]
    pub fn with_predictor(mut self, predictor: ExpiryPredictor) -> Self {
        self.predictor = Arc::new(predictor);
        self
    }
}
