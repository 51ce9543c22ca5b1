//! Backend entry-point: loads settings, prepares the database and the
//! shelf-life model, then serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pantry_backend::config::AppSettings;
use pantry_backend::domain::ExpiryPredictor;
use pantry_backend::inbound::http::health::HealthState;
use pantry_backend::outbound::model::LookupShelfLifeModel;
use pantry_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let database_url = settings.database_url()?;
    let bind_addr = settings.bind_addr()?;
    let pool_max_size = settings.pool_max_size()?;

    run_pending_migrations(&database_url)
        .await
        .wrap_err("failed to prepare the database schema")?;
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(pool_max_size))
        .await
        .wrap_err("failed to build the database pool")?;

    let model_path = settings.model_path();
    info!(path = %model_path.display(), "loading shelf-life model");
    let predictor = ExpiryPredictor::from_load(LookupShelfLifeModel::load_from_path(&model_path));

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, pool).with_predictor(predictor);
    let server = create_server(health_state.clone(), config)?;

    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("server terminated with an error")
}
