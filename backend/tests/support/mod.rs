//! Shared helpers for the integration suites.

#![allow(dead_code, reason = "each suite uses a different subset of helpers")]

use std::path::PathBuf;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use pantry_backend::Trace;
use pantry_backend::domain::{ExpiryPredictor, TRACE_ID_HEADER};
use pantry_backend::inbound::http::configure;
use pantry_backend::inbound::http::health::HealthState;
use pantry_backend::outbound::model::LookupShelfLifeModel;
use pantry_backend::test_support::InMemoryStore;
use serde_json::Value;

/// Environment variable naming a disposable PostgreSQL database.
pub const TEST_DATABASE_URL: &str = "PANTRY_TEST_DATABASE_URL";

/// Path of the bundled shelf-life model artifact.
pub fn fixture_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("improved_shelf_life_model.json")
}

/// Predictor over the bundled artifact.
pub fn fixture_predictor() -> ExpiryPredictor {
    ExpiryPredictor::from_load(LookupShelfLifeModel::load_from_path(fixture_model_path()))
}

/// Database URL for Postgres-backed tests, or `None` to skip.
pub fn database_url_or_skip(suite: &str) -> Option<String> {
    match std::env::var(TEST_DATABASE_URL) {
        Ok(url) if !url.is_empty() => Some(url),
        _ => {
            eprintln!("SKIP-{suite}: {TEST_DATABASE_URL} is not set");
            None
        }
    }
}

/// Full route table with tracing, backed by `store`.
pub async fn init_app(
    store: &InMemoryStore,
    predictor: ExpiryPredictor,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    test::init_service(
        App::new()
            .app_data(health)
            .app_data(web::Data::new(store.http_state(predictor)))
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

/// Status, trace header and JSON body of a response.
pub struct Captured {
    pub status: u16,
    pub trace_id: Option<String>,
    pub body: Value,
}

pub async fn send<S, B>(app: &S, request: test::TestRequest) -> Captured
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status().as_u16();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    Captured {
        status,
        trace_id,
        body,
    }
}
