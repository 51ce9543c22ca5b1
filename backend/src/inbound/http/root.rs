//! Service welcome document served at `/`.

use std::collections::BTreeMap;

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::inbound::http::state::HttpState;

const ENDPOINTS: [(&str, &str); 5] = [
    ("auth", "/auth"),
    ("pantry", "/pantry"),
    ("others", "/others"),
    ("prediction", "/prediction"),
    ("health", "/health"),
];

/// Welcome body listing the route groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    #[schema(example = "Welcome to the pantry API")]
    pub message: String,
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Swagger UI location; only mounted in debug builds.
    pub documentation: String,
    /// Whether expiry predictions can be served.
    pub predictions_available: bool,
    pub endpoints: BTreeMap<String, String>,
}

/// Welcome document.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome document", body = RootResponse)),
    tags = ["root"],
    operation_id = "root"
)]
#[get("/")]
pub async fn root(state: web::Data<HttpState>) -> web::Json<RootResponse> {
    web::Json(RootResponse {
        message: "Welcome to the pantry API".to_owned(),
        status: "healthy".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        documentation: "/docs".to_owned(),
        predictions_available: state.predictor.is_available(),
        endpoints: ENDPOINTS
            .iter()
            .map(|(name, path)| ((*name).to_owned(), (*path).to_owned()))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExpiryPredictor;
    use crate::inbound::http::test_utils::{TestStore, read_json};
    use actix_web::{App, test};
    use rstest::rstest;

    #[rstest]
    #[case(TestStore::default(), true)]
    #[case(TestStore::default().with_predictor(ExpiryPredictor::disabled("missing")), false)]
    #[actix_web::test]
    async fn lists_route_groups_and_model_state(#[case] store: TestStore, #[case] available: bool) {
        let app =
            test::init_service(App::new().app_data(store.http_state()).service(root)).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(response.status().is_success());

        let body = read_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["predictions_available"], available);
        assert_eq!(body["endpoints"]["pantry"], "/pantry");
        assert!(body["endpoints"].get("recipe").is_none());
    }
}
