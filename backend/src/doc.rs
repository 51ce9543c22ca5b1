//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP handler under [`crate::inbound::http`] and
//! the schema wrappers that describe domain types without coupling them to
//! utoipa. The document backs Swagger UI in debug builds and is exported by
//! the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::auth::{LoginRequest, LoginResponse, SignupRequest};
use crate::inbound::http::health::ProbeResponse;
use crate::inbound::http::pantry::{
    PantryItemPayload, PantryItemRequest, PantryItemResponse, PantryItemsResponse,
};
use crate::inbound::http::prediction::PredictionResponse;
use crate::inbound::http::profile::{NameResponse, UpdateProfileRequest};
use crate::inbound::http::root::RootResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, MessageResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pantry backend API",
        description = "Accounts, pantry inventory and shelf-life based expiry prediction."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::root::root,
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::profile::get_name,
        crate::inbound::http::profile::update_profile,
        crate::inbound::http::profile::delete_profile,
        crate::inbound::http::pantry::add_item,
        crate::inbound::http::pantry::update_item,
        crate::inbound::http::pantry::delete_item,
        crate::inbound::http::pantry::get_items,
        crate::inbound::http::prediction::predict,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        MessageResponse,
        RootResponse,
        SignupRequest,
        LoginRequest,
        LoginResponse,
        NameResponse,
        UpdateProfileRequest,
        PantryItemPayload,
        PantryItemRequest,
        PantryItemResponse,
        PantryItemsResponse,
        PredictionResponse,
        ProbeResponse,
    )),
    tags(
        (name = "root", description = "Service welcome document"),
        (name = "auth", description = "Signup and login"),
        (name = "others", description = "Profile lookup, update and deletion"),
        (name = "pantry", description = "Pantry inventory"),
        (name = "prediction", description = "Expiry date prediction"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("code")]
    #[case("message")]
    #[case("traceId")]
    fn error_schema_has_envelope_fields(#[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, field);
    }

    #[rstest]
    #[case("/")]
    #[case("/auth/signup")]
    #[case("/auth/login")]
    #[case("/others/get-name")]
    #[case("/others/update-profile")]
    #[case("/others/delete-profile")]
    #[case("/pantry/add-item")]
    #[case("/pantry/update-item")]
    #[case("/pantry/delete-item")]
    #[case("/pantry/get-items")]
    #[case("/prediction/predict")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn item_schema_uses_camel_case_dates() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let item = schemas.get("PantryItemResponse").expect("item schema");

        assert_object_schema_has_field(item, "expiryDate");
        assert_object_schema_has_field(item, "addedDate");
    }
}
