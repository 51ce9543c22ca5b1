//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn body_of(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error JSON");
    (status, header, body)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(trace_id: String) {
    let error = Error::internal("connection refused by 10.0.0.3")
        .with_trace_id(trace_id.clone())
        .with_details(json!({"sql": "SELECT 1"}));

    let (status, header, body) = body_of(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body,
        json!({
            "code": "internal_error",
            "message": INTERNAL_ERROR_MESSAGE,
            "traceId": trace_id,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details(trace_id: String) {
    let error = Error::invalid_request("Missing user_id")
        .with_trace_id(trace_id)
        .with_details(json!({"field": "user_id", "code": "missing_field"}));

    let (status, header, body) = body_of(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body.get("message"), Some(&json!("Missing user_id")));
    assert_eq!(
        body.pointer("/details/code").and_then(Value::as_str),
        Some("missing_field")
    );
}

#[rstest]
#[actix_web::test]
async fn missing_trace_id_omits_header() {
    let (_, header, body) = body_of(&Error::not_found("User not found")).await;

    assert!(header.is_none());
    assert!(body.get("traceId").is_none());
}

#[rstest]
fn actix_errors_become_redacted_internal_errors() {
    let actix_error = actix_web::error::ErrorBadGateway("upstream secret");
    let error = Error::from(actix_error);

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), INTERNAL_ERROR_MESSAGE);
}
