//! Tests for error construction, trace capture, and the JSON envelope.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("Invalid credentials"), ErrorCode::Unauthorized)]
#[case(Error::not_found("User not found"), ErrorCode::NotFound)]
#[case(Error::conflict("User already exists"), ErrorCode::Conflict)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn try_new_rejects_empty_messages(#[case] message: &str) {
    let result = Error::try_new(ErrorCode::InvalidRequest, message);
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move {
        Error::try_new(ErrorCode::InternalError, "boom")
            .expect("validation accepts non-empty message")
    })
    .await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[tokio::test]
async fn deserialising_keeps_payload_trace_over_ambient_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let payload = json!({ "code": "not_found", "message": "Item not found" });

    let error: Error = TraceId::scope(trace_id, async move {
        serde_json::from_value(payload).expect("valid payload deserialises")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[rstest]
fn serialises_camel_case_envelope(expected_trace_id: String) {
    let error = Error::conflict("Item already exists")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "field": "id" }));

    let value = serde_json::to_value(&error).expect("error serialises");

    assert_eq!(
        value,
        json!({
            "code": "conflict",
            "message": "Item already exists",
            "traceId": expected_trace_id,
            "details": { "field": "id" },
        })
    );
}

#[rstest]
fn serialisation_omits_absent_optional_fields() {
    let value = serde_json::to_value(Error::unauthorized("Invalid credentials"))
        .expect("error serialises");
    assert_eq!(
        value,
        json!({ "code": "unauthorized", "message": "Invalid credentials" })
    );
}

#[rstest]
fn deserialising_rejects_blank_message() {
    let payload = json!({ "code": "invalid_request", "message": " " });
    let result = serde_json::from_value::<Error>(payload);
    assert!(result.is_err());
}

#[rstest]
fn display_uses_message() {
    assert_eq!(Error::not_found("Item not found").to_string(), "Item not found");
}
