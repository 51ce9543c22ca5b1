//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns an `invalid_request` [`Error`] whose `details` carry
//! the offending field and a stable machine-readable code.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use serde_json::json;
use tracing::debug;

use crate::domain::{
    CredentialsValidationError, Error, PantryItemValidationError, UserId, UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingBody,
    MissingField,
    InvalidField,
    InvalidQuery,
    InvalidBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingBody => "missing_body",
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidField => "invalid_field",
            ErrorCode::InvalidQuery => "invalid_query",
            ErrorCode::InvalidBody => "invalid_body",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const USER_ID: FieldName = FieldName::new("user_id");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");
pub(crate) const DISPLAY_NAME: FieldName = FieldName::new("display_name");

/// Request body was absent or not valid JSON.
pub(crate) fn missing_body_error(message: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "code": ErrorCode::MissingBody.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName, message: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": ErrorCode::MissingField.as_str(),
    }))
}

pub(crate) fn invalid_field_error(field: FieldName, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": ErrorCode::InvalidField.as_str(),
    }))
}

/// `QueryConfig` error handler: malformed query strings get the JSON envelope.
pub(crate) fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "query string rejected");
    Error::invalid_request("Invalid query string")
        .with_details(json!({
            "code": ErrorCode::InvalidQuery.as_str(),
            "reason": err.to_string(),
        }))
        .into()
}

/// `JsonConfig` error handler for bodies extracted without `Option`.
pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "request body rejected");
    Error::invalid_request("Invalid request body")
        .with_details(json!({
            "code": ErrorCode::InvalidBody.as_str(),
            "reason": err.to_string(),
        }))
        .into()
}

/// Non-empty value of an optional string parameter.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.is_empty())
}

/// Parse the `user_id` query parameter.
///
/// Absent or blank values report `missing_message`.
pub(crate) fn require_user_id(raw: Option<&str>, missing_message: &str) -> Result<UserId, Error> {
    let raw = raw.ok_or_else(|| missing_field_error(USER_ID, missing_message))?;
    UserId::new(raw).map_err(|err| match err {
        UserValidationError::EmptyId => missing_field_error(USER_ID, missing_message),
        other => invalid_field_error(USER_ID, other.to_string()),
    })
}

/// Map credential validation failures; blank inputs share one message.
pub(crate) fn map_credentials_error(err: CredentialsValidationError) -> Error {
    const MISSING: &str = "Missing required fields";
    match err {
        CredentialsValidationError::EmptyPassword => missing_field_error(PASSWORD, MISSING),
        CredentialsValidationError::User(UserValidationError::EmptyId) => {
            missing_field_error(USER_ID, MISSING)
        }
        CredentialsValidationError::User(
            other @ UserValidationError::DisplayNameTooLong { .. },
        ) => invalid_field_error(DISPLAY_NAME, other.to_string()),
        CredentialsValidationError::User(other) => invalid_field_error(USER_ID, other.to_string()),
    }
}

/// Map item validation failures onto the JSON field that caused them.
pub(crate) fn map_item_error(err: PantryItemValidationError) -> Error {
    let field = match &err {
        PantryItemValidationError::EmptyId | PantryItemValidationError::IdTooLong { .. } => "id",
        PantryItemValidationError::EmptyName | PantryItemValidationError::NameTooLong { .. } => {
            "name"
        }
        PantryItemValidationError::UnitTooLong { .. } => "unit",
        PantryItemValidationError::CategoryTooLong { .. } => "category",
        PantryItemValidationError::NonFiniteQuantity => "quantity",
        PantryItemValidationError::InvalidDate { field, .. } => *field,
    };
    invalid_field_error(FieldName::new(field), err.to_string())
}
