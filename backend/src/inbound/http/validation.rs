//! Shared validation helpers for inbound HTTP adapters.
//!
//! Field-level failures share one JSON shape:
//! `{"code": "invalid_request", "message": ..., "details": {"field", "code", "value"?}}`.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use pagination::PageRequestError;
use serde_json::json;

use crate::domain::{Error, RatingValidationError, UnknownSortValue};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
    OutOfRange,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::OutOfRange => "out_of_range",
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

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code,
        }))
    }

    fn with_value(self, code: &str, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code,
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField.as_str())
}

pub(crate) fn invalid_value_error(field: FieldName, message: String, value: &str) -> Error {
    ValidationError::new(field.as_str(), message)
        .with_value(ErrorCode::InvalidValue.as_str(), value)
}

/// Map score validation failures, keeping missing and out-of-range apart.
pub(crate) fn rating_validation_error(error: RatingValidationError) -> Error {
    ValidationError::new(error.field().as_str(), error.to_string()).with_code(error.reason())
}

pub(crate) fn sort_value_error(error: UnknownSortValue) -> Error {
    let UnknownSortValue { parameter, value } = error;
    ValidationError::new(parameter, format!("unsupported {parameter} value"))
        .with_value(ErrorCode::InvalidValue.as_str(), value)
}

pub(crate) fn page_request_error(error: PageRequestError) -> Error {
    let field = match error {
        PageRequestError::ZeroPage => "page",
        PageRequestError::ZeroPageSize | PageRequestError::PageSizeTooLarge { .. } => "pageSize",
    };
    ValidationError::new(field, error.to_string()).with_code(ErrorCode::OutOfRange.as_str())
}

fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(%error, "rejected JSON payload");
    let message = match &error {
        JsonPayloadError::ContentType => "expected an application/json body".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("malformed JSON body: {inner}"),
        other => format!("invalid JSON body: {other}"),
    };
    Error::invalid_request(message).into()
}

fn query_error_handler(error: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(%error, "rejected query string");
    Error::invalid_request(format!("invalid query string: {error}")).into()
}

fn path_error_handler(error: PathError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(%error, "rejected path parameters");
    Error::invalid_request(format!("invalid path parameter: {error}")).into()
}

/// Extractor configuration rendering malformed input as domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// See [`json_config`].
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

/// See [`json_config`].
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}
