//! Shared validation helpers for inbound HTTP adapters.
//!
//! Validation failures become `invalid_request` errors whose details name the
//! offending field, so clients can highlight it without parsing messages.

use actix_web::web;
use serde_json::json;

use crate::domain::{Error, Isbn, NewReview, ReviewValidationError};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::MalformedBody => "malformed_body",
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

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

pub(crate) fn invalid_field_error(field: FieldName, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": ErrorCode::InvalidValue.as_str(),
    }))
}

pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse the book key taken from a review path; unknown keys are left for
/// the service to answer as not found.
pub(crate) fn parse_book_key(value: &str, field: FieldName) -> Result<Isbn, Error> {
    Isbn::lookup_key(value).map_err(|err| invalid_field_error(field, err.to_string()))
}

/// Build a [`NewReview`], reporting the failing payload field.
pub(crate) fn parse_new_review(
    title: Option<String>,
    content: Option<String>,
    rating: Option<i32>,
) -> Result<NewReview, Error> {
    let title = require(title, FieldName::new("reviewTitle"))?;
    let content = require(content, FieldName::new("reviewContent"))?;
    let rating = require(rating, FieldName::new("rating"))?;
    NewReview::new(title, content, rating).map_err(|err: ReviewValidationError| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": err.field(),
            "code": ErrorCode::InvalidValue.as_str(),
        }))
    })
}

/// JSON extractor configuration reporting malformed bodies as `400`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed JSON body: {err}"))
            .with_details(json!({ "code": ErrorCode::MalformedBody.as_str() }))
            .into()
    })
}

/// Query string extractor configuration reporting bad parameters as `400`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid query string: {err}"))
            .with_details(json!({ "code": ErrorCode::InvalidValue.as_str() }))
            .into()
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode as ApiErrorCode;

    fn field_of(error: &Error) -> Option<&str> {
        error
            .details()
            .and_then(|details| details.get("field"))
            .and_then(|field| field.as_str())
    }

    #[rstest]
    #[case(None, Some("Content"), Some(4), "reviewTitle")]
    #[case(Some("Title"), None, Some(4), "reviewContent")]
    #[case(Some("Title"), Some("Content"), None, "rating")]
    fn missing_fields_are_named(
        #[case] title: Option<&str>,
        #[case] content: Option<&str>,
        #[case] rating: Option<i32>,
        #[case] field: &str,
    ) {
        let error = parse_new_review(
            title.map(str::to_owned),
            content.map(str::to_owned),
            rating,
        )
        .expect_err("missing field");
        assert_eq!(error.code(), ApiErrorCode::InvalidRequest);
        assert_eq!(field_of(&error), Some(field));
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    fn out_of_range_rating_names_rating_field(#[case] rating: i32) {
        let error = parse_new_review(
            Some("Title".to_owned()),
            Some("Content".to_owned()),
            Some(rating),
        )
        .expect_err("rating out of range");
        assert_eq!(field_of(&error), Some("rating"));
    }

    #[rstest]
    fn blank_title_names_title_field() {
        let error = parse_new_review(Some("  ".to_owned()), Some("Content".to_owned()), Some(3))
            .expect_err("blank title");
        assert_eq!(field_of(&error), Some("reviewTitle"));
    }

    #[rstest]
    fn blank_book_key_names_field() {
        let error = parse_book_key(" ", FieldName::new("isbn")).expect_err("blank");
        assert_eq!(field_of(&error), Some("isbn"));
    }

    #[rstest]
    #[case("42")]
    #[case("978-0596004651")]
    fn book_keys_are_not_format_checked(#[case] raw: &str) {
        let key = parse_book_key(raw, FieldName::new("isbn")).expect("non-blank key");
        assert_eq!(key.as_ref(), raw);
    }
}
