//! OpenAPI schema definitions for the domain error payload.
//!
//! [`crate::domain::Error`] serialises through a private DTO, so its schema is
//! registered here through wrappers that mirror the wire shape.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The review content did not pass the quality check.
    #[schema(rename = "bad_review_quality")]
    BadReviewQuality,
    /// Bearer token missing or invalid.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but lacking the required role.
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    /// The `Accept` header rules out JSON.
    #[schema(rename = "not_acceptable")]
    NotAcceptable,
    /// A database or upstream dependency is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "bad_review_quality")]
    code: ErrorCodeSchema,
    #[schema(example = "review content does not meet quality standards")]
    message: String,
    /// Identifier echoed in the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Structured context such as the offending field.
    details: Option<serde_json::Value>,
}
