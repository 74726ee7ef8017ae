//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their corresponding
//! domain types but live in the inbound adapter layer where framework
//! concerns belong.

#![expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The database is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "relevance must be between 1 and 10, got 0")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "6f1c2b1e-8a52-4c3e-9d5e-2a1b3c4d5e6f")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field": "relevance", "code": "score_out_of_range"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
pub struct UserSchema {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "teacher1")]
    username: String,
    /// Subject the reviewer rates; `null` when unassigned.
    #[schema(example = "MATH")]
    subject_code: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Rating`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Rating, rename_all = "camelCase")]
pub struct RatingSchema {
    #[schema(example = 12)]
    domain_id: i32,
    #[schema(minimum = 1, maximum = 10, example = 8)]
    relevance: u8,
    #[schema(minimum = 1, maximum = 10, example = 5)]
    popularity: u8,
    #[schema(minimum = 1, maximum = 10, example = 7)]
    professionalism: u8,
    remark: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

/// OpenAPI schema for [`crate::domain::DomainListEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DomainListEntry, rename_all = "camelCase")]
pub struct DomainListEntrySchema {
    id: i32,
    #[schema(example = "example.edu")]
    domain: String,
    #[schema(example = "MATH")]
    subject_code: String,
    /// Stored URL value; may hold several comma-separated URLs.
    url: String,
    /// `url` split on commas.
    urls: Vec<String>,
    /// The caller's own rating, `null` when not yet rated.
    rating: Option<RatingSchema>,
}

/// OpenAPI schema for [`pagination::PageMeta`].
#[derive(ToSchema)]
#[schema(as = pagination::PageMeta, rename_all = "camelCase")]
pub struct PageMetaSchema {
    total: u64,
    page: u32,
    page_size: u32,
    total_pages: u64,
}

/// OpenAPI schema for [`crate::domain::DomainListing`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DomainListing, rename_all = "camelCase")]
pub struct DomainListingSchema {
    domains: Vec<DomainListEntrySchema>,
    pagination: PageMetaSchema,
    /// Domains of the subject the caller has rated, across all pages.
    total_rated: u64,
}

/// OpenAPI schema for [`crate::domain::SubjectStats`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SubjectStats, rename_all = "camelCase")]
pub struct SubjectStatsSchema {
    #[schema(example = "MATH")]
    subject_code: String,
    total_domains: u64,
    /// Domains with at least one rating from any reviewer.
    rated_domains: u64,
    #[schema(example = 33.33)]
    completion_percentage: f64,
}

/// OpenAPI schema for [`crate::domain::StatsReport`].
#[derive(ToSchema)]
#[schema(as = crate::domain::StatsReport)]
pub struct StatsReportSchema {
    stats: Vec<SubjectStatsSchema>,
}
