//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities used by the API and persistence
//! layers, and the services that implement the driving ports. Types are
//! immutable; invariants and serialisation contracts are documented on each
//! type.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifiers.
//! - User / SubjectCode: reviewer identity and subject assignment.
//! - WebDomain: a website awaiting review.
//! - Rating / RatingScores: a reviewer's scores for one domain.
//! - DomainListing: a page of domains with the reviewer's ratings.
//! - StatsReport / CsvExport: aggregate progress and exports.

pub mod auth;
pub mod error;
pub mod export;
pub mod export_token;
pub mod listing;
pub mod listing_service;
pub mod ports;
pub mod rating;
pub mod rating_service;
pub mod stats;
pub mod stats_service;
pub mod trace_id;
pub mod user;
pub mod user_service;
pub mod web_domain;

pub use self::auth::{LoginCredentials, LoginValidationError, PasswordDigest, PasswordDigestError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::export::{CsvExport, ExportRating, ExportRow, ExportScope, UTF8_BOM};
pub use self::export_token::{ExportToken, TokenCheck};
pub use self::listing::{
    DomainListEntry, DomainListing, DomainListingRequest, DomainSort, ListingOptions, SortOrder,
    UnknownSortValue,
};
pub use self::listing_service::DomainListingService;
pub use self::rating::{
    Rating, RatingScores, RatingSubmission, RatingValidationError, SCORE_MAX, SCORE_MIN, Score,
    ScoreField, normalise_remark,
};
pub use self::rating_service::RatingService;
pub use self::stats::{StatsReport, SubjectStats, completion_percentage};
pub use self::stats_service::StatsService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{SubjectCode, User, UserId, UserValidationError, Username};
pub use self::user_service::UserService;
pub use self::web_domain::{InvalidWebDomainId, WebDomain, WebDomainId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use rating_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
