//! Port for rating persistence.
//!
//! The repository offers separate insert and update operations; the
//! service decides which to call after a lookup. A unique constraint on
//! `(domain_id, user_id)` backs the lookup, and adapters report a losing
//! insert race as [`RatingRepositoryError::Duplicate`] so the caller can
//! retry as an update.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Rating, RatingSubmission, UserId, WebDomainId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by rating repository adapters.
    pub enum RatingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "rating repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "rating repository query failed: {message}",
        /// The referenced domain does not exist.
        DomainNotFound { domain_id: i32 } => "domain {domain_id} not found",
        /// A rating for the (domain, user) pair already exists.
        Duplicate => "rating already exists for this domain and user",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Fetch the rating `user_id` gave `domain_id`, if any.
    async fn find(
        &self,
        domain_id: &WebDomainId,
        user_id: &UserId,
    ) -> Result<Option<Rating>, RatingRepositoryError>;

    /// Insert a new rating with `created_at = updated_at = now`.
    async fn insert(
        &self,
        submission: &RatingSubmission,
        now: DateTime<Utc>,
    ) -> Result<Rating, RatingRepositoryError>;

    /// Overwrite scores and remark of the existing rating and set
    /// `updated_at = now`. Returns `None` when no row matched.
    async fn update(
        &self,
        submission: &RatingSubmission,
        now: DateTime<Utc>,
    ) -> Result<Option<Rating>, RatingRepositoryError>;
}
