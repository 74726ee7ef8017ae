//! Port for reading domains joined with a reviewer's ratings.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{DomainListEntry, DomainListingRequest, SubjectCode, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by domain repository adapters.
    pub enum DomainRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "domain repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "domain repository query failed: {message}",
    }
}

/// Read access to the `domains` table for listing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// One page of the subject's domains, each left-joined with the
    /// requesting reviewer's rating, plus the subject's total domain count.
    ///
    /// Ordering follows `request.sort`/`request.order` with host name and id
    /// as ascending tie-breakers. An offset past the end yields an empty page.
    async fn list_page(
        &self,
        request: &DomainListingRequest,
    ) -> Result<Page<DomainListEntry>, DomainRepositoryError>;

    /// Distinct domains of `subject` that `user_id` has rated.
    async fn count_rated(
        &self,
        subject: &SubjectCode,
        user_id: &UserId,
    ) -> Result<u64, DomainRepositoryError>;
}
