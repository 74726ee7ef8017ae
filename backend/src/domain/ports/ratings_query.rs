//! Driving port for reading a reviewer's own rating.

use async_trait::async_trait;

use crate::domain::{Error, Rating, UserId, WebDomainId};

/// Domain use-case port for rating lookups.
#[async_trait]
pub trait RatingsQuery: Send + Sync {
    /// The rating `user_id` gave `domain_id`, or `None`.
    async fn find_rating(
        &self,
        domain_id: &WebDomainId,
        user_id: &UserId,
    ) -> Result<Option<Rating>, Error>;
}
