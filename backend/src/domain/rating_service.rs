//! Rating services: lookup and upsert.
//!
//! The upsert looks up the existing rating for the (domain, user) pair and
//! then either updates or inserts. Two concurrent first submissions can
//! both see "absent"; the storage unique constraint makes the loser's insert
//! fail with [`RatingRepositoryError::Duplicate`], which is retried as an
//! update so exactly one row survives.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::warn;

use crate::domain::ports::{RatingRepository, RatingRepositoryError, RatingsCommand, RatingsQuery};
use crate::domain::{Error, Rating, RatingSubmission, UserId, WebDomainId};

/// Implements [`RatingsCommand`] and [`RatingsQuery`].
#[derive(Clone)]
pub struct RatingService<R> {
    ratings: Arc<R>,
}

impl<R> RatingService<R> {
    /// Create a new service over the given repository.
    pub fn new(ratings: Arc<R>) -> Self {
        Self { ratings }
    }
}

impl<R> RatingService<R>
where
    R: RatingRepository,
{
    fn map_repository_error(error: RatingRepositoryError) -> Error {
        match error {
            RatingRepositoryError::Connection { message } => {
                warn!(%message, "rating repository unavailable");
                Error::service_unavailable("rating repository unavailable")
            }
            RatingRepositoryError::Query { message } => {
                Error::internal(format!("rating repository error: {message}"))
            }
            RatingRepositoryError::DomainNotFound { domain_id } => {
                Error::not_found(format!("domain {domain_id} not found"))
                    .with_details(json!({ "domainId": domain_id }))
            }
            RatingRepositoryError::Duplicate => {
                Error::internal("rating changed concurrently; please retry")
            }
        }
    }

    async fn update_existing(&self, submission: &RatingSubmission) -> Result<Rating, Error> {
        self.ratings
            .update(submission, Utc::now())
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::internal("rating vanished during update"))
    }
}

#[async_trait]
impl<R> RatingsCommand for RatingService<R>
where
    R: RatingRepository,
{
    async fn submit_rating(&self, submission: RatingSubmission) -> Result<Rating, Error> {
        let existing = self
            .ratings
            .find(&submission.domain_id(), &submission.user_id())
            .await
            .map_err(Self::map_repository_error)?;

        if existing.is_some() {
            return self.update_existing(&submission).await;
        }

        match self.ratings.insert(&submission, Utc::now()).await {
            Ok(rating) => Ok(rating),
            Err(RatingRepositoryError::Duplicate) => {
                tracing::debug!(
                    domain_id = submission.domain_id().get(),
                    user_id = submission.user_id().get(),
                    "rating insert lost a race; updating instead"
                );
                self.update_existing(&submission).await
            }
            Err(other) => Err(Self::map_repository_error(other)),
        }
    }
}

#[async_trait]
impl<R> RatingsQuery for RatingService<R>
where
    R: RatingRepository,
{
    async fn find_rating(
        &self,
        domain_id: &WebDomainId,
        user_id: &UserId,
    ) -> Result<Option<Rating>, Error> {
        self.ratings
            .find(domain_id, user_id)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[cfg(test)]
#[path = "rating_service_tests.rs"]
mod tests;
