//! Driving port for writing ratings.

use async_trait::async_trait;

use crate::domain::{Error, Rating, RatingSubmission};

/// Domain use-case port for the rating upsert.
#[async_trait]
pub trait RatingsCommand: Send + Sync {
    /// Insert or replace the submitter's rating for the domain.
    ///
    /// After any number of calls exactly one rating exists per
    /// (domain, user) pair, reflecting the latest submission.
    async fn submit_rating(&self, submission: RatingSubmission) -> Result<Rating, Error>;
}
