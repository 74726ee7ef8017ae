//! PostgreSQL-backed `RatingRepository` implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{RatingRepository, RatingRepositoryError};
use crate::domain::{Rating, RatingSubmission, UserId, WebDomainId};

use super::diesel_error_mapping::{DbFailure, classify_diesel_error, map_pool_error};
use super::models::{NewRatingRow, RatingChangeset, RatingRow};
use super::pool::{DbPool, PoolError};
use super::schema::ratings;

const DOMAIN_FOREIGN_KEY: &str = "ratings_domain_id_fkey";

/// Diesel-backed implementation of the rating repository port.
#[derive(Clone)]
pub struct DieselRatingRepository {
    pool: DbPool,
}

impl DieselRatingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> RatingRepositoryError {
    map_pool_error(error, RatingRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error, domain_id: WebDomainId) -> RatingRepositoryError {
    match classify_diesel_error(error) {
        DbFailure::Connection(message) => RatingRepositoryError::connection(message),
        DbFailure::Query(message) => RatingRepositoryError::query(message),
        DbFailure::UniqueViolation { .. } => RatingRepositoryError::duplicate(),
        DbFailure::ForeignKeyViolation { constraint } => {
            if constraint.as_deref() == Some(DOMAIN_FOREIGN_KEY) {
                RatingRepositoryError::domain_not_found(domain_id.get())
            } else {
                warn!(?constraint, "unexpected foreign key violation on ratings");
                RatingRepositoryError::query("foreign key violation")
            }
        }
    }
}

fn into_rating(row: RatingRow) -> Result<Rating, RatingRepositoryError> {
    row.into_rating().map_err(RatingRepositoryError::query)
}

#[async_trait]
impl RatingRepository for DieselRatingRepository {
    async fn find(
        &self,
        domain_id: &WebDomainId,
        user_id: &UserId,
    ) -> Result<Option<Rating>, RatingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<RatingRow> = ratings::table
            .filter(ratings::domain_id.eq(domain_id.get()))
            .filter(ratings::user_id.eq(user_id.get()))
            .select(RatingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel(err, *domain_id))?;

        row.map(into_rating).transpose()
    }

    async fn insert(
        &self,
        submission: &RatingSubmission,
        now: DateTime<Utc>,
    ) -> Result<Rating, RatingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: RatingRow = diesel::insert_into(ratings::table)
            .values(&NewRatingRow::from_submission(submission, now))
            .returning(RatingRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel(err, submission.domain_id()))?;

        into_rating(row)
    }

    async fn update(
        &self,
        submission: &RatingSubmission,
        now: DateTime<Utc>,
    ) -> Result<Option<Rating>, RatingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<RatingRow> = diesel::update(
            ratings::table
                .filter(ratings::domain_id.eq(submission.domain_id().get()))
                .filter(ratings::user_id.eq(submission.user_id().get())),
        )
        .set(&RatingChangeset::from_submission(submission, now))
        .returning(RatingRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| map_diesel(err, submission.domain_id()))?;

        row.map(into_rating).transpose()
    }
}
