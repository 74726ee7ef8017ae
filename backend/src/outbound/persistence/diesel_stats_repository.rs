//! PostgreSQL-backed `StatsRepository` implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use diesel::dsl::{count, count_distinct};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StatsRepository, StatsRepositoryError};
use crate::domain::{ExportRating, ExportRow, ExportScope, SubjectCode, SubjectStats};

use super::diesel_error_mapping::{map_basic_diesel_error, map_pool_error};
use super::models::{DomainRow, RatingRow};
use super::pool::{DbPool, PoolError};
use super::schema::{domains, ratings, users};

/// Diesel-backed implementation of the statistics repository port.
#[derive(Clone)]
pub struct DieselStatsRepository {
    pool: DbPool,
}

impl DieselStatsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> StatsRepositoryError {
    map_pool_error(error, StatsRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> StatsRepositoryError {
    map_basic_diesel_error(
        error,
        StatsRepositoryError::query,
        StatsRepositoryError::connection,
    )
}

fn to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

/// Join per-subject totals with per-subject rated counts.
fn merge_counts(
    totals: Vec<(String, i64)>,
    rated: Vec<(String, i64)>,
) -> Result<Vec<SubjectStats>, StatsRepositoryError> {
    let rated: BTreeMap<String, i64> = rated.into_iter().collect();
    totals
        .into_iter()
        .map(|(subject, total)| {
            let rated_count = rated.get(&subject).copied().unwrap_or_default();
            let code = SubjectCode::new(&subject).map_err(|err| {
                StatsRepositoryError::query(format!("invalid subject `{subject}`: {err}"))
            })?;
            Ok(SubjectStats::new(code, to_u64(total), to_u64(rated_count)))
        })
        .collect()
}

type ExportRecord = (DomainRow, Option<RatingRow>, Option<String>);

fn into_export_row(
    (domain, rating, rater): ExportRecord,
) -> Result<ExportRow, StatsRepositoryError> {
    let domain = domain.into_domain().map_err(StatsRepositoryError::query)?;
    let rating = rating
        .map(RatingRow::into_rating)
        .transpose()
        .map_err(StatsRepositoryError::query)?
        .map(|rating| ExportRating {
            rater: rater.unwrap_or_default(),
            scores: rating.scores(),
            remark: rating.remark().map(str::to_owned),
            rated_at: rating.updated_at(),
        });
    Ok(ExportRow {
        subject_code: domain.subject_code().clone(),
        domain: domain.domain().to_owned(),
        url: domain.url().to_owned(),
        rating,
    })
}

#[async_trait]
impl StatsRepository for DieselStatsRepository {
    async fn subject_stats(&self) -> Result<Vec<SubjectStats>, StatsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let totals: Vec<(String, i64)> = domains::table
            .group_by(domains::subject_code)
            .select((domains::subject_code, count(domains::id)))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        let rated: Vec<(String, i64)> = domains::table
            .inner_join(ratings::table)
            .group_by(domains::subject_code)
            .select((domains::subject_code, count_distinct(domains::id)))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        merge_counts(totals, rated)
    }

    async fn export_rows(
        &self,
        scope: &ExportScope,
    ) -> Result<Vec<ExportRow>, StatsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let mut query = domains::table
            .left_join(ratings::table.on(ratings::domain_id.eq(domains::id)))
            .left_join(users::table.on(users::id.eq(ratings::user_id)))
            .select((
                DomainRow::as_select(),
                Option::<RatingRow>::as_select(),
                users::username.nullable(),
            ))
            .order_by((
                domains::subject_code.asc(),
                domains::domain.asc(),
                domains::id.asc(),
                ratings::id.nullable().asc(),
            ))
            .into_boxed();

        if let Some(subject) = scope.subject() {
            query = query.filter(domains::subject_code.eq(subject.as_ref().to_owned()));
        }

        let records: Vec<ExportRecord> = query.load(&mut conn).await.map_err(map_diesel)?;
        records.into_iter().map(into_export_row).collect()
    }
}
