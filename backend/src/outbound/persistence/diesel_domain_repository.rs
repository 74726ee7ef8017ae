//! PostgreSQL-backed `DomainRepository` implementation.
//!
//! The listing left-joins `ratings` restricted to the requesting reviewer,
//! so each domain appears exactly once with that reviewer's rating or
//! `NULL`s.

use async_trait::async_trait;
use diesel::dsl::count_distinct;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageMeta};

use crate::domain::ports::{DomainRepository, DomainRepositoryError};
use crate::domain::{
    DomainListEntry, DomainListingRequest, DomainSort, SortOrder, SubjectCode, UserId,
};

use super::diesel_error_mapping::{map_basic_diesel_error, map_pool_error};
use super::models::{DomainRow, RatingRow};
use super::pool::{DbPool, PoolError};
use super::schema::{domains, ratings};

/// Diesel-backed implementation of the domain repository port.
#[derive(Clone)]
pub struct DieselDomainRepository {
    pool: DbPool,
}

impl DieselDomainRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> DomainRepositoryError {
    map_pool_error(error, DomainRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> DomainRepositoryError {
    map_basic_diesel_error(
        error,
        DomainRepositoryError::query,
        DomainRepositoryError::connection,
    )
}

fn to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

fn to_i64(value: u64) -> Result<i64, DomainRepositoryError> {
    i64::try_from(value).map_err(|_| DomainRepositoryError::query("page offset out of range"))
}

fn into_entry(
    (domain, rating): (DomainRow, Option<RatingRow>),
) -> Result<DomainListEntry, DomainRepositoryError> {
    let domain = domain.into_domain().map_err(DomainRepositoryError::query)?;
    let rating = rating
        .map(RatingRow::into_rating)
        .transpose()
        .map_err(DomainRepositoryError::query)?;
    Ok(DomainListEntry { domain, rating })
}

#[async_trait]
impl DomainRepository for DieselDomainRepository {
    async fn list_page(
        &self,
        request: &DomainListingRequest,
    ) -> Result<Page<DomainListEntry>, DomainRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let subject = request.subject_code.as_ref();
        let user_id = request.user_id.get();

        let total: i64 = domains::table
            .filter(domains::subject_code.eq(subject))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        let query = domains::table
            .left_join(
                ratings::table.on(ratings::domain_id
                    .eq(domains::id)
                    .and(ratings::user_id.eq(user_id))),
            )
            .filter(domains::subject_code.eq(subject))
            .select((DomainRow::as_select(), Option::<RatingRow>::as_select()))
            .into_boxed();

        let rated = ratings::id.nullable().is_not_null();
        let query = match (request.sort, request.order) {
            (DomainSort::Domain, _) => query.order_by((domains::domain.asc(), domains::id.asc())),
            (DomainSort::Status, SortOrder::Asc) => {
                query.order_by((rated.asc(), domains::domain.asc(), domains::id.asc()))
            }
            (DomainSort::Status, SortOrder::Desc) => {
                query.order_by((rated.desc(), domains::domain.asc(), domains::id.asc()))
            }
        };

        let rows: Vec<(DomainRow, Option<RatingRow>)> = query
            .limit(to_i64(request.page.limit())?)
            .offset(to_i64(request.page.offset())?)
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        let items = rows
            .into_iter()
            .map(into_entry)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, PageMeta::new(request.page, to_u64(total))))
    }

    async fn count_rated(
        &self,
        subject: &SubjectCode,
        user_id: &UserId,
    ) -> Result<u64, DomainRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rated: i64 = ratings::table
            .inner_join(domains::table)
            .filter(domains::subject_code.eq(subject.as_ref()))
            .filter(ratings::user_id.eq(user_id.get()))
            .select(count_distinct(ratings::domain_id))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(to_u64(rated))
    }
}
