//! Domain listing service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{DomainListingQuery, DomainRepository, DomainRepositoryError};
use crate::domain::{DomainListing, DomainListingRequest, Error, ListingOptions, User};

/// Implements [`DomainListingQuery`] over a [`DomainRepository`].
#[derive(Clone)]
pub struct DomainListingService<R> {
    domains: Arc<R>,
}

impl<R> DomainListingService<R> {
    /// Create a new service over the given repository.
    pub fn new(domains: Arc<R>) -> Self {
        Self { domains }
    }
}

fn map_repository_error(error: DomainRepositoryError) -> Error {
    match error {
        DomainRepositoryError::Connection { message } => {
            warn!(%message, "domain repository unavailable");
            Error::service_unavailable("domain repository unavailable")
        }
        DomainRepositoryError::Query { message } => {
            Error::internal(format!("domain repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> DomainListingQuery for DomainListingService<R>
where
    R: DomainRepository,
{
    async fn list_domains(
        &self,
        user: &User,
        options: ListingOptions,
    ) -> Result<DomainListing, Error> {
        let Some(subject_code) = user.subject_code() else {
            return Err(Error::forbidden("no subject assigned to this user"));
        };

        let request = DomainListingRequest {
            subject_code: subject_code.clone(),
            user_id: user.id(),
            page: options.page,
            sort: options.sort,
            order: options.order,
        };

        let page = self
            .domains
            .list_page(&request)
            .await
            .map_err(map_repository_error)?;
        let total_rated = self
            .domains
            .count_rated(&request.subject_code, &request.user_id)
            .await
            .map_err(map_repository_error)?;

        Ok(DomainListing::new(page, total_rated))
    }
}
