//! Driving port for the reviewer's domain list.

use async_trait::async_trait;

use crate::domain::{DomainListing, Error, ListingOptions, User};

/// Domain use-case port for paged domain listings.
#[async_trait]
pub trait DomainListingQuery: Send + Sync {
    /// List the domains of `user`'s subject with `user`'s own ratings.
    ///
    /// Users without a subject assignment are refused with `forbidden`.
    async fn list_domains(&self, user: &User, options: ListingOptions)
    -> Result<DomainListing, Error>;
}
