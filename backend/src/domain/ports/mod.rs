//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `*Command`, `LoginService`) are what inbound
//! adapters call. Driven ports (`*Repository`) are implemented by outbound
//! adapters and consumed by the domain services.

mod macros;
pub(crate) use macros::define_port_error;

mod domain_listing_query;
mod domain_repository;
mod login_service;
mod rating_repository;
mod ratings_command;
mod ratings_query;
mod stats_query;
mod stats_repository;
mod user_repository;
mod users_query;

pub use domain_listing_query::DomainListingQuery;
#[cfg(test)]
pub use domain_repository::MockDomainRepository;
pub use domain_repository::{DomainRepository, DomainRepositoryError};
pub use login_service::LoginService;
#[cfg(test)]
pub use rating_repository::MockRatingRepository;
pub use rating_repository::{RatingRepository, RatingRepositoryError};
pub use ratings_command::RatingsCommand;
pub use ratings_query::RatingsQuery;
pub use stats_query::StatsQuery;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
pub use stats_repository::{StatsRepository, StatsRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredCredentials, UserPersistenceError, UserRepository};
pub use users_query::UsersQuery;
