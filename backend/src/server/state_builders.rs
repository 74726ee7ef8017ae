//! Builds the HTTP state from Diesel-backed repositories.

use std::sync::Arc;

use rating_backend::domain::{DomainListingService, RatingService, StatsService, UserService};
use rating_backend::inbound::http::state::{HttpState, HttpStatePorts};
use rating_backend::outbound::persistence::{
    DieselDomainRepository, DieselRatingRepository, DieselStatsRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Wire every driving port to its service over the shared pool.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let pool = &config.db_pool;
    let users = Arc::new(UserService::new(Arc::new(DieselUserRepository::new(
        pool.clone(),
    ))));
    let ratings = Arc::new(RatingService::new(Arc::new(DieselRatingRepository::new(
        pool.clone(),
    ))));
    let domains = Arc::new(DomainListingService::new(Arc::new(
        DieselDomainRepository::new(pool.clone()),
    )));
    let stats = Arc::new(StatsService::new(
        Arc::new(DieselStatsRepository::new(pool.clone())),
        config.export_token.clone(),
    ));

    HttpState::new(HttpStatePorts {
        login: users.clone(),
        users,
        domains,
        ratings: ratings.clone(),
        ratings_query: ratings,
        stats,
    })
}
