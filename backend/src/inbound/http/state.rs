//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DomainListingQuery, LoginService, RatingsCommand, RatingsQuery, StatsQuery, UsersQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub domains: Arc<dyn DomainListingQuery>,
    pub ratings: Arc<dyn RatingsCommand>,
    pub ratings_query: Arc<dyn RatingsQuery>,
    pub stats: Arc<dyn StatsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub domains: Arc<dyn DomainListingQuery>,
    pub ratings: Arc<dyn RatingsCommand>,
    pub ratings_query: Arc<dyn RatingsQuery>,
    pub stats: Arc<dyn StatsQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            users,
            domains,
            ratings,
            ratings_query,
            stats,
        } = ports;
        Self {
            login,
            users,
            domains,
            ratings,
            ratings_query,
            stats,
        }
    }
}
