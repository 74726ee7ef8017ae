//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod auth;
pub mod domains;
pub mod error;
pub mod health;
pub mod ratings;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
pub mod stats;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register the `/api/v1` handlers and their extractor configuration.
///
/// The caller mounts this under a scope that already carries the session
/// middleware and provides [`state::HttpState`] as app data.
pub fn api_services(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .app_data(validation::path_config())
        .service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(domains::list_domains)
        .service(ratings::get_rating)
        .service(ratings::submit_rating)
        .service(stats::get_stats)
        .service(stats::export_subject)
        .service(stats::export_all);
}
