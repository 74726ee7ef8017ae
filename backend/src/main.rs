//! Backend entry-point: loads settings, migrates the database and serves the API.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use rating_backend::domain::ExportToken;
use rating_backend::inbound::http::health::HealthState;
use rating_backend::inbound::http::session_config::fingerprint::key_fingerprint;
use rating_backend::inbound::http::session_config::{BuildMode, SessionInputs, session_settings};
use rating_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use rating_backend::settings::RaterSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = RaterSettings::load_from_iter(std::env::args_os())
        .map_err(|err| io::Error::other(format!("failed to load settings: {err}")))?;

    let session = session_settings(
        &SessionInputs::from(&settings),
        BuildMode::from_debug_assertions(),
    )
    .map_err(io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        ephemeral = session.ephemeral,
        "session key loaded"
    );

    let database_url = settings.database_url().map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    run_pending_migrations(database_url)
        .await
        .map_err(io::Error::other)?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
    )
    .await
    .map_err(io::Error::other)?;

    let export_token = ExportToken::new(settings.export_token.as_deref());
    match export_token.fingerprint() {
        Some(fingerprint) => info!(fingerprint, "export token configured"),
        None => warn!("no export token configured; statistics endpoints answer 403"),
    }

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(session, bind_addr, pool).with_export_token(export_token);
    let server = create_server(health_state, config)?;
    server.await
}
