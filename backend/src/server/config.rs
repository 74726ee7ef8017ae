//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use rating_backend::domain::ExportToken;
use rating_backend::inbound::http::session_config::SessionSettings;
use rating_backend::outbound::persistence::DbPool;

/// Everything [`super::create_server`] needs to build the application.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) export_token: ExportToken,
}

impl ServerConfig {
    /// Combine validated session settings with the listener and backing pool.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
            ephemeral: _,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool,
            export_token: ExportToken::disabled(),
        }
    }

    /// Guard the statistics endpoints with `token`.
    #[must_use]
    pub fn with_export_token(mut self, token: ExportToken) -> Self {
        self.export_token = token;
        self
    }
}
