//! Resolved configuration handed to [`super::create_server`].

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use galleta::inbound::http::session_config::SessionSettings;
use galleta::outbound::persistence::DbPool;

/// Everything the server needs once settings and secrets are resolved.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) upload_dir: PathBuf,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Combine session settings with the listener address and upload directory.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, upload_dir: PathBuf) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            upload_dir,
            db_pool: None,
        }
    }

    /// Back the repositories with PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
