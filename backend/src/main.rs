//! Galleta entry point: loads settings, prepares storage, and serves the API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use galleta::inbound::http::health::HealthState;
use galleta::inbound::http::session_config::{BuildMode, session_settings_from_env};
use galleta::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Connect to PostgreSQL, bringing the schema up to date first.
async fn connect_database(settings: &AppSettings, url: &str) -> std::io::Result<DbPool> {
    run_pending_migrations(url)
        .await
        .map_err(std::io::Error::other)?;

    let pool_config = PoolConfig::new(url).with_max_size(settings.db_max_connections());
    DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(
        session,
        settings.bind_addr(),
        settings.upload_dir().to_path_buf(),
    );
    if let Some(url) = settings.database_url() {
        config = config.with_db_pool(connect_database(&settings, url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(addr = %settings.bind_addr(), "galleta listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
