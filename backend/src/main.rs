//! User directory entry-point: loads settings, migrates the schema, and
//! serves the HTTP endpoints.

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::OrthoConfig as _;
use prometheus::Registry;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use userdir::middleware::LatencyHistogram;
use userdir::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, apply_migrations,
};
use userdir::outbound::views::MiniJinjaViewRenderer;
use userdir::server::{ServerConfig, create_server};
use userdir::settings::{DatabaseSettings, ServerSettings};

fn startup_error(context: &str, error: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {error}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = [OsString::from("userdir")];
    let db_settings = DatabaseSettings::load_from_iter(args.clone())
        .map_err(|e| startup_error("failed to load database settings", e))?;
    let server_settings = ServerSettings::load_from_iter(args)
        .map_err(|e| startup_error("failed to load server settings", e))?;
    let database_url = db_settings
        .database_url()
        .map_err(|e| startup_error("invalid database settings", e))?;

    let migration_url = database_url.clone();
    let applied = tokio::task::spawn_blocking(move || apply_migrations(&migration_url))
        .await
        .map_err(|e| startup_error("migration task failed", e))?
        .map_err(|e| startup_error("schema migration failed", e))?;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(server_settings.pool_max_size()),
    )
    .await
    .map_err(|e| startup_error("failed to build connection pool", e))?;

    let views = MiniJinjaViewRenderer::open(server_settings.templates_dir())
        .map_err(|e| startup_error("failed to open templates directory", e))?;

    let metrics = if server_settings.metrics_enabled {
        let histogram = LatencyHistogram::new(Registry::new())
            .map_err(|e| startup_error("metrics registration failed", e))?;
        Some(histogram)
    } else {
        None
    };

    let config = ServerConfig::new(
        server_settings.bind_addr(),
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(views),
    )
    .with_metrics(metrics);

    info!(bind_addr = %config.bind_addr(), "starting user directory");
    create_server(config)?.await
}
