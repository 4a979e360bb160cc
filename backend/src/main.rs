//! Backend entry-point: loads settings, migrates the schema and serves the
//! users REST API with health probes and OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use users_backend::inbound::http::health::HealthState;
use users_backend::outbound::persistence::{DbPool, run_migrations};
use users_backend::settings::AppSettings;

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

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| startup_error("failed to load settings", e))?;
    let database_url = settings
        .database_url()
        .map_err(|e| startup_error("invalid settings", e))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| startup_error("invalid settings", e))?;

    run_migrations(database_url)
        .await
        .map_err(|e| startup_error("database migration failed", e))?;

    let pool_config = settings
        .pool_config()
        .map_err(|e| startup_error("invalid settings", e))?;
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|e| startup_error("failed to build database pool", e))?;

    let config =
        ServerConfig::new(bind_addr, pool).with_registration_age(settings.registration_age());
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;

    info!(
        %bind_addr,
        register_age = settings.register_age,
        "users backend listening"
    );
    server.await
}
