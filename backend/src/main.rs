//! Backend entry-point: loads settings, prepares the database and serves the
//! REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;

use book_reviews::inbound::http::health::HealthState;
use book_reviews::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, JwtConfig, OpenLibraryConfig, ServerConfig, create_server};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

/// Resolve the bearer token secret; only debug builds may run without one.
fn jwt_config(settings: &AppSettings) -> std::io::Result<JwtConfig> {
    let issuer = settings.jwt_issuer.clone();
    let audience = settings.jwt_audience.clone();
    match settings.jwt_secret.as_deref() {
        Some(secret) if !secret.is_empty() => Ok(JwtConfig::new(secret, issuer, audience)),
        _ if cfg!(debug_assertions) => {
            warn!("BOOK_REVIEWS_JWT_SECRET unset; using a random secret (dev only)");
            Ok(JwtConfig::new(Uuid::new_v4().to_string(), issuer, audience))
        }
        _ => Err(std::io::Error::other(
            "BOOK_REVIEWS_JWT_SECRET must be set in release builds",
        )),
    }
}

async fn connect_database(settings: &AppSettings) -> std::io::Result<Option<DbPool>> {
    let Some(database_url) = settings.database_url.as_deref() else {
        return Ok(None);
    };
    if settings.run_migrations {
        let applied = run_pending_migrations(database_url)
            .await
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        info!(applied, "database migrations applied");
    }
    let mut pool_config = PoolConfig::new(database_url);
    if let Some(max_size) = settings.pool_max_size {
        pool_config = pool_config.with_max_size(max_size);
    }
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|err| std::io::Error::other(format!("create database pool: {err}")))?;
    Ok(Some(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let openlibrary = OpenLibraryConfig::from_settings(&settings)
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let mut config = ServerConfig::new(bind_addr, jwt_config(&settings)?, openlibrary);
    if let Some(pool) = connect_database(&settings).await? {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting book reviews server");
    create_server(health_state, config)?.await
}
