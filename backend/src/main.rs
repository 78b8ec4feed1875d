//! Users API entry-point: loads settings, prepares the user store and runs
//! the HTTP server.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use users_api::config::AppSettings;
use users_api::inbound::http::health::HealthState;
use users_api::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;

    let config = ServerConfig::new(settings.host(), settings.port())
        .with_action_log_delay(settings.action_log_delay())
        .with_cleanup_delay(settings.cleanup_delay());
    let config = if settings.in_memory {
        warn!("serving from the in-memory user store");
        config
    } else {
        config.with_db_pool(connect_database(&settings).await?)
    };
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start HTTP server")?;
    info!(
        host = settings.host(),
        port = settings.port(),
        "users API listening"
    );
    server.await.wrap_err("HTTP server terminated with an error")
}

/// Apply migrations and build the connection pool.
async fn connect_database(settings: &AppSettings) -> color_eyre::Result<DbPool> {
    let database_url = settings.database_url();
    run_pending_migrations(&database_url)
        .await
        .wrap_err("failed to prepare the users table")?;
    let pool = DbPool::new(
        PoolConfig::new(database_url)
            .with_max_size(settings.pool_max_size())
            .with_connection_timeout(settings.pool_connection_timeout()),
    )
    .await
    .wrap_err("failed to build database pool")?;
    info!("database connection established");
    Ok(pool)
}

#[cfg(feature = "metrics")]
fn make_metrics() -> color_eyre::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("users_api")
        .endpoint("/metrics")
        .build()
        .map_err(|err| eyre!("failed to configure Prometheus metrics: {err}"))
}
