//! Data API - Main entry point.
//!
//! Loads configuration, connects the database pool, and serves `GET /api/test1`
//! on a multi-threaded runtime with a fixed number of workers.

use clap::Parser;
use data_api::config::Config;
use data_api::models::DatabaseType;
use data_api::{AppState, ConnectionPool, HttpServer, QueryExecutor};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; the process environment still applies
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let config = Config::parse();
    init_tracing(&config);

    if !dotenv_loaded {
        info!("No .env file found, using process environment");
    }

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.workers)
        .enable_all()
        .build()?;

    runtime.block_on(run(config))
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        workers = config.workers,
        bind = %config.http_bind_addr(),
        "Starting data-api v{}",
        env!("CARGO_PKG_VERSION")
    );

    let connection_string = config.connection_string()?;
    match &config.database_url {
        Some(url) if !url.is_empty() => info!(
            db_type = ?DatabaseType::from_connection_string(url),
            "Connecting to database from DATABASE_URL"
        ),
        _ => {
            let descriptor = config.descriptor()?;
            info!(url = %descriptor.masked_connection_string(), "Connecting to database");
        }
    }

    // Startup cannot continue without the database
    let pool = match ConnectionPool::connect(&connection_string, &config.pool_options()).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, suggestion = ?e.suggestion(), "Failed to connect to database");
            return Err(e.into());
        }
    };

    let server_version = pool.server_version().await;
    info!(server_version = ?server_version, "Connected successfully");

    let state = AppState::new(QueryExecutor::new(pool));
    let server = HttpServer::new(state, &config.host, config.port);

    if let Err(e) = server.run().await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
