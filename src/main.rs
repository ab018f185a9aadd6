//! Service entry point.
//!
//! 1. Loads `.env` and the environment into [`Config`].
//! 2. Connects to Postgres, makes sure the orders table exists, and checks
//!    Redis. An unreachable Redis only degrades caching.
//! 3. Starts the [`SalesSystem`] and serves the HTTP API until Ctrl+C or SIGTERM.
//! 4. Stops accepting requests, then drains the job queue and stops the actors.

use anyhow::Context;
use sales_service::api;
use sales_service::cache::{Cache, RedisCache};
use sales_service::config::Config;
use sales_service::lifecycle::{setup_tracing, SalesSystem};
use sales_service::store::{OrderStore, PgOrderStore};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = Config::from_env();
    info!(address = %config.bind_address(), "Starting sales service");

    let store = PgOrderStore::connect(&config.postgres)
        .await
        .context("Failed to connect to Postgres")?;
    store
        .init_schema()
        .await
        .context("Failed to create orders schema")?;
    let cache = RedisCache::open(&config.redis.url).context("Invalid Redis URL")?;
    if let Err(e) = cache.ping().await {
        warn!(error = %e, "Redis unreachable, listings will be served from Postgres");
    }

    let system = SalesSystem::start(&config, Arc::new(store), Arc::new(cache))
        .await
        .context("Failed to start sales system")?;

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    info!(address = %config.bind_address(), "Listening");

    axum::serve(listener, api::router(system.service()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    system.shutdown().await.context("Shutdown failed")?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
