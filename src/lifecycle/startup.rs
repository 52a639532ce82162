//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the optional Prometheus endpoint
//! - Build the timing middleware (and its publisher)
//! - Bind the listener and serve until a signal arrives
//!
//! Config and logging are set up by the caller before this runs.

use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::metrics::PublishError;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build metric publisher: {0}")]
    Publisher(#[from] PublishError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Run the service with an already validated configuration.
pub async fn start(config: AppConfig) -> Result<(), StartupError> {
    if config.observability.prometheus_enabled {
        match config.observability.prometheus_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                prometheus_address = %config.observability.prometheus_address,
                "Failed to parse Prometheus address"
            ),
        }
    }

    let server = HttpServer::new(config)?;
    let address = server.config().listener.bind_address.clone();

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;
    Ok(())
}
