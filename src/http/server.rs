//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the sample controller's routes
//! - Wire up middleware (timing, timeout, request ID, tracing)
//! - Bind server to listener and serve until shutdown

use axum::{middleware, Router};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::timing::{timing_middleware, Timing};
use crate::metrics::PublishResult;
use crate::sample;

/// HTTP server for the service.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server, building the timing middleware from config.
    pub fn new(config: AppConfig) -> PublishResult<Self> {
        let timing = Timing::from_config(&config)?;
        Ok(Self::with_timing(config, timing))
    }

    /// Create a server around an already-built timing middleware.
    pub fn with_timing(config: AppConfig, timing: Timing) -> Self {
        tracing::info!(mode = ?timing.mode(), "Timing middleware configured");
        let router = Self::build_router(&config, timing);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, timing: Timing) -> Router {
        Self::apply_layers(sample::register(Router::new()), config, timing)
    }

    /// Wrap `routes` in the service's middleware stack. Timing sits outside
    /// the request timeout so timed-out requests are measured too.
    #[allow(deprecated)]
    pub fn apply_layers(routes: Router, config: &AppConfig, timing: Timing) -> Router {
        routes.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::from_fn_with_state(timing, timing_middleware))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.timeouts.request_secs,
                ))),
        )
    }

    /// A clone of the fully layered router, for in-process requests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
