//! HTTP service template.
//!
//! A router with one example endpoint, wrapped in request-timing middleware
//! that either annotates responses with `X-Timing` or ships each request's
//! latency to a remote metrics collector on a detached task.

// Core subsystems
pub mod config;
pub mod http;
pub mod sample;

// Remote timing metrics
pub mod metrics;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
