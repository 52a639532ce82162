//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (APP_NAME, GRAFANA_URL, ...)
//!     → command-line overrides (--bind)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → read once at startup by the server and timing middleware
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{resolve_config, CliOverrides, ConfigError};
pub use schema::AppConfig;
pub use schema::{FailurePolicy, ListenerConfig, MetricsConfig, ObservabilityConfig, TimingMode};
