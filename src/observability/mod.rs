//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (publish counters via the metrics facade)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Counters are cheap (atomic increments) and no-ops without a recorder
//! - The remote timing collector lives in `crate::metrics`, not here

pub mod logging;
pub mod metrics;
