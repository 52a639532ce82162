//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout)
//!     → timing.rs (start timer)
//!     → sample handlers (produce response)
//!     → timing.rs (X-Timing header, or detached publish)
//!     → Send to client
//! ```

pub mod server;
pub mod timing;

pub use server::HttpServer;
pub use timing::{endpoint_segment, timing_header, timing_middleware, MetricNaming, Timing, X_TIMING};
