//! Remote metric publishing subsystem.
//!
//! # Data Flow
//! ```text
//! timing middleware (metric name, elapsed ns)
//!     → publisher.rs send_async (detached tokio task)
//!     → types.rs MetricSample (stamped at publish time)
//!     → POST [sample] to collector, Bearer {user}:{api_key}
//!     → success: info log; failure: FailurePolicy (panic | log + counter)
//! ```
//!
//! # Design Decisions
//! - One publisher per process, built at startup and shared via Arc
//! - No batching, buffering, or retries: one sample, one request
//! - Keep-alive disabled; every send uses a fresh connection
//! - A failed publish never reaches the request that produced it

pub mod publisher;
pub mod types;

pub use publisher::{PublishSettings, Publisher};
pub use types::{MetricSample, PublishError, PublishResult, PublisherConfig, SAMPLE_INTERVAL_SECS};
