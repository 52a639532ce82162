//! Wire types and errors for metric publishing.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Reporting interval, in seconds, attached to every sample.
pub const SAMPLE_INTERVAL_SECS: u64 = 10;

/// A single named measurement as the collector expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSample {
    pub name: String,
    pub value: u64,
    pub interval: u64,
    /// Unix seconds at publish time.
    pub time: i64,
}

impl MetricSample {
    /// Build a sample stamped with the current wall-clock second.
    pub fn now(name: impl Into<String>, value: u64) -> Self {
        let time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;

        Self {
            name: name.into(),
            value,
            interval: SAMPLE_INTERVAL_SECS,
            time,
        }
    }
}

/// Connection settings for the remote collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherConfig {
    /// Collector endpoint URL.
    pub host: String,
    /// Application identifier.
    pub source: String,
    pub user: String,
    pub api_key: String,
    pub environment: String,
}

/// Errors raised while publishing a sample.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The request never produced a response (DNS, refused, timeout).
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The collector answered with a non-2xx status.
    #[error("Collector rejected metric with status {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Metric name must not be empty")]
    EmptyName,

    #[error("Invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("HTTP client initialization failed: {0}")]
    Client(#[source] reqwest::Error),
}

/// Result type for publish operations.
pub type PublishResult<T> = Result<T, PublishError>;
