//! Remote metric publisher.
//!
//! # Responsibilities
//! - Own one long-lived HTTP client for the collector
//! - Serialize a sample into the collector's JSON array format
//! - Deliver it with bearer credentials and report the outcome
//! - Detach delivery from the caller (`send_async`)

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONNECTION};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::config::{FailurePolicy, MetricsConfig};
use crate::metrics::types::{MetricSample, PublishError, PublishResult, PublisherConfig};
use crate::observability::metrics as counters;

/// Idle pooled connections are closed after this long.
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Client tuning for a [`Publisher`].
#[derive(Debug, Clone, Copy)]
pub struct PublishSettings {
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub on_failure: FailurePolicy,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            pool_max_idle_per_host: 64,
            on_failure: FailurePolicy::Panic,
        }
    }
}

impl From<&MetricsConfig> for PublishSettings {
    fn from(config: &MetricsConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            pool_max_idle_per_host: config.pool_max_idle_per_host,
            on_failure: config.on_failure,
        }
    }
}

/// Sends metric samples to the configured collector.
///
/// Cheap to share: wrap it in an `Arc` once and hand clones to every caller.
#[derive(Debug)]
pub struct Publisher {
    config: PublisherConfig,
    client: reqwest::Client,
    on_failure: FailurePolicy,
}

impl Publisher {
    /// Build a publisher. No network traffic happens until the first send.
    pub fn configure(config: PublisherConfig, settings: PublishSettings) -> PublishResult<Self> {
        // Every send opens a fresh connection.
        let mut headers = HeaderMap::new();
        headers.insert(CONNECTION, HeaderValue::from_static("close"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(settings.pool_max_idle_per_host)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .timeout(settings.timeout)
            .build()
            .map_err(PublishError::Client)?;

        tracing::debug!(
            host = %config.host,
            source = %config.source,
            timeout = ?settings.timeout,
            "Metric publisher configured"
        );

        Ok(Self {
            config,
            client,
            on_failure: settings.on_failure,
        })
    }

    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    /// POST one sample and wait for the collector's answer.
    pub async fn publish(&self, name: &str, value: u64) -> PublishResult<()> {
        if name.is_empty() {
            return Err(PublishError::EmptyName);
        }

        let sample = MetricSample::now(name, value);
        let credential = HeaderValue::from_str(&format!(
            "Bearer {}:{}",
            self.config.user, self.config.api_key
        ))?;

        let response = self
            .client
            .post(&self.config.host)
            .header(AUTHORIZATION, credential)
            .json(&[&sample])
            .send()
            .await
            .map_err(PublishError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                metric = %name,
                status = status.as_u16(),
                body = %body,
                "Collector rejected metric"
            );
            return Err(PublishError::Rejected { status, body });
        }

        tracing::info!(metric = %name, value, "metric sent");
        Ok(())
    }

    /// Publish on a detached task. The caller must not await the handle on
    /// the request path; it is returned so tests can observe the outcome.
    pub fn send_async(self: &Arc<Self>, name: String, value: u64) -> JoinHandle<()> {
        let publisher = Arc::clone(self);
        tokio::spawn(async move {
            match publisher.publish(&name, value).await {
                Ok(()) => counters::record_publish_sent(),
                Err(e) => publisher.handle_failure(&name, e),
            }
        })
    }

    fn handle_failure(&self, name: &str, error: PublishError) {
        match self.on_failure {
            FailurePolicy::Panic => {
                tracing::error!(metric = %name, error = %error, "Metric publish failed");
                panic!("metric publish failed for {}: {}", name, error);
            }
            FailurePolicy::Log => {
                tracing::warn!(metric = %name, error = %error, "Dropping metric after failed publish");
                counters::record_publish_dropped(failure_reason(&error));
            }
        }
    }
}

fn failure_reason(error: &PublishError) -> &'static str {
    match error {
        PublishError::Transport(e) if e.is_timeout() => "timeout",
        PublishError::Transport(_) => "transport",
        PublishError::Rejected { .. } => "rejected",
        PublishError::EmptyName | PublishError::Header(_) => "invalid",
        PublishError::Client(_) => "client",
    }
}
