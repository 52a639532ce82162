//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application identifier, used as the second segment of metric names.
    pub app_name: String,

    /// Deployment environment (e.g., "development", "production").
    pub environment: String,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request timing and metric publishing.
    pub metrics: MetricsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "ziggy".to_string(),
            environment: "development".to_string(),
            listener: ListenerConfig::default(),
            timeouts: TimeoutConfig::default(),
            metrics: MetricsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// How the timing middleware reports elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimingMode {
    /// Publish every sample to the remote collector.
    Remote,
    /// Only set the `X-Timing` response header.
    HeaderOnly,
}

impl std::str::FromStr for TimingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(TimingMode::Remote),
            "header-only" | "header_only" => Ok(TimingMode::HeaderOnly),
            other => Err(format!("unknown timing mode '{}'", other)),
        }
    }
}

/// What a detached publish does when the collector cannot be reached
/// or rejects the sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Log, then panic the detached task.
    Panic,
    /// Log at warn level and count the dropped sample.
    Log,
}

/// Metric publishing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Reporting mode for the timing middleware.
    pub mode: TimingMode,

    /// Collector endpoint samples are POSTed to.
    pub grafana_url: String,

    /// Collector user, first half of the bearer credential.
    pub grafana_user: String,

    /// Collector API key, second half of the bearer credential.
    pub grafana_apikey: String,

    /// Outbound request timeout in seconds.
    pub timeout_secs: u64,

    /// Idle connections kept per collector host.
    pub pool_max_idle_per_host: usize,

    /// Behaviour of a failed detached publish.
    pub on_failure: FailurePolicy,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            mode: TimingMode::HeaderOnly,
            grafana_url: String::new(),
            grafana_user: String::new(),
            grafana_apikey: String::new(),
            timeout_secs: 5,
            pool_max_idle_per_host: 64,
            on_failure: FailurePolicy::Panic,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus scrape endpoint.
    pub prometheus_enabled: bool,

    /// Prometheus endpoint bind address.
    pub prometheus_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            prometheus_enabled: false,
            prometheus_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            app_name = "orders"

            [metrics]
            mode = "remote"
            grafana_url = "https://graphite.example.com/metrics"
            on_failure = "log"
            "#,
        )
        .unwrap();

        assert_eq!(config.app_name, "orders");
        assert_eq!(config.environment, "development");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.metrics.mode, TimingMode::Remote);
        assert_eq!(config.metrics.on_failure, FailurePolicy::Log);
        assert_eq!(config.metrics.timeout_secs, 5);
        assert_eq!(config.metrics.pool_max_idle_per_host, 64);
    }

    #[test]
    fn test_timing_mode_from_str() {
        assert_eq!("remote".parse::<TimingMode>(), Ok(TimingMode::Remote));
        assert_eq!("Header-Only".parse::<TimingMode>(), Ok(TimingMode::HeaderOnly));
        assert_eq!("header_only".parse::<TimingMode>(), Ok(TimingMode::HeaderOnly));
        assert!("statsd".parse::<TimingMode>().is_err());
    }
}
