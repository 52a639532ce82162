//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check that remote publishing has a usable collector URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{AppConfig, TimingMode};

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{field} '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("metrics.grafana_url '{0}' is not an http(s) URL")]
    InvalidCollectorUrl(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.app_name.trim().is_empty() {
        errors.push(ValidationError::Empty("app_name"));
    }
    if config.environment.trim().is_empty() {
        errors.push(ValidationError::Empty("environment"));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.metrics.timeout_secs == 0 {
        errors.push(ValidationError::Zero("metrics.timeout_secs"));
    }

    if config.observability.prometheus_enabled
        && config.observability.prometheus_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.prometheus_address",
            value: config.observability.prometheus_address.clone(),
        });
    }

    if config.metrics.mode == TimingMode::Remote {
        let raw = &config.metrics.grafana_url;
        if raw.trim().is_empty() {
            errors.push(ValidationError::Empty("metrics.grafana_url"));
        } else {
            match url::Url::parse(raw) {
                Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
                _ => errors.push(ValidationError::InvalidCollectorUrl(raw.clone())),
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.app_name = "  ".into();
        config.listener.bind_address = "localhost".into();
        config.metrics.timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::Empty("app_name")));
        assert!(errors.contains(&ValidationError::Zero("metrics.timeout_secs")));
    }

    #[test]
    fn test_remote_mode_requires_http_url() {
        let mut config = AppConfig::default();
        config.metrics.mode = TimingMode::Remote;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::Empty("metrics.grafana_url")])
        );

        config.metrics.grafana_url = "ftp://collector.local/metrics".into();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::InvalidCollectorUrl(
                "ftp://collector.local/metrics".into()
            )])
        );

        config.metrics.grafana_url = "https://graphite.example.com/metrics".into();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_header_only_ignores_collector_url() {
        let mut config = AppConfig::default();
        config.metrics.mode = TimingMode::HeaderOnly;
        config.metrics.grafana_url = "not a url".into();
        assert_eq!(validate_config(&config), Ok(()));
    }
}
