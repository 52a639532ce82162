//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {reason}")]
    Env { key: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values given on the command line. They win over both file and environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
}

/// Resolve the runtime configuration.
///
/// The file is optional: a missing file falls back to defaults. Environment
/// variables are applied on top of whatever the file produced, then the
/// command line, then the result is validated.
pub fn resolve_config(path: &Path, cli: &CliOverrides) -> Result<AppConfig, ConfigError> {
    resolve_config_with(path, cli, |key| std::env::var(key).ok())
}

/// [`resolve_config`] with an explicit variable lookup.
pub fn resolve_config_with<F>(
    path: &Path,
    cli: &CliOverrides,
    lookup: F,
) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut config, lookup)?;
    if let Some(bind) = &cli.bind_address {
        config.listener.bind_address = bind.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay flat, upper-cased keys onto a loaded configuration.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("APP_NAME") {
        config.app_name = v;
    }
    if let Some(v) = lookup("ENVIRONMENT") {
        config.environment = v;
    }
    if let Some(v) = lookup("GRAFANA_URL") {
        config.metrics.grafana_url = v;
    }
    if let Some(v) = lookup("GRAFANA_USER") {
        config.metrics.grafana_user = v;
    }
    if let Some(v) = lookup("GRAFANA_APIKEY") {
        config.metrics.grafana_apikey = v;
    }
    if let Some(v) = lookup("TIMING_MODE") {
        config.metrics.mode = v.parse().map_err(|reason| ConfigError::Env {
            key: "TIMING_MODE",
            reason,
        })?;
    }
    if let Some(v) = lookup("BIND_ADDRESS") {
        config.listener.bind_address = v;
    }
    if let Some(v) = lookup("LOG_LEVEL") {
        config.observability.log_level = v;
    }
    Ok(())
}
