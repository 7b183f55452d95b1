//! Prometheus metrics.

use crate::config::MetricsSettings;
use crate::{Error, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Environment variable toggling the Prometheus recorder.
pub const ENV_METRICS_ENABLED: &str = "AGENTIC_ROUTER_METRICS_ENABLED";

/// Metrics configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsConfig {
    /// Whether metrics are enabled.
    pub enabled: bool,
}

impl MetricsConfig {
    /// Builds metrics configuration from config settings with env overrides.
    #[must_use]
    pub fn from_settings(settings: Option<&MetricsSettings>) -> Self {
        Self::from_settings_with(settings, |key| std::env::var(key).ok())
    }

    fn from_settings_with(
        settings: Option<&MetricsSettings>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let configured = settings.and_then(|config| config.enabled).unwrap_or(false);
        let enabled = lookup(ENV_METRICS_ENABLED)
            .and_then(|v| parse_bool(&v))
            .unwrap_or(configured);
        Self { enabled }
    }
}

/// Installs the Prometheus recorder.
///
/// Returns `None` when metrics are disabled; `metrics` macros are then no-ops.
/// The returned handle renders the current values in the text exposition
/// format.
///
/// # Errors
///
/// Returns an error if a recorder is already installed.
pub fn install_prometheus(config: MetricsConfig) -> Result<Option<PrometheusHandle>> {
    if !config.enabled {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| Error::OperationFailed {
            operation: "metrics_recorder_install".to_string(),
            cause: e.to_string(),
        })?;
    tracing::debug!("Metrics recorder installed");

    Ok(Some(handle))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
