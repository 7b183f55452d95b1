//! Configuration management.
//!
//! Settings come from an optional TOML file, then environment overrides:
//!
//! | Key | Default | Env override |
//! |-----|---------|--------------|
//! | `intelligence_level` | `autonomous` | `AGENTIC_ROUTER_INTELLIGENCE_LEVEL` |
//! | `router_max_models` | 3 | |
//! | `max_models` | 4 | `AGENTIC_ROUTER_MAX_MODELS` |
//! | `history_capacity` | 100 | |
//! | `large_context_threshold` | 100000 | |
//! | `deep_thinker_threshold` | 0.7 | |
//! | `prediction_cache_capacity` | 1024 | |
//! | `prediction_ttl_secs` | 3600 | |
//! | `learner_capacity` | 256 | |
//! | `learning_window` | 20 | |
//!
//! Logging and metrics live under `[observability.logging]` and
//! `[observability.metrics]`.

use crate::models::IntelligenceLevel;
use crate::services::DEFAULT_HISTORY_CAPACITY;
use crate::services::learner::DEFAULT_LEARNER_CAPACITY;
use crate::services::prediction::{DEFAULT_PREDICTION_CAPACITY, DEFAULT_PREDICTION_TTL};
use crate::services::router::{DEFAULT_LARGE_CONTEXT_THRESHOLD, DEFAULT_ROUTER_MAX_MODELS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the intelligence level.
pub const ENV_INTELLIGENCE_LEVEL: &str = "AGENTIC_ROUTER_INTELLIGENCE_LEVEL";

/// Environment variable overriding the final model cap.
pub const ENV_MAX_MODELS: &str = "AGENTIC_ROUTER_MAX_MODELS";

const CONFIG_DIR: &str = "agentic-router";
const CONFIG_FILE: &str = "config.toml";

/// Runtime configuration for the routing pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouterConfig {
    /// Initial intelligence level.
    pub intelligence_level: IntelligenceLevel,
    /// Cap applied by the model router.
    pub router_max_models: usize,
    /// Cap on the final model list handed to the backend.
    pub max_models: usize,
    /// Decision history capacity.
    pub history_capacity: usize,
    /// Context size (tokens) that selects the context master.
    pub large_context_threshold: usize,
    /// Complexity score above which the deep thinker is forced in.
    pub deep_thinker_threshold: f32,
    /// Prediction cache capacity.
    pub prediction_cache_capacity: usize,
    /// Nominal prediction TTL in seconds.
    pub prediction_ttl_secs: u64,
    /// Learner pattern store capacity.
    pub learner_capacity: usize,
    /// History entries folded per learning decision.
    pub learning_window: usize,
    /// Observability settings.
    pub observability: ObservabilitySettings,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            intelligence_level: IntelligenceLevel::default(),
            router_max_models: DEFAULT_ROUTER_MAX_MODELS,
            max_models: 4,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            large_context_threshold: DEFAULT_LARGE_CONTEXT_THRESHOLD,
            deep_thinker_threshold: 0.7,
            prediction_cache_capacity: DEFAULT_PREDICTION_CAPACITY,
            prediction_ttl_secs: DEFAULT_PREDICTION_TTL.as_secs(),
            learner_capacity: DEFAULT_LEARNER_CAPACITY,
            learning_window: 20,
            observability: ObservabilitySettings::default(),
        }
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Intelligence level name or number.
    pub intelligence_level: Option<toml::Value>,
    /// Router cap.
    pub router_max_models: Option<usize>,
    /// Final model cap.
    pub max_models: Option<usize>,
    /// History capacity.
    pub history_capacity: Option<usize>,
    /// Large context threshold.
    pub large_context_threshold: Option<usize>,
    /// Deep thinker threshold.
    pub deep_thinker_threshold: Option<f32>,
    /// Prediction cache capacity.
    pub prediction_cache_capacity: Option<usize>,
    /// Prediction TTL in seconds.
    pub prediction_ttl_secs: Option<u64>,
    /// Learner capacity.
    pub learner_capacity: Option<usize>,
    /// Learning window.
    pub learning_window: Option<usize>,
    /// Observability section.
    pub observability: Option<ObservabilitySettings>,
}

/// `[observability]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObservabilitySettings {
    /// Logging settings.
    pub logging: Option<LoggingSettings>,
    /// Metrics settings.
    pub metrics: Option<MetricsSettings>,
}

/// `[observability.logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Default level when no filter is given.
    pub level: Option<String>,
    /// Full `EnvFilter` directive.
    pub filter: Option<String>,
    /// Log file path.
    pub file: Option<String>,
}

/// `[observability.metrics]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricsSettings {
    /// Whether the Prometheus recorder is installed.
    pub enabled: Option<bool>,
}

impl RouterConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds an
    /// invalid value.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Self::from_config_file(file)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the platform config dir, then `~/.config/agentic-router/`.
    /// Returns defaults if no readable file is found.
    #[must_use]
    pub fn load_default() -> Self {
        Self::load_first(&Self::default_paths(), |path, e| {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid config file");
        })
    }

    /// Loads the first existing file that parses, reporting each invalid one
    /// to `on_invalid`. Returns defaults if none qualifies.
    pub fn load_first(paths: &[PathBuf], mut on_invalid: impl FnMut(&Path, &Error)) -> Self {
        for path in paths.iter().filter(|path| path.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => on_invalid(path, &e),
            }
        }
        Self::default()
    }

    /// Candidate config file locations, in lookup order.
    #[must_use]
    pub fn default_paths() -> Vec<PathBuf> {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Vec::new();
        };

        let platform = base_dirs.config_dir().join(CONFIG_DIR).join(CONFIG_FILE);
        let xdg = base_dirs
            .home_dir()
            .join(".config")
            .join(CONFIG_DIR)
            .join(CONFIG_FILE);

        if platform == xdg {
            vec![platform]
        } else {
            vec![platform, xdg]
        }
    }

    fn from_config_file(file: ConfigFile) -> Result<Self> {
        let mut config = Self::default();

        if let Some(level) = file.intelligence_level {
            config.intelligence_level = parse_level_value(&level)?;
        }
        if let Some(v) = file.router_max_models {
            config.router_max_models = v;
        }
        if let Some(v) = file.max_models {
            config.max_models = v;
        }
        if let Some(v) = file.history_capacity {
            config.history_capacity = v;
        }
        if let Some(v) = file.large_context_threshold {
            config.large_context_threshold = v;
        }
        if let Some(v) = file.deep_thinker_threshold {
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::InvalidInput(format!(
                    "deep_thinker_threshold must be within [0, 1], got {v}"
                )));
            }
            config.deep_thinker_threshold = v;
        }
        if let Some(v) = file.prediction_cache_capacity {
            config.prediction_cache_capacity = v;
        }
        if let Some(v) = file.prediction_ttl_secs {
            config.prediction_ttl_secs = v;
        }
        if let Some(v) = file.learner_capacity {
            config.learner_capacity = v;
        }
        if let Some(v) = file.learning_window {
            config.learning_window = v;
        }
        if let Some(observability) = file.observability {
            config.observability = observability;
        }

        Ok(config)
    }

    /// Applies overrides from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary lookup. Invalid values are logged
    /// and ignored.
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(ENV_INTELLIGENCE_LEVEL) {
            match IntelligenceLevel::parse(&raw) {
                Some(level) => self.intelligence_level = level,
                None => tracing::warn!(value = %raw, "Ignoring invalid {ENV_INTELLIGENCE_LEVEL}"),
            }
        }
        if let Some(raw) = lookup(ENV_MAX_MODELS) {
            match raw.trim().parse::<usize>() {
                Ok(max) if max > 0 => self.max_models = max,
                _ => tracing::warn!(value = %raw, "Ignoring invalid {ENV_MAX_MODELS}"),
            }
        }
        self
    }

    /// Sets the initial intelligence level.
    #[must_use]
    pub fn with_intelligence_level(mut self, level: IntelligenceLevel) -> Self {
        self.intelligence_level = level;
        self
    }

    /// Sets the final model cap.
    #[must_use]
    pub fn with_max_models(mut self, max: usize) -> Self {
        self.max_models = max;
        self
    }
}

fn parse_level_value(value: &toml::Value) -> Result<IntelligenceLevel> {
    let parsed = match value {
        toml::Value::String(s) => IntelligenceLevel::parse(s),
        toml::Value::Integer(n) => u8::try_from(*n)
            .ok()
            .and_then(IntelligenceLevel::from_value),
        _ => None,
    };
    parsed.ok_or_else(|| Error::InvalidInput(format!("invalid intelligence_level: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Result<RouterConfig> {
        let file: ConfigFile = toml::from_str(toml).unwrap();
        RouterConfig::from_config_file(file)
    }

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert_eq!(config.intelligence_level, IntelligenceLevel::Autonomous);
        assert_eq!(config.router_max_models, 3);
        assert_eq!(config.max_models, 4);
        assert_eq!(config.history_capacity, 100);
        assert_eq!(config.large_context_threshold, 100_000);
        assert_eq!(config.prediction_ttl_secs, 3600);
        assert_eq!(config.learning_window, 20);
    }

    #[test]
    fn test_level_by_name_or_number() {
        assert_eq!(
            parse("intelligence_level = \"predictive\"").unwrap().intelligence_level,
            IntelligenceLevel::Predictive
        );
        assert_eq!(
            parse("intelligence_level = 1").unwrap().intelligence_level,
            IntelligenceLevel::Reactive
        );
        assert!(matches!(
            parse("intelligence_level = 9"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_threshold_validated() {
        assert!(parse("deep_thinker_threshold = 1.5").is_err());
        let config = parse("deep_thinker_threshold = 0.4").unwrap();
        assert!((config.deep_thinker_threshold - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn test_observability_section() {
        let config = parse(
            r#"
            [observability.logging]
            format = "json"
            level = "debug"

            [observability.metrics]
            enabled = true
            "#,
        )
        .unwrap();
        let logging = config.observability.logging.unwrap();
        assert_eq!(logging.format.as_deref(), Some("json"));
        assert_eq!(config.observability.metrics.unwrap().enabled, Some(true));
    }

    #[test]
    fn test_env_overrides() {
        let config = RouterConfig::default().with_overrides_from(|key| match key {
            ENV_INTELLIGENCE_LEVEL => Some("reactive".to_string()),
            ENV_MAX_MODELS => Some("2".to_string()),
            _ => None,
        });
        assert_eq!(config.intelligence_level, IntelligenceLevel::Reactive);
        assert_eq!(config.max_models, 2);
    }

    #[test]
    fn test_invalid_env_overrides_ignored() {
        let config = RouterConfig::default().with_overrides_from(|key| match key {
            ENV_INTELLIGENCE_LEVEL => Some("genius".to_string()),
            ENV_MAX_MODELS => Some("zero".to_string()),
            _ => None,
        });
        assert_eq!(config, RouterConfig::default());
    }
}
