//! Structured logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;

/// Environment variable selecting the log format.
pub const ENV_LOG_FORMAT: &str = "AGENTIC_ROUTER_LOG_FORMAT";

/// Environment variable pointing at a log file.
pub const ENV_LOG_FILE: &str = "AGENTIC_ROUTER_LOG_FILE";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name. Unknown names fall back to pretty.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }

    /// Returns the format name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

/// Resolved logging configuration.
///
/// The filter is kept as a directive string and turned into an
/// `EnvFilter` at init time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// `EnvFilter` directive.
    pub filter: String,
    /// Optional log file; stderr otherwise.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Builds logging configuration from settings with env overrides.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        Self::resolve(settings, verbose, |key| std::env::var(key).ok())
    }

    /// Resolves settings against an arbitrary environment lookup.
    ///
    /// Filter precedence: `RUST_LOG`, settings filter, settings level, then
    /// `debug` when verbose or `warn` otherwise.
    #[must_use]
    pub fn resolve(
        settings: Option<&LoggingSettings>,
        verbose: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let format = lookup(ENV_LOG_FORMAT)
            .or_else(|| settings.and_then(|s| s.format.clone()))
            .map_or_else(LogFormat::default, |f| LogFormat::parse(&f));

        let file = lookup(ENV_LOG_FILE)
            .or_else(|| settings.and_then(|s| s.file.clone()))
            .filter(|f| !f.trim().is_empty())
            .map(PathBuf::from);

        let fallback = if verbose { "debug" } else { "warn" };
        let filter = lookup("RUST_LOG")
            .filter(|f| !f.trim().is_empty())
            .or_else(|| settings.and_then(|s| s.filter.clone()))
            .or_else(|| settings.and_then(|s| s.level.clone()))
            .unwrap_or_else(|| fallback.to_string());

        Self {
            format,
            filter,
            file,
        }
    }
}
