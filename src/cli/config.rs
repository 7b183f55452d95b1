//! `config` command.

use super::{write_error, write_json};
use crate::config::RouterConfig;
use crate::{Error, Result};
use std::io::Write;
use std::str::FromStr;

/// Output format for the `config` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML, loadable with `--config`.
    #[default]
    Toml,
    /// Pretty JSON.
    Json,
}

impl FromStr for ConfigFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            other => Err(Error::InvalidInput(format!(
                "unknown config format '{other}' (expected toml or json)"
            ))),
        }
    }
}

/// Prints the effective configuration.
///
/// # Errors
///
/// Returns an error if serialization or output fails.
pub fn cmd_config<W: Write>(
    writer: &mut W,
    config: &RouterConfig,
    format: ConfigFormat,
) -> Result<()> {
    match format {
        ConfigFormat::Json => write_json(writer, config),
        ConfigFormat::Toml => {
            let toml = toml::to_string_pretty(config).map_err(|e| Error::OperationFailed {
                operation: "serialize_toml".to_string(),
                cause: e.to_string(),
            })?;
            write!(writer, "{toml}").map_err(write_error)
        },
    }
}
