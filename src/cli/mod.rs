//! CLI command implementations.
//!
//! The binary is a debugging aid around the library: every command prints
//! JSON (or TOML for `config`) to the given writer and never mutates state
//! outside the process.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `classify` | Show classifier signals, detected tools and topics |
//! | `strategy` | Show the memory search strategy for a request |
//! | `route` | Show the models the router selects |
//! | `models` | List the model registry |
//! | `process` | Run the full pipeline against the echo backend |
//! | `config` | Print the effective configuration |
//!
//! # Example Usage
//!
//! ```bash
//! # Inspect signals
//! agentic-router classify "explain this complex algorithm in detail"
//!
//! # Route a large-context request
//! agentic-router route "summarize these logs" --context-size 250000
//!
//! # Run the pipeline at the reactive level
//! agentic-router process "quickly fix this bug" --level reactive
//! ```

mod classify;
mod config;
mod process;
mod route;

pub use classify::{ClassifyReport, StrategyReport, cmd_classify, cmd_strategy};
pub use config::{ConfigFormat, cmd_config};
pub use process::cmd_process;
pub use route::{RouteReport, cmd_models, cmd_route};

use crate::{Error, Result};
use serde::Serialize;
use std::io::Write;

/// Writes a value as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| Error::OperationFailed {
        operation: "serialize_json".to_string(),
        cause: e.to_string(),
    })?;
    writeln!(writer, "{json}").map_err(write_error)
}

#[allow(clippy::needless_pass_by_value)]
fn write_error(e: std::io::Error) -> Error {
    Error::OperationFailed {
        operation: "write_output".to_string(),
        cause: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_appends_newline() {
        let mut out = Vec::new();
        write_json(&mut out, &serde_json::json!({"a": 1})).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"a\": 1"));
    }
}
