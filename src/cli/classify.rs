//! `classify` and `strategy` commands.

use super::write_json;
use crate::Result;
use crate::classifier::{self, RequestSignals, ToolKind};
use crate::models::MemorySearchStrategy;
use crate::services::MemorySearchStrategyEngine;
use serde::Serialize;
use std::io::Write;

/// Output of the `classify` command.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyReport {
    /// Every signal for the request.
    pub signals: RequestSignals,
    /// Names of the signals that fired.
    pub active: Vec<&'static str>,
    /// Tools the request mentions.
    pub tools: Vec<ToolKind>,
    /// Extracted topics.
    pub topics: Vec<String>,
}

impl ClassifyReport {
    /// Classifies the text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let signals = RequestSignals::analyze(text);
        let active = signals.active();
        Self {
            signals,
            active,
            tools: classifier::detect_tools(text),
            topics: classifier::extract_topics(text),
        }
    }
}

/// Output of the `strategy` command.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    /// The chosen strategy.
    pub strategy: MemorySearchStrategy,
    /// Human-readable summary.
    pub reasoning: String,
}

impl StrategyReport {
    /// Decides the strategy for the text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let strategy = MemorySearchStrategyEngine::new().decide_strategy(text);
        Self {
            reasoning: MemorySearchStrategyEngine::describe(&strategy),
            strategy,
        }
    }
}

/// Executes the `classify` command.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn cmd_classify<W: Write>(writer: &mut W, text: &str) -> Result<()> {
    write_json(writer, &ClassifyReport::from_text(text))
}

/// Executes the `strategy` command.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn cmd_strategy<W: Write>(writer: &mut W, text: &str) -> Result<()> {
    write_json(writer, &StrategyReport::from_text(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_report_for_tool_request() {
        let report = ClassifyReport::from_text("run the tests and commit with git");
        assert!(report.signals.tool_required);
        assert!(report.tools.contains(&ToolKind::Git));
        assert!(report.active.contains(&"tool_required"));
    }

    #[test]
    fn test_strategy_report_plain_request() {
        let report = StrategyReport::from_text("hello");
        assert!(report.strategy.personal_search);
        assert!(!report.strategy.system_search);
        assert!((report.strategy.confidence_threshold - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cmd_classify_writes_json() {
        let mut out = Vec::new();
        cmd_classify(&mut out, "write a poem").unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["signals"]["creative"], true);
    }
}
