//! Memory search strategy selection.

use crate::classifier::RequestSignals;
use crate::models::MemorySearchStrategy;

/// Confidence threshold for high-precision requests.
pub const HIGH_PRECISION_THRESHOLD: f32 = 0.8;

/// Confidence threshold for every other request.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Decides which memory sources a request should search.
///
/// Personal memory is always searched. System patterns are searched for
/// system-knowledge requests, conceptual expansion for conceptual requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemorySearchStrategyEngine;

impl MemorySearchStrategyEngine {
    /// Creates the engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Derives the strategy for a request.
    #[must_use]
    pub fn decide_strategy(&self, text: &str) -> MemorySearchStrategy {
        self.strategy_for_signals(&RequestSignals::analyze(text))
    }

    /// Derives the strategy from precomputed signals.
    #[must_use]
    pub const fn strategy_for_signals(&self, signals: &RequestSignals) -> MemorySearchStrategy {
        MemorySearchStrategy {
            personal_search: true,
            system_search: signals.system_knowledge,
            expanded_search: signals.conceptual,
            confidence_threshold: if signals.high_precision {
                HIGH_PRECISION_THRESHOLD
            } else {
                DEFAULT_THRESHOLD
            },
        }
    }

    /// Describes a strategy for decision reasoning.
    #[must_use]
    pub fn describe(strategy: &MemorySearchStrategy) -> String {
        let mut sources = vec!["personal"];
        if strategy.system_search {
            sources.push("system patterns");
        }
        if strategy.expanded_search {
            sources.push("conceptual expansion");
        }

        let precision = if strategy.confidence_threshold >= HIGH_PRECISION_THRESHOLD {
            "high-precision request"
        } else {
            "standard precision"
        };

        format!(
            "Search {} memories; confidence threshold {:.2} ({precision})",
            sources.join(" + "),
            strategy.confidence_threshold
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_request_searches_personal_only() {
        let strategy = MemorySearchStrategyEngine::new().decide_strategy("hello there");
        assert!(strategy.personal_search);
        assert!(!strategy.system_search);
        assert!(!strategy.expanded_search);
        assert!((strategy.confidence_threshold - DEFAULT_THRESHOLD).abs() < f32::EPSILON);
    }

    #[test]
    fn test_system_and_conceptual() {
        let strategy = MemorySearchStrategyEngine::new()
            .decide_strategy("give an overview of our architecture best practices");
        assert!(strategy.system_search);
        assert!(strategy.expanded_search);
    }

    #[test]
    fn test_high_precision_threshold() {
        let strategy = MemorySearchStrategyEngine::new().decide_strategy("I need the exact number");
        assert!((strategy.confidence_threshold - HIGH_PRECISION_THRESHOLD).abs() < f32::EPSILON);
    }

    #[test]
    fn test_describe_mentions_sources() {
        let strategy = MemorySearchStrategy {
            personal_search: true,
            system_search: true,
            expanded_search: false,
            confidence_threshold: 0.8,
        };
        let text = MemorySearchStrategyEngine::describe(&strategy);
        assert!(text.contains("personal + system patterns"));
        assert!(text.contains("0.80"));
        assert!(text.contains("high-precision"));
    }
}
