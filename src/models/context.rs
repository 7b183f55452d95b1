//! Memory strategy and enhanced context types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Per-request memory search plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemorySearchStrategy {
    /// Search the user's personal memories. Always true.
    pub personal_search: bool,
    /// Search system-wide patterns.
    pub system_search: bool,
    /// Expand the search conceptually.
    pub expanded_search: bool,
    /// Minimum record confidence in [0, 1].
    pub confidence_threshold: f32,
}

impl Default for MemorySearchStrategy {
    fn default() -> Self {
        Self {
            personal_search: true,
            system_search: false,
            expanded_search: false,
            confidence_threshold: 0.5,
        }
    }
}

/// A memory returned by a memory store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Memory content.
    pub content: String,
    /// Owning user.
    pub user_id: String,
    /// Optional confidence in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl MemoryRecord {
    /// Creates a record without a confidence value.
    #[must_use]
    pub fn new(content: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            user_id: user_id.into(),
            confidence: None,
        }
    }

    /// Sets the confidence.
    #[must_use]
    pub const fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Whether the record passes the threshold. Records without a confidence pass.
    #[must_use]
    pub fn meets_threshold(&self, threshold: f32) -> bool {
        self.confidence.is_none_or(|c| c >= threshold)
    }
}

/// Aggregate of all per-decision outputs for a single request.
///
/// Memories are kept in retrieval order and are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnhancedContext {
    /// Retrieved memories.
    pub memories: Vec<MemoryRecord>,
    /// Context expansion output.
    pub expanded_context: BTreeMap<String, Value>,
    /// Cross-session learning output.
    pub learned_patterns: BTreeMap<String, Value>,
    /// Tool routing output.
    pub tool_preparations: BTreeMap<String, Value>,
}

impl EnhancedContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of populated buckets (0..=4).
    ///
    /// Used as the context richness signal for model selection.
    #[must_use]
    pub fn richness(&self) -> usize {
        [
            !self.memories.is_empty(),
            !self.expanded_context.is_empty(),
            !self.learned_patterns.is_empty(),
            !self.tool_preparations.is_empty(),
        ]
        .into_iter()
        .filter(|populated| *populated)
        .count()
    }
}
