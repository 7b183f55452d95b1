//! Decision types produced by the orchestrator.
//!
//! A [`Decision`] is created by the planning step, has its outcome recorded
//! exactly once by the executor and is then appended to the decision history.

use super::{IntelligenceLevel, ModelId};
use crate::classifier::RequestSignals;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a decision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionId(String);

impl DecisionId {
    /// Generates a fresh process-unique ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates an ID from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DecisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of decision types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    /// Decide how to search memory.
    MemorySearch,
    /// Decide whether and how far to expand context.
    ContextExpansion,
    /// Fold decision history into learned patterns.
    CrossSessionLearning,
    /// Prepare tools the request is likely to need.
    ToolRouting,
}

impl DecisionType {
    /// Returns the string representation used in serialization and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MemorySearch => "memory_search",
            Self::ContextExpansion => "context_expansion",
            Self::CrossSessionLearning => "cross_session_learning",
            Self::ToolRouting => "tool_routing",
        }
    }
}

impl fmt::Display for DecisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Action descriptor consumed by the executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlanStep {
    /// Load personal memories at or above the threshold.
    SearchPersonalMemory {
        /// Minimum record confidence.
        threshold: f32,
    },
    /// Search system-wide patterns.
    SearchSystemPatterns,
    /// Search memories related to the request topics.
    ExpandConceptually {
        /// Topics to expand on.
        topics: Vec<String>,
    },
    /// Expand the working context to the given depth.
    ExpandContext {
        /// Expansion depth (1..=3).
        depth: u8,
    },
    /// Reuse a cached prediction for this request.
    ReusePrediction,
    /// Fold the most recent history entries into the learner.
    FoldHistory {
        /// Number of history entries to fold.
        window: usize,
    },
    /// Prepare a tool.
    PrepareTool {
        /// Tool name.
        tool: String,
    },
}

/// Snapshot of the inputs that produced a decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerContext {
    /// The request text.
    pub request_text: String,
    /// The requesting user.
    pub user_id: String,
    /// Intelligence level at decision time.
    pub intelligence_level: IntelligenceLevel,
    /// Classifier signals for the request.
    pub signals: RequestSignals,
}

impl TriggerContext {
    /// Captures the request and classifies it.
    #[must_use]
    pub fn new(
        request_text: impl Into<String>,
        user_id: impl Into<String>,
        intelligence_level: IntelligenceLevel,
    ) -> Self {
        let request_text = request_text.into();
        let signals = RequestSignals::analyze(&request_text);
        Self {
            request_text,
            user_id: user_id.into(),
            intelligence_level,
            signals,
        }
    }
}

/// Post-execution fields of a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    /// Whether execution completed normally.
    pub success: bool,
    /// Wall time spent executing, in milliseconds.
    pub execution_time_ms: u64,
    /// Error message when execution failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DecisionOutcome {
    /// Creates an outcome.
    #[must_use]
    pub const fn new(success: bool, execution_time_ms: u64, error: Option<String>) -> Self {
        Self {
            success,
            execution_time_ms,
            error,
        }
    }
}

/// One typed unit of routing logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// Unique identifier.
    pub decision_id: DecisionId,
    /// Decision type.
    pub decision_type: DecisionType,
    /// Inputs that produced the decision.
    pub trigger_context: TriggerContext,
    /// Which branch was taken and why.
    pub reasoning: String,
    /// Heuristic confidence in [0, 1].
    pub confidence_score: f32,
    /// Models associated with the decision.
    pub selected_models: Vec<ModelId>,
    /// Ordered actions for the executor.
    pub execution_plan: Vec<PlanStep>,
    /// Creation time (Unix epoch milliseconds).
    pub timestamp: u64,
    /// Set once by the executor.
    outcome: Option<DecisionOutcome>,
}

impl Decision {
    /// Creates a pending decision.
    #[must_use]
    pub fn new(
        decision_type: DecisionType,
        trigger_context: TriggerContext,
        reasoning: impl Into<String>,
        confidence_score: f32,
    ) -> Self {
        Self {
            decision_id: DecisionId::generate(),
            decision_type,
            trigger_context,
            reasoning: reasoning.into(),
            confidence_score: confidence_score.clamp(0.0, 1.0),
            selected_models: Vec::new(),
            execution_plan: Vec::new(),
            timestamp: crate::current_timestamp_millis(),
            outcome: None,
        }
    }

    /// Sets the associated models.
    #[must_use]
    pub fn with_models(mut self, models: Vec<ModelId>) -> Self {
        self.selected_models = models;
        self
    }

    /// Sets the execution plan.
    #[must_use]
    pub fn with_plan(mut self, plan: Vec<PlanStep>) -> Self {
        self.execution_plan = plan;
        self
    }

    /// Records the execution outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExecuted`] if an outcome was already recorded.
    pub fn record_outcome(&mut self, outcome: DecisionOutcome) -> Result<()> {
        if self.outcome.is_some() {
            return Err(Error::AlreadyExecuted {
                decision_id: self.decision_id.to_string(),
            });
        }
        self.outcome = Some(outcome);
        Ok(())
    }

    /// Returns the outcome, if executed.
    #[must_use]
    pub const fn outcome(&self) -> Option<&DecisionOutcome> {
        self.outcome.as_ref()
    }

    /// Whether the decision has been executed.
    #[must_use]
    pub const fn is_executed(&self) -> bool {
        self.outcome.is_some()
    }

    /// `Some(true)` on success, `Some(false)` on failure, `None` before execution.
    #[must_use]
    pub fn success(&self) -> Option<bool> {
        self.outcome.as_ref().map(|o| o.success)
    }

    /// Execution time in milliseconds, if executed.
    #[must_use]
    pub fn execution_time_ms(&self) -> Option<u64> {
        self.outcome.as_ref().map(|o| o.execution_time_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger() -> TriggerContext {
        TriggerContext {
            request_text: "hello".to_string(),
            user_id: "user".to_string(),
            intelligence_level: IntelligenceLevel::default(),
            signals: RequestSignals::analyze("hello"),
        }
    }

    #[test]
    fn test_new_decision_is_pending() {
        let decision = Decision::new(DecisionType::MemorySearch, trigger(), "why", 0.7);
        assert!(!decision.is_executed());
        assert_eq!(decision.success(), None);
        assert_eq!(decision.execution_time_ms(), None);
    }

    #[test]
    fn test_outcome_recorded_once() {
        let mut decision = Decision::new(DecisionType::ToolRouting, trigger(), "why", 0.5);
        let outcome = DecisionOutcome {
            success: true,
            execution_time_ms: 3,
            error: None,
        };
        decision.record_outcome(outcome.clone()).unwrap();
        assert_eq!(decision.success(), Some(true));

        let second = decision.record_outcome(outcome);
        assert!(matches!(second, Err(Error::AlreadyExecuted { .. })));
        assert_eq!(decision.execution_time_ms(), Some(3));
    }

    #[test]
    fn test_confidence_is_clamped() {
        let decision = Decision::new(DecisionType::ContextExpansion, trigger(), "why", 1.7);
        assert!((decision.confidence_score - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_decision_ids_are_unique() {
        let a = Decision::new(DecisionType::MemorySearch, trigger(), "a", 0.5);
        let b = Decision::new(DecisionType::MemorySearch, trigger(), "b", 0.5);
        assert_ne!(a.decision_id, b.decision_id);
    }

    #[test]
    fn test_plan_step_serialization() {
        let step = PlanStep::ExpandContext { depth: 2 };
        let json = serde_json::to_string(&step).unwrap();
        assert_eq!(json, r#"{"action":"expand_context","depth":2}"#);
    }
}
