//! Decision history and process-wide counters.

use crate::models::Decision;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default decision history capacity.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Success rate reported when no decisions have been recorded.
pub const DEFAULT_SUCCESS_RATE: f64 = 0.8;

/// Bounded FIFO of executed decisions.
#[derive(Debug, Clone)]
pub struct DecisionHistory {
    entries: VecDeque<Decision>,
    capacity: usize,
}

impl DecisionHistory {
    /// Creates a history holding at most `capacity` decisions (minimum one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a decision, evicting the oldest entry when full.
    pub fn push(&mut self, decision: Decision) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(decision);
    }

    /// Appends decisions in order.
    pub fn extend(&mut self, decisions: impl IntoIterator<Item = Decision>) {
        for decision in decisions {
            self.push(decision);
        }
    }

    /// `K / N` over the stored decisions, or 0.8 when empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.entries.is_empty() {
            return DEFAULT_SUCCESS_RATE;
        }
        let successes = self
            .entries
            .iter()
            .filter(|d| d.success() == Some(true))
            .count();
        successes as f64 / self.entries.len() as f64
    }

    /// Clones the most recent `window` decisions, oldest first.
    #[must_use]
    pub fn snapshot(&self, window: usize) -> Vec<Decision> {
        let skip = self.entries.len().saturating_sub(window);
        self.entries.iter().skip(skip).cloned().collect()
    }

    /// Number of stored decisions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of stored decisions.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for DecisionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

/// Process-wide orchestration counters. No reset is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RagMetrics {
    /// Decisions made across all requests.
    pub total_decisions: u64,
    /// Decisions that executed successfully.
    pub successful_decisions: u64,
    /// Prediction cache hits during decision making.
    pub cache_hits: u64,
    /// Running mean of reported satisfaction scores.
    pub satisfaction: f64,
    /// Number of satisfaction scores folded in.
    pub satisfaction_samples: u64,
}

impl RagMetrics {
    /// Counts one request's executed decisions.
    pub fn record_decisions(&mut self, decisions: &[Decision]) {
        self.total_decisions += decisions.len() as u64;
        self.successful_decisions += decisions
            .iter()
            .filter(|d| d.success() == Some(true))
            .count() as u64;
    }

    /// Folds a satisfaction score, clamped to [0, 1], into the running mean.
    #[allow(clippy::cast_precision_loss)]
    pub fn record_satisfaction(&mut self, score: f64) {
        let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
        self.satisfaction_samples += 1;
        self.satisfaction += (score - self.satisfaction) / self.satisfaction_samples as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DecisionOutcome, DecisionType, IntelligenceLevel, TriggerContext};

    fn decision(success: bool) -> Decision {
        let trigger = TriggerContext::new("text", "alice", IntelligenceLevel::Autonomous);
        let mut decision = Decision::new(DecisionType::MemorySearch, trigger, "test", 0.5);
        decision
            .record_outcome(DecisionOutcome::new(success, 0, None))
            .unwrap();
        decision
    }

    #[test]
    fn test_empty_success_rate_is_default() {
        let history = DecisionHistory::default();
        assert!((history.success_rate() - DEFAULT_SUCCESS_RATE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_success_rate_is_k_over_n() {
        let mut history = DecisionHistory::default();
        history.extend([decision(true), decision(false), decision(true), decision(false)]);
        assert!((history.success_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fifo_eviction() {
        let mut history = DecisionHistory::new(3);
        let first = decision(true);
        let first_id = first.decision_id.clone();
        history.push(first);
        history.extend([decision(false), decision(false), decision(false)]);

        assert_eq!(history.len(), 3);
        assert!(history.snapshot(3).iter().all(|d| d.decision_id != first_id));
        assert!(history.success_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn test_snapshot_window() {
        let mut history = DecisionHistory::default();
        history.extend([decision(true), decision(false)]);
        let window = history.snapshot(1);
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].success(), Some(false));
        assert_eq!(history.snapshot(10).len(), 2);
    }

    #[test]
    fn test_satisfaction_running_mean() {
        let mut metrics = RagMetrics::default();
        metrics.record_satisfaction(1.0);
        metrics.record_satisfaction(0.0);
        metrics.record_satisfaction(7.0);
        assert_eq!(metrics.satisfaction_samples, 3);
        assert!((metrics.satisfaction - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_record_decisions() {
        let mut metrics = RagMetrics::default();
        metrics.record_decisions(&[decision(true), decision(false)]);
        assert_eq!(metrics.total_decisions, 2);
        assert_eq!(metrics.successful_decisions, 1);
    }
}
