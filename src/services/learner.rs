//! Cross-session learning.
//!
//! Folds decision outcomes into a bounded pattern store. Each call to
//! [`CrossSessionLearner::learn`] extracts:
//!
//! - success patterns from decisions marked successful
//! - avoidance strategies from an explicit failure list
//! - adapted preferences, falling back to fixed defaults
//!
//! Entries are keyed by `(timestamp_ms, sequence)` in an LRU cache so the
//! store stays bounded for long-running processes.

use crate::current_timestamp_millis;
use crate::models::{Decision, DecisionType, ModelId};
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::instrument;

/// Default pattern store capacity.
pub const DEFAULT_LEARNER_CAPACITY: usize = 256;

/// Preferences adapted from past sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptedPreferences {
    /// Response style.
    pub response_style: String,
    /// Level of detail.
    pub detail_level: String,
    /// Models the user tends to be served by.
    pub preferred_models: Vec<ModelId>,
}

impl Default for AdaptedPreferences {
    fn default() -> Self {
        Self {
            response_style: "adaptive".to_string(),
            detail_level: "balanced".to_string(),
            preferred_models: vec![ModelId::new("conductor")],
        }
    }
}

/// Input to one learning pass.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    /// User the session belongs to.
    pub user_id: String,
    /// Executed decisions to learn from.
    pub decisions: Vec<Decision>,
    /// Explicitly reported failures.
    pub failures: Vec<String>,
    /// Preferences supplied by the caller, if any.
    pub preferences: Option<AdaptedPreferences>,
}

impl SessionData {
    /// Creates session data for a user.
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Sets the decisions to learn from.
    #[must_use]
    pub fn with_decisions(mut self, decisions: Vec<Decision>) -> Self {
        self.decisions = decisions;
        self
    }

    /// Adds a reported failure.
    #[must_use]
    pub fn with_failure(mut self, failure: impl Into<String>) -> Self {
        self.failures.push(failure.into());
        self
    }

    /// Sets explicit preferences.
    #[must_use]
    pub fn with_preferences(mut self, preferences: AdaptedPreferences) -> Self {
        self.preferences = Some(preferences);
        self
    }
}

/// A pattern extracted from a successful decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessPattern {
    /// Decision type that succeeded.
    pub decision_type: DecisionType,
    /// Confidence the decision was made with.
    pub confidence: f32,
    /// Models selected for it.
    pub models: Vec<ModelId>,
}

/// One stored learning entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnedPatterns {
    /// User the entry was learned from.
    pub user_id: String,
    /// Success patterns.
    pub success_patterns: Vec<SuccessPattern>,
    /// Avoidance strategies.
    pub avoidance_strategies: Vec<String>,
    /// Adapted preferences.
    pub adapted_preferences: AdaptedPreferences,
    /// When the entry was learned (Unix millis).
    pub learned_at: u64,
}

/// Result of a learning pass. Counts and flags only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LearningSummary {
    /// Whether the entry was stored.
    pub stored: bool,
    /// Number of success patterns extracted.
    pub success_patterns: usize,
    /// Number of avoidance strategies extracted.
    pub avoidance_strategies: usize,
    /// Whether caller-supplied preferences were applied.
    pub preferences_adapted: bool,
    /// Store size after the pass.
    pub total_patterns: usize,
}

/// Bounded store of patterns learned across sessions.
///
/// # Lock Poisoning
///
/// A poisoned lock makes [`Self::learn`] return a summary with
/// `stored == false` and readers return empty results.
pub struct CrossSessionLearner {
    patterns: Mutex<LruCache<(u64, u64), LearnedPatterns>>,
    sequence: AtomicU64,
}

impl CrossSessionLearner {
    /// Creates a learner holding at most `capacity` entries. Zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            patterns: Mutex::new(LruCache::new(capacity)),
            sequence: AtomicU64::new(0),
        }
    }

    /// Extracts and stores patterns from a session.
    #[instrument(
        skip(self, session),
        fields(user_id = %session.user_id, decisions = session.decisions.len())
    )]
    pub fn learn(&self, session: SessionData) -> LearningSummary {
        let success_patterns: Vec<SuccessPattern> = session
            .decisions
            .iter()
            .filter(|d| d.success() == Some(true))
            .map(|d| SuccessPattern {
                decision_type: d.decision_type,
                confidence: d.confidence_score,
                models: d.selected_models.clone(),
            })
            .collect();

        let preferences_adapted = session.preferences.is_some();
        let entry = LearnedPatterns {
            user_id: session.user_id,
            avoidance_strategies: session.failures,
            adapted_preferences: session.preferences.unwrap_or_default(),
            learned_at: current_timestamp_millis(),
            success_patterns,
        };

        let summary = LearningSummary {
            stored: false,
            success_patterns: entry.success_patterns.len(),
            avoidance_strategies: entry.avoidance_strategies.len(),
            preferences_adapted,
            total_patterns: 0,
        };

        let key = (entry.learned_at, self.sequence.fetch_add(1, Ordering::Relaxed));
        let Ok(mut patterns) = self.patterns.lock() else {
            tracing::warn!("Learner lock poisoned, skipping pattern storage");
            return summary;
        };
        patterns.put(key, entry);
        let total_patterns = patterns.len();
        drop(patterns);

        tracing::debug!(
            success_patterns = summary.success_patterns,
            avoidance_strategies = summary.avoidance_strategies,
            total_patterns,
            "Stored learned patterns"
        );

        LearningSummary {
            stored: true,
            total_patterns,
            ..summary
        }
    }

    /// Preferences from the most recent entry, or the defaults.
    #[must_use]
    pub fn latest_preferences(&self) -> AdaptedPreferences {
        self.patterns
            .lock()
            .ok()
            .and_then(|patterns| {
                patterns
                    .iter()
                    .max_by_key(|(key, _)| **key)
                    .map(|(_, entry)| entry.adapted_preferences.clone())
            })
            .unwrap_or_default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.patterns.lock().map_or(0, |patterns| patterns.len())
    }
}

impl Default for CrossSessionLearner {
    fn default() -> Self {
        Self::new(DEFAULT_LEARNER_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DecisionOutcome, IntelligenceLevel, TriggerContext};

    fn executed(decision_type: DecisionType, success: bool) -> Decision {
        let trigger = TriggerContext::new("text", "alice", IntelligenceLevel::Autonomous);
        let mut decision = Decision::new(decision_type, trigger, "test", 0.7);
        decision
            .record_outcome(DecisionOutcome::new(success, 1, None))
            .unwrap();
        decision
    }

    #[test]
    fn test_learn_extracts_success_patterns() {
        let learner = CrossSessionLearner::new(8);
        let session = SessionData::new("alice").with_decisions(vec![
            executed(DecisionType::MemorySearch, true),
            executed(DecisionType::ToolRouting, false),
        ]);

        let summary = learner.learn(session);
        assert!(summary.stored);
        assert_eq!(summary.success_patterns, 1);
        assert_eq!(summary.avoidance_strategies, 0);
        assert!(!summary.preferences_adapted);
        assert_eq!(learner.pattern_count(), 1);
    }

    #[test]
    fn test_default_preferences() {
        let learner = CrossSessionLearner::new(8);
        assert_eq!(learner.latest_preferences(), AdaptedPreferences::default());

        learner.learn(SessionData::new("alice"));
        let prefs = learner.latest_preferences();
        assert_eq!(prefs.response_style, "adaptive");
        assert_eq!(prefs.detail_level, "balanced");
        assert_eq!(prefs.preferred_models, vec![ModelId::new("conductor")]);
    }

    #[test]
    fn test_explicit_failures_and_preferences() {
        let learner = CrossSessionLearner::new(8);
        let prefs = AdaptedPreferences {
            response_style: "terse".to_string(),
            ..AdaptedPreferences::default()
        };
        let summary = learner.learn(
            SessionData::new("bob")
                .with_failure("timeout talking to backend")
                .with_preferences(prefs.clone()),
        );
        assert_eq!(summary.avoidance_strategies, 1);
        assert!(summary.preferences_adapted);
        assert_eq!(learner.latest_preferences(), prefs);
        assert_eq!(learner.pattern_count(), 1);
    }

    #[test]
    fn test_store_is_bounded() {
        let learner = CrossSessionLearner::new(3);
        for _ in 0..10 {
            learner.learn(SessionData::new("alice"));
        }
        assert_eq!(learner.pattern_count(), 3);
    }
}
