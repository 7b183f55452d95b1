//! Routing and orchestration services.
//!
//! Leaf services (registry, router, memory strategy, learner, prediction) are
//! synchronous and hold no cross-request state except the learner's pattern
//! store and the prediction cache. The [`DecisionOrchestrator`] composes them.

pub mod learner;
mod memory_strategy;
mod orchestrator;
pub mod prediction;
mod registry;
pub mod router;

pub use learner::{AdaptedPreferences, CrossSessionLearner, LearningSummary, SessionData};
pub use memory_strategy::MemorySearchStrategyEngine;
pub use orchestrator::{
    DEFAULT_HISTORY_CAPACITY, DEFAULT_SUCCESS_RATE, DecisionHistory, DecisionOrchestrator,
    DecisionOrchestratorBuilder, RagMetrics,
};
pub use prediction::{Prediction, PredictiveContextEngine};
pub use registry::ModelRegistry;
pub use router::ModelRouter;
