//! Data models for the routing pipeline.
//!
//! This module contains the core data structures shared by the classifier,
//! router, orchestrator and collaborators.

mod context;
mod decision;
mod intelligence;
mod profile;
mod response;

pub use context::{EnhancedContext, MemoryRecord, MemorySearchStrategy};
pub use decision::{Decision, DecisionId, DecisionOutcome, DecisionType, PlanStep, TriggerContext};
pub use intelligence::IntelligenceLevel;
pub use profile::{Capability, CostTier, LatencyTier, ModelId, ModelProfile, ModelRole};
pub use response::{
    AgenticEnhancements, AgenticRequest, AgenticResponse, BackendReply, DEFAULT_USER_ID,
    FALLBACK_MESSAGE, MessageOptions,
};
