//! # Agentic Router
//!
//! Rule-based decision and model routing pipeline for AI assistants.
//!
//! A request is classified with regex and keyword predicates, turned into a
//! small set of typed decisions (memory search, context expansion,
//! cross-session learning, tool routing), executed against pluggable
//! collaborators, and handed to a message backend together with the selected
//! models and the aggregated context.
//!
//! ## Features
//!
//! - Static model registry with capability, latency and cost metadata
//! - Shared request classifier used by every decision maker
//! - Deterministic decision pipeline with isolated per-decision failures
//! - Bounded decision history with rolling success rate
//! - Cross-session learner and predictive context cache (bounded LRU)
//!
//! ## Example
//!
//! ```rust,ignore
//! use agentic_router::{AgenticRequest, DecisionOrchestrator};
//! use agentic_router::backend::{EchoBackend, InMemoryStore};
//! use std::sync::Arc;
//!
//! let orchestrator = DecisionOrchestrator::builder()
//!     .backend(Arc::new(EchoBackend::new()))
//!     .memory_store(Arc::new(InMemoryStore::default()))
//!     .build();
//! let response = orchestrator
//!     .process_request(AgenticRequest::new("explain this complex algorithm in detail"))
//!     .await;
//! assert!(response.agentic_enhancements.rag_decisions_made >= 3);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod backend;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod models;
pub mod observability;
pub mod services;

// Re-exports for convenience
pub use backend::{MemoryStore, MessageBackend};
pub use classifier::RequestSignals;
pub use config::RouterConfig;
pub use models::{
    AgenticEnhancements, AgenticRequest, AgenticResponse, BackendReply, Decision, DecisionId,
    DecisionType, EnhancedContext, IntelligenceLevel, MemorySearchStrategy, ModelId,
    ModelProfile, ModelRole,
};
pub use services::{
    CrossSessionLearner, DecisionOrchestrator, MemorySearchStrategyEngine, ModelRegistry,
    ModelRouter, PredictiveContextEngine,
};

/// Error type for routing and orchestration operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Duplicate registry ids, malformed config values, bad CLI arguments |
/// | `OperationFailed` | Collaborator calls fail, config files cannot be read or parsed |
/// | `AlreadyExecuted` | An outcome is recorded twice for the same decision |
/// | `Unavailable` | A collaborator is not reachable or not configured |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - Two registry profiles share an id
    /// - An intelligence level or config value cannot be parsed
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - A memory store or message backend returns an error
    /// - Config files cannot be read or parsed
    /// - Observability initialization fails
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A decision outcome was recorded more than once.
    #[error("decision {decision_id} was already executed")]
    AlreadyExecuted {
        /// The decision that was executed twice.
        decision_id: String,
    },

    /// A collaborator is unavailable.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for routing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the current Unix timestamp in milliseconds.
///
/// Falls back to 0 if the system clock is before the Unix epoch.
#[must_use]
pub fn current_timestamp_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "invalid input: test error");

        let err = Error::OperationFailed {
            operation: "load_personal_memories".to_string(),
            cause: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "operation 'load_personal_memories' failed: connection refused"
        );

        let err = Error::AlreadyExecuted {
            decision_id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "decision abc was already executed");
    }

    #[test]
    fn test_timestamp_is_recent() {
        // 2020-01-01 in millis
        assert!(current_timestamp_millis() > 1_577_836_800_000);
    }
}
