//! Request and response envelope types.

use super::{EnhancedContext, IntelligenceLevel, ModelId};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Default user when the caller does not provide one.
pub const DEFAULT_USER_ID: &str = "default";

/// Message shown when the backend could not produce a response.
pub const FALLBACK_MESSAGE: &str =
    "[fallback] The assistant could not complete this request. Please try again.";

/// A request entering the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgenticRequest {
    /// Free-text user input.
    pub text: String,
    /// Requesting user.
    pub user_id: String,
    /// Caller-supplied context size in tokens, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_size: Option<usize>,
}

impl AgenticRequest {
    /// Creates a request for the default user.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            user_id: DEFAULT_USER_ID.to_string(),
            context_size: None,
        }
    }

    /// Sets the user.
    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Sets the caller-supplied context size.
    #[must_use]
    pub const fn with_context_size(mut self, tokens: usize) -> Self {
        self.context_size = Some(tokens);
        self
    }
}

/// Options handed to the message backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageOptions {
    /// Aggregated context.
    pub enhanced_context: EnhancedContext,
    /// Models selected for the request.
    pub selected_models: Vec<ModelId>,
    /// Always true when sent by the orchestrator.
    pub agentic_mode: bool,
}

/// Reply from the message backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendReply {
    /// Whether the backend produced a response.
    pub success: bool,
    /// Backend payload.
    pub response: Value,
    /// Error message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BackendReply {
    /// Creates a successful reply.
    #[must_use]
    pub const fn ok(response: Value) -> Self {
        Self {
            success: true,
            response,
            error: None,
        }
    }

    /// Creates the synthetic reply used when delegation fails.
    #[must_use]
    pub fn fallback(error: impl Into<String>) -> Self {
        Self {
            success: false,
            response: json!({ "message": FALLBACK_MESSAGE, "fallback": true }),
            error: Some(error.into()),
        }
    }
}

/// Metadata describing how the orchestrator handled a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgenticEnhancements {
    /// Number of decisions made for this request.
    pub rag_decisions_made: usize,
    /// Number of populated context buckets.
    pub context_sources_used: usize,
    /// Models the request was delegated with.
    pub models_used: Vec<ModelId>,
    /// Elapsed time for the whole request.
    pub processing_time_ms: u64,
    /// Intelligence level name.
    pub intelligence_level: IntelligenceLevel,
    /// True when delegation failed and a fallback was substituted.
    pub error: bool,
}

/// Response envelope returned for every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgenticResponse {
    /// Delegated (or fallback) result.
    pub result: BackendReply,
    /// Orchestration metadata.
    pub agentic_enhancements: AgenticEnhancements,
}
