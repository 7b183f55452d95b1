//! Echo message backend.

use super::MessageBackend;
use crate::Result;
use crate::models::{BackendReply, MessageOptions};
use crate::observability::current_request_id;
use async_trait::async_trait;
use serde_json::json;

/// In-process backend that echoes the request and routing metadata.
///
/// The reply carries the correlation id of the enclosing request scope, or
/// `null` outside one.
///
/// Used by the CLI and tests in place of a remote service.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoBackend;

impl EchoBackend {
    /// Creates a new echo backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessageBackend for EchoBackend {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn send_message(&self, text: &str, options: MessageOptions) -> Result<BackendReply> {
        let models: Vec<&str> = options
            .selected_models
            .iter()
            .map(crate::models::ModelId::as_str)
            .collect();

        Ok(BackendReply::ok(json!({
            "message": text,
            "models": models,
            "memories": options.enhanced_context.memories.len(),
            "agentic_mode": options.agentic_mode,
            "request_id": current_request_id(),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnhancedContext, ModelId};

    #[tokio::test]
    async fn test_echo_returns_text_and_models() {
        let backend = EchoBackend::new();
        let options = MessageOptions {
            enhanced_context: EnhancedContext::new(),
            selected_models: vec![ModelId::new("conductor")],
            agentic_mode: true,
        };

        let reply = backend.send_message("hello", options).await.unwrap();
        assert!(reply.success);
        assert_eq!(reply.response["message"], json!("hello"));
        assert_eq!(reply.response["models"], json!(["conductor"]));
        assert_eq!(backend.name(), "echo");
        assert!(reply.response["request_id"].is_null());
    }

    #[tokio::test]
    async fn test_echo_carries_scoped_request_id() {
        let backend = EchoBackend::new();
        let options = MessageOptions {
            enhanced_context: EnhancedContext::new(),
            selected_models: Vec::new(),
            agentic_mode: true,
        };

        let reply = crate::observability::scope_request_context(
            crate::observability::RequestContext::from_id("req-42"),
            backend.send_message("hello", options),
        )
        .await
        .unwrap();
        assert_eq!(reply.response["request_id"], json!("req-42"));
    }
}
