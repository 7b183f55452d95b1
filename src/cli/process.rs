//! `process` command.

use super::write_json;
use crate::Result;
use crate::backend::{EchoBackend, InMemoryStore};
use crate::config::RouterConfig;
use crate::models::{AgenticRequest, IntelligenceLevel};
use crate::services::DecisionOrchestrator;
use std::io::Write;
use std::sync::Arc;

/// Runs one request through the orchestrator and prints the response.
///
/// Uses [`EchoBackend`] and an empty [`InMemoryStore`], so the output shows
/// the routing and context work without calling a real model.
///
/// # Errors
///
/// Returns an error if output fails. Pipeline failures are reported inside
/// the response, not as errors.
pub async fn cmd_process<W: Write>(
    writer: &mut W,
    config: &RouterConfig,
    text: &str,
    user_id: Option<&str>,
    level: Option<IntelligenceLevel>,
) -> Result<()> {
    let mut builder = DecisionOrchestrator::builder()
        .backend(Arc::new(EchoBackend::new()))
        .memory_store(Arc::new(InMemoryStore::new()))
        .config(config.clone());
    if let Some(level) = level {
        builder = builder.intelligence_level(level);
    }
    let orchestrator = builder.build();

    let mut request = AgenticRequest::new(text);
    if let Some(user_id) = user_id {
        request = request.with_user(user_id);
    }

    let response = orchestrator.process_request(request).await;
    write_json(writer, &response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_process_prints_envelope() {
        let mut out = Vec::new();
        cmd_process(
            &mut out,
            &RouterConfig::default(),
            "hello",
            Some("alice"),
            Some(IntelligenceLevel::Reactive),
        )
        .await
        .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["result"]["success"], true);
        assert_eq!(value["agentic_enhancements"]["rag_decisions_made"], 3);
        assert_eq!(value["agentic_enhancements"]["intelligence_level"], "reactive");
    }
}
