//! Integration tests for the decision pipeline.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::float_cmp,
    clippy::cast_precision_loss
)]

use agentic_router::backend::{EchoBackend, InMemoryStore};
use agentic_router::models::{
    AgenticRequest, BackendReply, DecisionType, FALLBACK_MESSAGE, MemoryRecord, MessageOptions,
};
use agentic_router::services::DEFAULT_SUCCESS_RATE;
use agentic_router::{
    DecisionOrchestrator, Error, IntelligenceLevel, MemoryStore, MessageBackend, Result,
    RouterConfig,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Store whose every call fails.
struct UnreachableStore;

#[async_trait]
impl MemoryStore for UnreachableStore {
    async fn load_personal_memories(&self, _user_id: &str) -> Result<Vec<MemoryRecord>> {
        Err(Error::Unavailable("memory store".to_string()))
    }

    async fn search_system_patterns(&self, _query: &str) -> Result<Vec<MemoryRecord>> {
        Err(Error::Unavailable("memory store".to_string()))
    }

    async fn search_related(&self, _topics: &[String]) -> Result<Vec<MemoryRecord>> {
        Err(Error::Unavailable("memory store".to_string()))
    }
}

/// Backend that always errors and counts its calls.
#[derive(Default)]
struct BrokenBackend {
    calls: AtomicUsize,
}

#[async_trait]
impl MessageBackend for BrokenBackend {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn send_message(&self, _text: &str, _options: MessageOptions) -> Result<BackendReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::OperationFailed {
            operation: "send_message".to_string(),
            cause: "connection reset".to_string(),
        })
    }
}

/// Backend that answers but reports failure.
struct RejectingBackend;

#[async_trait]
impl MessageBackend for RejectingBackend {
    fn name(&self) -> &'static str {
        "rejecting"
    }

    async fn send_message(&self, _text: &str, _options: MessageOptions) -> Result<BackendReply> {
        Ok(BackendReply {
            success: false,
            response: serde_json::Value::Null,
            error: Some("quota exceeded".to_string()),
        })
    }
}

fn orchestrator_at(level: IntelligenceLevel) -> DecisionOrchestrator {
    DecisionOrchestrator::builder()
        .backend(Arc::new(EchoBackend::new()))
        .memory_store(Arc::new(InMemoryStore::new()))
        .intelligence_level(level)
        .build()
}

#[tokio::test]
async fn test_faulty_collaborators_never_escape() {
    let backend = Arc::new(BrokenBackend::default());
    let orchestrator = DecisionOrchestrator::builder()
        .backend(Arc::clone(&backend) as Arc<dyn MessageBackend>)
        .memory_store(Arc::new(UnreachableStore))
        .build();

    let response = orchestrator
        .process_request(AgenticRequest::new("explain the architecture of this service"))
        .await;

    assert!(response.agentic_enhancements.rag_decisions_made >= 1);
    assert!(response.agentic_enhancements.error);
    assert!(!response.result.success);
    assert_eq!(response.result.response["message"], FALLBACK_MESSAGE);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);

    let history = orchestrator.history_snapshot(usize::MAX);
    let failed: Vec<_> = history
        .iter()
        .filter(|d| d.success() == Some(false))
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].decision_type, DecisionType::MemorySearch);
    assert!(history.iter().all(|d| d.is_executed()));
}

#[tokio::test]
async fn test_unsuccessful_reply_becomes_fallback() {
    let orchestrator = DecisionOrchestrator::builder()
        .backend(Arc::new(RejectingBackend))
        .build();

    let response = orchestrator.process_request(AgenticRequest::new("hello")).await;

    assert!(response.agentic_enhancements.error);
    assert_eq!(response.result.error.as_deref(), Some("quota exceeded"));
    assert_eq!(response.result.response["fallback"], true);
}

#[tokio::test]
async fn test_history_stays_bounded() {
    let orchestrator = orchestrator_at(IntelligenceLevel::Reactive);

    for i in 0..150 {
        orchestrator
            .process_request(AgenticRequest::new(format!("request number {i}")))
            .await;
    }

    assert_eq!(orchestrator.history_len(), 100);
    assert_eq!(orchestrator.rag_metrics().total_decisions, 450);
}

#[tokio::test]
async fn test_reactive_level_makes_three_decisions() {
    let orchestrator = orchestrator_at(IntelligenceLevel::Reactive);

    let response = orchestrator
        .process_request(AgenticRequest::new("explain how this works"))
        .await;
    assert_eq!(response.agentic_enhancements.rag_decisions_made, 3);

    let types: Vec<_> = orchestrator
        .history_snapshot(3)
        .iter()
        .map(|d| d.decision_type)
        .collect();
    assert_eq!(
        types,
        vec![
            DecisionType::MemorySearch,
            DecisionType::ContextExpansion,
            DecisionType::ToolRouting,
        ]
    );
}

#[tokio::test]
async fn test_autonomous_level_adds_learning() {
    let orchestrator = orchestrator_at(IntelligenceLevel::Autonomous);

    let decisions = orchestrator.decide(&AgenticRequest::new("hello"));
    assert_eq!(decisions.len(), 4);
    assert_eq!(decisions[2].decision_type, DecisionType::CrossSessionLearning);
}

#[tokio::test]
async fn test_complex_explanation_end_to_end() {
    let orchestrator = orchestrator_at(IntelligenceLevel::Autonomous);
    let request = AgenticRequest::new("explain this complex algorithm in detail");

    let decisions = orchestrator.decide(&request);
    let expansion = decisions
        .iter()
        .find(|d| d.decision_type == DecisionType::ContextExpansion)
        .unwrap();
    assert!(expansion.reasoning.starts_with("Context expansion needed"));

    let response = orchestrator.process_request(request).await;
    let models: Vec<&str> = response
        .agentic_enhancements
        .models_used
        .iter()
        .map(|m| m.as_str())
        .collect();
    assert_eq!(models[0], "conductor");
    assert!(models.contains(&"deep-thinker"));
    assert!(models.contains(&"context-master"));
    assert!(models.len() <= orchestrator.config().max_models);
    assert!(!response.agentic_enhancements.error);
}

#[tokio::test]
async fn test_quick_fix_routes_to_fastest_model() {
    let orchestrator = orchestrator_at(IntelligenceLevel::Reactive);
    let fastest = orchestrator.registry().fastest().unwrap().id.clone();

    let response = orchestrator
        .process_request(AgenticRequest::new("quickly fix this bug"))
        .await;

    assert!(response.agentic_enhancements.models_used.contains(&fastest));
    assert_eq!(fastest.as_str(), "speed-demon");
}

#[tokio::test]
async fn test_success_rate_tracks_history() {
    let orchestrator = DecisionOrchestrator::builder()
        .memory_store(Arc::new(UnreachableStore))
        .intelligence_level(IntelligenceLevel::Reactive)
        .build();
    assert_eq!(orchestrator.success_rate(), DEFAULT_SUCCESS_RATE);

    orchestrator.process_request(AgenticRequest::new("hello")).await;
    orchestrator.process_request(AgenticRequest::new("hello again")).await;

    let history = orchestrator.history_snapshot(usize::MAX);
    let succeeded = history.iter().filter(|d| d.success() == Some(true)).count();
    assert_eq!(succeeded, 4);
    assert!((orchestrator.success_rate() - succeeded as f64 / history.len() as f64).abs() < 1e-9);
}

#[tokio::test]
async fn test_warm_prediction_is_reused() {
    let orchestrator = orchestrator_at(IntelligenceLevel::Reactive);
    let text = "explain the borrow checker";
    orchestrator.predictions().predict(text, "default");

    let decisions = orchestrator.decide(&AgenticRequest::new(text));
    let expansion = decisions
        .iter()
        .find(|d| d.decision_type == DecisionType::ContextExpansion)
        .unwrap();
    assert!(expansion.reasoning.contains("reusing cached prediction"));
    assert_eq!(orchestrator.rag_metrics().cache_hits, 1);
}

async fn wait_for_predictions(orchestrator: &DecisionOrchestrator) {
    for _ in 0..16 {
        if !orchestrator.predictions().is_empty() {
            return;
        }
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_predictive_level_warms_cache_in_background() {
    let orchestrator = orchestrator_at(IntelligenceLevel::Predictive);
    let text = "explain how this async function works";

    orchestrator.process_request(AgenticRequest::new(text)).await;
    wait_for_predictions(&orchestrator).await;
    assert_eq!(orchestrator.predictions().len(), 1);
    assert_eq!(orchestrator.predictions().cached(text).unwrap().len(), 2);
    assert_eq!(orchestrator.rag_metrics().cache_hits, 0);

    orchestrator.process_request(AgenticRequest::new(text)).await;
    assert_eq!(orchestrator.rag_metrics().cache_hits, 1);
}

#[tokio::test]
async fn test_proactive_level_skips_prediction() {
    let orchestrator = orchestrator_at(IntelligenceLevel::Proactive);
    let text = "explain how this async function works";

    orchestrator.process_request(AgenticRequest::new(text)).await;
    wait_for_predictions(&orchestrator).await;
    assert!(orchestrator.predictions().is_empty());

    orchestrator.process_request(AgenticRequest::new(text)).await;
    assert_eq!(orchestrator.rag_metrics().cache_hits, 0);
}

#[tokio::test]
async fn test_echo_reply_carries_request_id() {
    let orchestrator = orchestrator_at(IntelligenceLevel::Reactive);
    let first = orchestrator.process_request(AgenticRequest::new("hello")).await;
    let second = orchestrator.process_request(AgenticRequest::new("hello")).await;

    let first_id = first.result.response["request_id"].as_str().unwrap().to_string();
    let second_id = second.result.response["request_id"].as_str().unwrap();
    assert!(!first_id.is_empty());
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn test_config_caps_final_models() {
    let config = RouterConfig::default().with_max_models(2);
    let orchestrator = DecisionOrchestrator::builder().config(config).build();

    let response = orchestrator
        .process_request(AgenticRequest::new(
            "quickly write a creative story about a complex function",
        ))
        .await;

    let models: Vec<&str> = response
        .agentic_enhancements
        .models_used
        .iter()
        .map(|m| m.as_str())
        .collect();
    assert_eq!(models, vec!["conductor", "context-master"]);
}

#[tokio::test]
async fn test_level_change_applies_to_next_request() {
    let orchestrator = orchestrator_at(IntelligenceLevel::Orchestrative);
    orchestrator.set_intelligence_level(IntelligenceLevel::Proactive);

    let response = orchestrator.process_request(AgenticRequest::new("hello")).await;
    assert_eq!(
        response.agentic_enhancements.intelligence_level,
        IntelligenceLevel::Proactive
    );
    assert_eq!(response.agentic_enhancements.rag_decisions_made, 3);
}

#[tokio::test]
async fn test_personal_memories_reach_backend() {
    let store = InMemoryStore::new()
        .with_personal(MemoryRecord::new("prefers short answers", "alice").with_confidence(0.9))
        .with_personal(MemoryRecord::new("likes tables", "alice").with_confidence(0.1));
    let orchestrator = DecisionOrchestrator::builder()
        .memory_store(Arc::new(store))
        .intelligence_level(IntelligenceLevel::Reactive)
        .build();

    let response = orchestrator
        .process_request(AgenticRequest::new("hello").with_user("alice"))
        .await;

    assert_eq!(response.result.response["memories"], 1);
}
