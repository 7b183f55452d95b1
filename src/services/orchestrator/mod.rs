//! Decision orchestrator.
//!
//! Turns a request into typed decisions, executes them, selects models and
//! delegates to the message backend. Each request walks the same stages:
//!
//! ```text
//! Idle -> Deciding -> Executing -> ModelSelecting -> Delegating
//!      -> Learning -> [Predicting] -> Done
//! ```
//!
//! # Failure Isolation
//!
//! | Stage | On failure |
//! |-------|------------|
//! | Executing | Decision marked failed, remaining decisions still run |
//! | Delegating | Fallback reply substituted, `error` flag set |
//! | Learning | Logged and skipped |
//! | Predicting | Detached task, outcome never observed |
//!
//! [`DecisionOrchestrator::process_request`] never returns an error.
//!
//! # Shared State
//!
//! The decision history and [`RagMetrics`] are owned by the orchestrator and
//! only written by it. Share one instance per process behind an `Arc`.

mod executor;
mod history;
mod planner;

pub use history::{DEFAULT_HISTORY_CAPACITY, DEFAULT_SUCCESS_RATE, DecisionHistory, RagMetrics};

use crate::backend::{EchoBackend, InMemoryStore, MemoryStore, MessageBackend};
use crate::classifier::RequestSignals;
use crate::config::RouterConfig;
use crate::models::{
    AgenticEnhancements, AgenticRequest, AgenticResponse, BackendReply, Decision, DecisionOutcome,
    EnhancedContext, IntelligenceLevel, MessageOptions, ModelId, ModelRole, TriggerContext,
};
use crate::observability::{RequestContext, scope_request_context};
use crate::services::router::push_unique;
use crate::services::{
    CrossSessionLearner, MemorySearchStrategyEngine, ModelRegistry, ModelRouter,
    PredictiveContextEngine,
};
use executor::ExecutionContext;
use planner::{Planner, PlanningFacts};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::Instrument;

/// Context richness at which the context master is selected on merit.
const RICH_CONTEXT_SOURCES: usize = 2;

/// Smallest final model list: orchestrator plus context master.
const MIN_FINAL_MODELS: usize = 2;

#[derive(Debug, Default)]
struct OrchestratorState {
    history: DecisionHistory,
    metrics: RagMetrics,
}

/// Central decision pipeline.
///
/// # Example
///
/// ```rust,ignore
/// let orchestrator = DecisionOrchestrator::builder()
///     .backend(Arc::new(EchoBackend::new()))
///     .build();
/// let response = orchestrator.process_request(AgenticRequest::new("quickly fix this")).await;
/// ```
pub struct DecisionOrchestrator {
    backend: Arc<dyn MessageBackend>,
    memory_store: Arc<dyn MemoryStore>,
    registry: Arc<ModelRegistry>,
    router: ModelRouter,
    strategy: MemorySearchStrategyEngine,
    learner: CrossSessionLearner,
    predictions: Arc<PredictiveContextEngine>,
    config: RouterConfig,
    level: AtomicU8,
    state: Mutex<OrchestratorState>,
}

impl DecisionOrchestrator {
    /// Returns a builder with default collaborators.
    #[must_use]
    pub fn builder() -> DecisionOrchestratorBuilder {
        DecisionOrchestratorBuilder::default()
    }

    /// Processes one request through every stage.
    pub async fn process_request(&self, request: AgenticRequest) -> AgenticResponse {
        let context = RequestContext::new();
        let span = tracing::info_span!(
            "process_request",
            request_id = %context.request_id(),
            user_id = %request.user_id,
        );
        scope_request_context(context, self.run(request))
            .instrument(span)
            .await
    }

    async fn run(&self, request: AgenticRequest) -> AgenticResponse {
        let started = Instant::now();
        let level = self.intelligence_level();
        metrics::counter!("orchestrator_requests_total", "level" => level.as_str()).increment(1);

        tracing::debug!(stage = "deciding", level = %level, "Orchestrator stage");
        let trigger = TriggerContext::new(request.text.clone(), request.user_id.clone(), level);
        let decisions = self.plan(&trigger);

        tracing::debug!(stage = "executing", decisions = decisions.len(), "Orchestrator stage");
        let (decisions, enhanced) = self.execute_all(decisions).await;

        tracing::debug!(
            stage = "model_selecting",
            richness = enhanced.richness(),
            "Orchestrator stage"
        );
        let models = self.select_final_models(&trigger.signals, request.context_size, &enhanced);

        tracing::debug!(stage = "delegating", backend = self.backend.name(), "Orchestrator stage");
        let (result, error) = self.delegate(&request.text, &enhanced, &models).await;

        tracing::debug!(stage = "learning", "Orchestrator stage");
        self.record(&decisions);

        if level.enables_prediction() {
            tracing::debug!(stage = "predicting", "Orchestrator stage");
            self.spawn_prediction(&request);
        }

        let processing_time_ms = elapsed_ms(started);
        #[allow(clippy::cast_precision_loss)]
        let duration_ms = processing_time_ms as f64;
        metrics::histogram!("orchestrator_request_duration_ms").record(duration_ms);
        tracing::info!(
            decisions = decisions.len(),
            models = models.len(),
            error,
            processing_time_ms,
            "Processed request"
        );

        AgenticResponse {
            result,
            agentic_enhancements: AgenticEnhancements {
                rag_decisions_made: decisions.len(),
                context_sources_used: enhanced.richness(),
                models_used: models,
                processing_time_ms,
                intelligence_level: level,
                error,
            },
        }
    }

    /// Produces the decisions for a request without executing them.
    ///
    /// Only the prediction cache is consulted; a hit is counted in
    /// [`RagMetrics::cache_hits`].
    #[must_use]
    pub fn decide(&self, request: &AgenticRequest) -> Vec<Decision> {
        let trigger = TriggerContext::new(
            request.text.clone(),
            request.user_id.clone(),
            self.intelligence_level(),
        );
        self.plan(&trigger)
    }

    fn plan(&self, trigger: &TriggerContext) -> Vec<Decision> {
        let prediction_hit = self.predictions.cached(&trigger.request_text).is_some();
        if prediction_hit {
            metrics::counter!("prediction_cache_hits_total").increment(1);
            self.with_state(|state| state.metrics.cache_hits += 1);
        }

        let planner = Planner {
            registry: &self.registry,
            strategy: &self.strategy,
            learning_window: self.config.learning_window,
        };
        planner.plan(
            trigger,
            PlanningFacts {
                history_success_rate: self.success_rate(),
                prediction_hit,
            },
        )
    }

    async fn execute_all(&self, mut decisions: Vec<Decision>) -> (Vec<Decision>, EnhancedContext) {
        let history = self.history_snapshot(self.config.learning_window);
        let ctx = ExecutionContext {
            memory_store: self.memory_store.as_ref(),
            learner: &self.learner,
            predictions: &self.predictions,
            history: &history,
            history_success_rate: self.success_rate(),
        };

        let mut enhanced = EnhancedContext::new();
        for decision in &mut decisions {
            let started = Instant::now();
            let result = executor::execute(decision, &ctx, &mut enhanced).await;
            let execution_time_ms = elapsed_ms(started);

            let outcome = match result {
                Ok(()) => DecisionOutcome::new(true, execution_time_ms, None),
                Err(e) => {
                    tracing::warn!(
                        decision_id = %decision.decision_id,
                        decision_type = %decision.decision_type,
                        error = %e,
                        "Decision execution failed"
                    );
                    DecisionOutcome::new(false, execution_time_ms, Some(e.to_string()))
                },
            };
            let status = if outcome.success { "success" } else { "failure" };
            metrics::counter!(
                "orchestrator_decisions_total",
                "type" => decision.decision_type.as_str(),
                "status" => status
            )
            .increment(1);

            if let Err(e) = decision.record_outcome(outcome) {
                tracing::warn!(error = %e, "Decision outcome already recorded");
            }
        }

        (decisions, enhanced)
    }

    fn select_final_models(
        &self,
        signals: &RequestSignals,
        context_size: Option<usize>,
        enhanced: &EnhancedContext,
    ) -> Vec<ModelId> {
        let cap = self.config.max_models.max(MIN_FINAL_MODELS);
        let mut models = self.router.select_for_signals(
            signals,
            context_size,
            self.config.router_max_models,
        );

        if signals.complexity_score > self.config.deep_thinker_threshold {
            push_unique(&mut models, self.registry.id_for(ModelRole::DeepThinker));
        }
        if signals.code {
            push_unique(&mut models, self.registry.id_for(ModelRole::CodeSpecialist));
        }
        if signals.creative {
            push_unique(&mut models, self.registry.id_for(ModelRole::CreativeWriter));
        }
        if enhanced.richness() >= RICH_CONTEXT_SOURCES {
            push_unique(&mut models, self.registry.id_for(ModelRole::ContextMaster));
        }
        models.truncate(cap);

        let context_master = self.registry.id_for(ModelRole::ContextMaster);
        if !models.contains(&context_master) {
            if models.len() >= cap {
                models.pop();
            }
            models.push(context_master);
        }
        models
    }

    async fn delegate(
        &self,
        text: &str,
        enhanced: &EnhancedContext,
        models: &[ModelId],
    ) -> (BackendReply, bool) {
        let options = MessageOptions {
            enhanced_context: enhanced.clone(),
            selected_models: models.to_vec(),
            agentic_mode: true,
        };

        match self.backend.send_message(text, options).await {
            Ok(reply) if reply.success => (reply, false),
            Ok(reply) => {
                let cause = reply
                    .error
                    .unwrap_or_else(|| "backend reported failure".to_string());
                tracing::warn!(
                    backend = self.backend.name(),
                    error = %cause,
                    "Backend rejected request"
                );
                (BackendReply::fallback(cause), true)
            },
            Err(e) => {
                tracing::warn!(backend = self.backend.name(), error = %e, "Delegation failed");
                (BackendReply::fallback(e.to_string()), true)
            },
        }
    }

    fn record(&self, decisions: &[Decision]) {
        let recorded = self.with_state(|state| {
            state.history.extend(decisions.iter().cloned());
            state.metrics.record_decisions(decisions);
        });
        if recorded.is_none() {
            tracing::warn!("Orchestrator state lock poisoned, skipping history update");
        }
    }

    fn spawn_prediction(&self, request: &AgenticRequest) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("No async runtime, skipping predictive context");
            return;
        };
        let engine = Arc::clone(&self.predictions);
        let text = request.text.clone();
        let user_id = request.user_id.clone();
        drop(handle.spawn(
            async move {
                engine.predict(&text, &user_id);
            }
            .in_current_span(),
        ));
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut OrchestratorState) -> T) -> Option<T> {
        self.state.lock().ok().map(|mut state| f(&mut state))
    }

    /// Current intelligence level.
    #[must_use]
    pub fn intelligence_level(&self) -> IntelligenceLevel {
        IntelligenceLevel::from_value(self.level.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Changes the intelligence level for subsequent requests.
    pub fn set_intelligence_level(&self, level: IntelligenceLevel) {
        let previous = self.level.swap(level.value(), Ordering::Relaxed);
        tracing::info!(from = previous, to = level.value(), "Intelligence level changed");
    }

    /// Rolling success rate over the decision history (0.8 when empty).
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        self.with_state(|state| state.history.success_rate())
            .unwrap_or(DEFAULT_SUCCESS_RATE)
    }

    /// Snapshot of the process-wide counters.
    #[must_use]
    pub fn rag_metrics(&self) -> RagMetrics {
        self.with_state(|state| state.metrics).unwrap_or_default()
    }

    /// Folds caller feedback into the satisfaction mean.
    pub fn record_satisfaction(&self, score: f64) {
        self.with_state(|state| state.metrics.record_satisfaction(score));
    }

    /// Most recent `window` history entries, oldest first.
    #[must_use]
    pub fn history_snapshot(&self, window: usize) -> Vec<Decision> {
        self.with_state(|state| state.history.snapshot(window))
            .unwrap_or_default()
    }

    /// Number of decisions in history.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.with_state(|state| state.history.len()).unwrap_or(0)
    }

    /// The model registry.
    #[must_use]
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// The cross-session learner.
    #[must_use]
    pub const fn learner(&self) -> &CrossSessionLearner {
        &self.learner
    }

    /// The predictive context engine.
    #[must_use]
    pub fn predictions(&self) -> &PredictiveContextEngine {
        &self.predictions
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }
}

/// Builder for [`DecisionOrchestrator`].
///
/// Missing collaborators default to [`EchoBackend`], an empty
/// [`InMemoryStore`] and the built-in registry.
#[derive(Default)]
pub struct DecisionOrchestratorBuilder {
    backend: Option<Arc<dyn MessageBackend>>,
    memory_store: Option<Arc<dyn MemoryStore>>,
    registry: Option<Arc<ModelRegistry>>,
    config: RouterConfig,
}

impl DecisionOrchestratorBuilder {
    /// Sets the message backend.
    #[must_use]
    pub fn backend(mut self, backend: Arc<dyn MessageBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Sets the memory store.
    #[must_use]
    pub fn memory_store(mut self, store: Arc<dyn MemoryStore>) -> Self {
        self.memory_store = Some(store);
        self
    }

    /// Sets the model registry.
    #[must_use]
    pub fn registry(mut self, registry: Arc<ModelRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the initial intelligence level.
    #[must_use]
    pub fn intelligence_level(mut self, level: IntelligenceLevel) -> Self {
        self.config.intelligence_level = level;
        self
    }

    /// Builds the orchestrator.
    #[must_use]
    pub fn build(self) -> DecisionOrchestrator {
        let config = self.config;
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(ModelRegistry::builtin()));
        let router = ModelRouter::new(Arc::clone(&registry))
            .with_large_context_threshold(config.large_context_threshold);

        DecisionOrchestrator {
            backend: self
                .backend
                .unwrap_or_else(|| Arc::new(EchoBackend::new())),
            memory_store: self
                .memory_store
                .unwrap_or_else(|| Arc::new(InMemoryStore::new())),
            router,
            registry,
            strategy: MemorySearchStrategyEngine::new(),
            learner: CrossSessionLearner::new(config.learner_capacity),
            predictions: Arc::new(PredictiveContextEngine::new(
                config.prediction_cache_capacity,
                Duration::from_secs(config.prediction_ttl_secs),
            )),
            level: AtomicU8::new(config.intelligence_level.value()),
            state: Mutex::new(OrchestratorState {
                history: DecisionHistory::new(config.history_capacity),
                metrics: RagMetrics::default(),
            }),
            config,
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
