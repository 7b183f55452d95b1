//! Signal-driven model selection.

use crate::classifier::RequestSignals;
use crate::models::{ModelId, ModelRole};
use crate::services::ModelRegistry;
use std::sync::Arc;
use tracing::instrument;

/// Default number of models returned by the router.
pub const DEFAULT_ROUTER_MAX_MODELS: usize = 3;

/// Default context size (tokens) at which the context master is selected.
pub const DEFAULT_LARGE_CONTEXT_THRESHOLD: usize = 100_000;

/// Selects models for a request from classifier signals.
///
/// The orchestrator model always comes first. One model per matched signal
/// follows in a fixed priority order:
///
/// | Priority | Signal | Role |
/// |----------|--------|------|
/// | 1 | complexity | `DeepThinker` |
/// | 2 | speed | `SpeedDemon` |
/// | 3 | creative | `CreativeWriter` |
/// | 4 | context size over threshold | `ContextMaster` |
/// | 5 | code | `CodeSpecialist` |
/// | 6 | tool required | `IntegrationSpecialist` |
///
/// The list is deduplicated in first-seen order and truncated to the cap.
#[derive(Debug, Clone)]
pub struct ModelRouter {
    registry: Arc<ModelRegistry>,
    large_context_threshold: usize,
}

impl ModelRouter {
    /// Creates a router over the given registry.
    #[must_use]
    pub const fn new(registry: Arc<ModelRegistry>) -> Self {
        Self {
            registry,
            large_context_threshold: DEFAULT_LARGE_CONTEXT_THRESHOLD,
        }
    }

    /// Sets the large-context threshold in tokens.
    #[must_use]
    pub fn with_large_context_threshold(mut self, threshold: usize) -> Self {
        self.large_context_threshold = threshold;
        self
    }

    /// The registry backing this router.
    #[must_use]
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Selects an ordered, duplicate-free list of at most `max_models` ids.
    ///
    /// `max_models` is clamped to at least one. Never fails.
    #[instrument(skip(self, text), fields(text_length = text.len()))]
    pub fn select_models(
        &self,
        text: &str,
        context_size: Option<usize>,
        max_models: usize,
    ) -> Vec<ModelId> {
        let signals = RequestSignals::analyze(text);
        self.select_for_signals(&signals, context_size, max_models)
    }

    /// Same as [`Self::select_models`] with precomputed signals.
    #[must_use]
    pub fn select_for_signals(
        &self,
        signals: &RequestSignals,
        context_size: Option<usize>,
        max_models: usize,
    ) -> Vec<ModelId> {
        let cap = max_models.max(1);
        let large_context = context_size.is_some_and(|size| size >= self.large_context_threshold);

        let mut selected = vec![self.registry.orchestrator()];
        let candidates = [
            (signals.complex, ModelRole::DeepThinker),
            (signals.speed, ModelRole::SpeedDemon),
            (signals.creative, ModelRole::CreativeWriter),
            (large_context, ModelRole::ContextMaster),
            (signals.code, ModelRole::CodeSpecialist),
            (signals.tool_required, ModelRole::IntegrationSpecialist),
        ];
        for (matched, role) in candidates {
            if matched {
                push_unique(&mut selected, self.registry.id_for(role));
            }
        }
        selected.truncate(cap);

        tracing::debug!(
            models = ?selected.iter().map(ModelId::as_str).collect::<Vec<_>>(),
            cap,
            large_context,
            "Selected models"
        );
        metrics::counter!("router_selections_total").increment(1);

        selected
    }
}

/// Appends `id` unless it is already present.
pub(crate) fn push_unique(list: &mut Vec<ModelId>, id: ModelId) {
    if !list.contains(&id) {
        list.push(id);
    }
}
