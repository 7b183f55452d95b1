//! `route` and `models` commands.

use super::write_json;
use crate::Result;
use crate::models::{ModelId, ModelProfile};
use crate::services::{ModelRegistry, ModelRouter};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;

/// Output of the `route` command.
#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    /// Selected model ids in priority order.
    pub models: Vec<ModelId>,
    /// Profiles of the selected models.
    pub profiles: Vec<ModelProfile>,
}

impl RouteReport {
    /// Routes the text through the given router.
    #[must_use]
    pub fn build(
        router: &ModelRouter,
        text: &str,
        context_size: Option<usize>,
        max_models: usize,
    ) -> Self {
        let models = router.select_models(text, context_size, max_models);
        let profiles = models
            .iter()
            .filter_map(|id| router.registry().get(id).cloned())
            .collect();
        Self { models, profiles }
    }
}

/// Executes the `route` command against the built-in registry.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn cmd_route<W: Write>(
    writer: &mut W,
    text: &str,
    context_size: Option<usize>,
    max_models: usize,
    large_context_threshold: usize,
) -> Result<()> {
    let router = ModelRouter::new(Arc::new(ModelRegistry::builtin()))
        .with_large_context_threshold(large_context_threshold);
    write_json(writer, &RouteReport::build(&router, text, context_size, max_models))
}

/// Executes the `models` command.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn cmd_models<W: Write>(writer: &mut W) -> Result<()> {
    write_json(writer, ModelRegistry::builtin().profiles())
}
