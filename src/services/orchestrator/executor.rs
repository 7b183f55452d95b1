//! Decision execution.
//!
//! One executor per [`DecisionType`] variant. Each reads its own plan steps and
//! writes into exactly one [`EnhancedContext`] bucket. A failing executor
//! leaves its bucket untouched.

use crate::backend::MemoryStore;
use crate::models::{Decision, DecisionType, EnhancedContext, MemoryRecord, PlanStep};
use crate::services::learner::SessionData;
use crate::services::{CrossSessionLearner, PredictiveContextEngine};
use crate::{Error, Result};
use serde_json::{Value, json};

/// Collaborators and state available to executors.
pub(super) struct ExecutionContext<'a> {
    pub memory_store: &'a dyn MemoryStore,
    pub learner: &'a CrossSessionLearner,
    pub predictions: &'a PredictiveContextEngine,
    /// Most recent history entries, oldest first.
    pub history: &'a [Decision],
    pub history_success_rate: f64,
}

/// Runs a decision's plan against its sub-engine.
///
/// # Errors
///
/// Returns the first collaborator error. The context is not modified on error.
pub(super) async fn execute(
    decision: &Decision,
    ctx: &ExecutionContext<'_>,
    enhanced: &mut EnhancedContext,
) -> Result<()> {
    match decision.decision_type {
        DecisionType::MemorySearch => execute_memory_search(decision, ctx, enhanced).await,
        DecisionType::ContextExpansion => execute_context_expansion(decision, ctx, enhanced),
        DecisionType::CrossSessionLearning => execute_learning(decision, ctx, enhanced),
        DecisionType::ToolRouting => {
            execute_tool_routing(decision, enhanced);
            Ok(())
        },
    }
}

async fn execute_memory_search(
    decision: &Decision,
    ctx: &ExecutionContext<'_>,
    enhanced: &mut EnhancedContext,
) -> Result<()> {
    let trigger = &decision.trigger_context;
    let mut found: Vec<MemoryRecord> = Vec::new();

    for step in &decision.execution_plan {
        match step {
            PlanStep::SearchPersonalMemory { threshold } => {
                let personal = ctx.memory_store.load_personal_memories(&trigger.user_id).await?;
                found.extend(personal.into_iter().filter(|m| m.meets_threshold(*threshold)));
            },
            PlanStep::SearchSystemPatterns => {
                found.extend(
                    ctx.memory_store
                        .search_system_patterns(&trigger.request_text)
                        .await?,
                );
            },
            PlanStep::ExpandConceptually { topics } => {
                found.extend(ctx.memory_store.search_related(topics).await?);
            },
            _ => {},
        }
    }

    tracing::debug!(memories = found.len(), "Memory search complete");
    enhanced.memories.extend(found);
    Ok(())
}

fn execute_context_expansion(
    decision: &Decision,
    ctx: &ExecutionContext<'_>,
    enhanced: &mut EnhancedContext,
) -> Result<()> {
    let mut expanded = Vec::new();

    for step in &decision.execution_plan {
        match step {
            PlanStep::ExpandContext { depth } => {
                expanded.push(("depth".to_string(), json!(depth)));
            },
            PlanStep::ExpandConceptually { topics } => {
                expanded.push(("topics".to_string(), json!(topics)));
            },
            PlanStep::ReusePrediction => {
                let predictions = ctx
                    .predictions
                    .cached(&decision.trigger_context.request_text)
                    .unwrap_or_default();
                expanded.push(("predictions".to_string(), to_value(&predictions)?));
            },
            _ => {},
        }
    }

    if !expanded.is_empty() {
        let conceptual = decision.trigger_context.signals.conceptual;
        expanded.push(("conceptual".to_string(), json!(conceptual)));
    }
    enhanced.expanded_context.extend(expanded);
    Ok(())
}

fn execute_learning(
    decision: &Decision,
    ctx: &ExecutionContext<'_>,
    enhanced: &mut EnhancedContext,
) -> Result<()> {
    let Some(window) = decision.execution_plan.iter().find_map(|step| match step {
        PlanStep::FoldHistory { window } => Some(*window),
        _ => None,
    }) else {
        return Ok(());
    };

    let skip = ctx.history.len().saturating_sub(window);
    let recent = ctx.history.get(skip..).unwrap_or_default().to_vec();
    let folded = recent.len();

    let session = SessionData::new(decision.trigger_context.user_id.clone()).with_decisions(recent);
    let summary = ctx.learner.learn(session);
    if !summary.stored {
        return Err(Error::Unavailable("cross-session pattern store".to_string()));
    }

    let preferences = to_value(&ctx.learner.latest_preferences())?;
    enhanced.learned_patterns.extend([
        ("decisions_folded".to_string(), json!(folded)),
        ("success_patterns".to_string(), json!(summary.success_patterns)),
        ("avoidance_strategies".to_string(), json!(summary.avoidance_strategies)),
        ("stored_patterns".to_string(), json!(summary.total_patterns)),
        ("history_success_rate".to_string(), json!(ctx.history_success_rate)),
        ("adapted_preferences".to_string(), preferences),
    ]);
    Ok(())
}

fn execute_tool_routing(decision: &Decision, enhanced: &mut EnhancedContext) {
    let model = decision
        .selected_models
        .first()
        .map(|m| m.as_str().to_string());

    for step in &decision.execution_plan {
        if let PlanStep::PrepareTool { tool } = step {
            enhanced
                .tool_preparations
                .insert(tool.clone(), json!({ "prepared": true, "model": model }));
        }
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::OperationFailed {
        operation: "serialize_context".to_string(),
        cause: e.to_string(),
    })
}
