//! Decision planning.
//!
//! Planning is a pure function of the request, the intelligence level and a
//! few read-only facts (history success rate, prediction cache hit). Every
//! decision's reasoning names the branch that produced it.

use crate::classifier::{self, RequestSignals};
use crate::models::{Decision, DecisionType, ModelRole, PlanStep, TriggerContext};
use crate::services::{MemorySearchStrategyEngine, ModelRegistry};

/// Read-only inputs shared by every decision maker.
pub(super) struct Planner<'a> {
    pub registry: &'a ModelRegistry,
    pub strategy: &'a MemorySearchStrategyEngine,
    pub learning_window: usize,
}

/// Facts about orchestrator state observed at planning time.
#[derive(Debug, Clone, Copy)]
pub(super) struct PlanningFacts {
    pub history_success_rate: f64,
    pub prediction_hit: bool,
}

impl Planner<'_> {
    /// Produces decisions in execution order.
    pub fn plan(&self, trigger: &TriggerContext, facts: PlanningFacts) -> Vec<Decision> {
        let mut decisions = Vec::with_capacity(4);
        decisions.push(self.memory_search(trigger));
        decisions.push(self.context_expansion(trigger, facts.prediction_hit));
        if trigger.intelligence_level.enables_learning() {
            decisions.push(self.cross_session_learning(trigger, facts.history_success_rate));
        }
        decisions.push(self.tool_routing(trigger));
        decisions
    }

    fn memory_search(&self, trigger: &TriggerContext) -> Decision {
        let strategy = self.strategy.strategy_for_signals(&trigger.signals);

        let mut plan = vec![PlanStep::SearchPersonalMemory {
            threshold: strategy.confidence_threshold,
        }];
        if strategy.system_search {
            plan.push(PlanStep::SearchSystemPatterns);
        }
        if strategy.expanded_search {
            plan.push(PlanStep::ExpandConceptually {
                topics: classifier::extract_topics(&trigger.request_text),
            });
        }

        let confidence = if trigger.signals.high_precision { 0.9 } else { 0.75 };
        Decision::new(
            DecisionType::MemorySearch,
            trigger.clone(),
            MemorySearchStrategyEngine::describe(&strategy),
            confidence,
        )
        .with_plan(plan)
    }

    fn context_expansion(&self, trigger: &TriggerContext, prediction_hit: bool) -> Decision {
        let signals = &trigger.signals;
        let needed = signals.explanation || signals.complex;

        let mut plan = Vec::new();
        let mut models = Vec::new();
        let mut reasoning = if needed {
            let depth: u8 = if signals.complex { 2 } else { 1 };
            let topics = classifier::extract_topics(&trigger.request_text);
            let text = format!(
                "Context expansion needed: {}; expanding {} topic(s) at depth {depth}",
                expansion_reasons(signals).join(", "),
                topics.len()
            );
            plan.push(PlanStep::ExpandContext { depth });
            plan.push(PlanStep::ExpandConceptually { topics });
            if signals.complex {
                models.push(self.registry.id_for(ModelRole::DeepThinker));
            }
            text
        } else {
            "Context expansion not needed: no explanation or complexity signals".to_string()
        };

        if prediction_hit {
            plan.push(PlanStep::ReusePrediction);
            reasoning.push_str("; reusing cached prediction");
        }

        let confidence = if needed {
            0.6 + 0.3 * signals.complexity_score
        } else {
            0.6
        };
        Decision::new(DecisionType::ContextExpansion, trigger.clone(), reasoning, confidence)
            .with_models(models)
            .with_plan(plan)
    }

    fn cross_session_learning(&self, trigger: &TriggerContext, success_rate: f64) -> Decision {
        let reasoning = format!(
            "Cross-session learning enabled at {} level: folding last {} decisions \
             (history success rate {success_rate:.2})",
            trigger.intelligence_level, self.learning_window
        );

        #[allow(clippy::cast_possible_truncation)]
        let confidence = success_rate as f32;
        Decision::new(
            DecisionType::CrossSessionLearning,
            trigger.clone(),
            reasoning,
            confidence,
        )
        .with_plan(vec![PlanStep::FoldHistory {
            window: self.learning_window,
        }])
    }

    fn tool_routing(&self, trigger: &TriggerContext) -> Decision {
        let tools = classifier::detect_tools(&trigger.request_text);
        if tools.is_empty() {
            return Decision::new(
                DecisionType::ToolRouting,
                trigger.clone(),
                "No tools required: no tool keywords detected",
                0.9,
            );
        }

        let names: Vec<&str> = tools.iter().map(|t| t.as_str()).collect();
        let reasoning = format!("Tools required: {}", names.join(", "));
        let plan = names
            .iter()
            .map(|name| PlanStep::PrepareTool {
                tool: (*name).to_string(),
            })
            .collect();

        Decision::new(DecisionType::ToolRouting, trigger.clone(), reasoning, 0.8)
            .with_models(vec![self.registry.id_for(ModelRole::IntegrationSpecialist)])
            .with_plan(plan)
    }
}

fn expansion_reasons(signals: &RequestSignals) -> Vec<String> {
    let mut reasons = Vec::new();
    if signals.explanation {
        reasons.push("explanation requested".to_string());
    }
    if signals.complex {
        reasons.push(format!(
            "complex request (score {:.2})",
            signals.complexity_score
        ));
    }
    reasons
}
