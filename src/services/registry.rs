//! Static model registry.

use crate::models::{Capability, CostTier, LatencyTier, ModelId, ModelProfile, ModelRole};
use crate::{Error, Result};
use std::collections::HashMap;

/// Read-only catalog of model profiles.
///
/// Ids are unique and every profile is reachable by id and by role.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    profiles: Vec<ModelProfile>,
    by_id: HashMap<ModelId, usize>,
}

impl ModelRegistry {
    /// Builds a registry from profiles.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if two profiles share an id, the list is
    /// empty, or no profile has the orchestrator or context master role.
    pub fn from_profiles(profiles: Vec<ModelProfile>) -> Result<Self> {
        if profiles.is_empty() {
            return Err(Error::InvalidInput("model registry is empty".to_string()));
        }

        let mut by_id = HashMap::with_capacity(profiles.len());
        for (index, profile) in profiles.iter().enumerate() {
            if by_id.insert(profile.id.clone(), index).is_some() {
                return Err(Error::InvalidInput(format!(
                    "duplicate model id: {}",
                    profile.id
                )));
            }
        }

        for required in [ModelRole::Orchestrator, ModelRole::ContextMaster] {
            if !profiles.iter().any(|p| p.role == required) {
                return Err(Error::InvalidInput(format!(
                    "model registry has no {required} profile"
                )));
            }
        }

        Ok(Self { profiles, by_id })
    }

    /// Returns the built-in registry with one profile per role.
    #[must_use]
    pub fn builtin() -> Self {
        let profiles = builtin_profiles();
        let by_id = profiles
            .iter()
            .enumerate()
            .map(|(index, p)| (p.id.clone(), index))
            .collect();
        Self { profiles, by_id }
    }

    /// Looks up a profile by id.
    #[must_use]
    pub fn get(&self, id: &ModelId) -> Option<&ModelProfile> {
        self.by_id.get(id).and_then(|&i| self.profiles.get(i))
    }

    /// Returns the first profile with the given role.
    #[must_use]
    pub fn by_role(&self, role: ModelRole) -> Option<&ModelProfile> {
        self.profiles.iter().find(|p| p.role == role)
    }

    /// Returns the id for a role.
    ///
    /// Roles missing from a custom registry fall back to the orchestrator id.
    #[must_use]
    pub fn id_for(&self, role: ModelRole) -> ModelId {
        self.by_role(role)
            .or_else(|| self.by_role(ModelRole::Orchestrator))
            .map_or_else(|| ModelId::new(role.as_str()), |p| p.id.clone())
    }

    /// Returns the orchestrator id.
    #[must_use]
    pub fn orchestrator(&self) -> ModelId {
        self.id_for(ModelRole::Orchestrator)
    }

    /// Returns the profile with the lowest latency tier.
    #[must_use]
    pub fn fastest(&self) -> Option<&ModelProfile> {
        self.profiles.iter().min_by_key(|p| p.latency_tier)
    }

    /// Returns all profiles in registry order.
    #[must_use]
    pub fn profiles(&self) -> &[ModelProfile] {
        &self.profiles
    }

    /// Number of profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[allow(clippy::too_many_arguments)]
fn profile(
    id: &str,
    name: &str,
    role: ModelRole,
    context_window: u32,
    output_limit: u32,
    capabilities: &[Capability],
    latency_tier: LatencyTier,
    cost_tier: CostTier,
    specialty: &str,
) -> ModelProfile {
    ModelProfile {
        id: ModelId::new(id),
        name: name.to_string(),
        role,
        context_window,
        output_limit,
        capabilities: capabilities.to_vec(),
        latency_tier,
        cost_tier,
        specialty: specialty.to_string(),
    }
}

fn builtin_profiles() -> Vec<ModelProfile> {
    vec![
        profile(
            "conductor",
            "Conductor",
            ModelRole::Orchestrator,
            1_048_576,
            8_192,
            &[Capability::Orchestration, Capability::Reasoning],
            LatencyTier::Fast,
            CostTier::Medium,
            "orchestration",
        ),
        profile(
            "deep-thinker",
            "Deep Thinker",
            ModelRole::DeepThinker,
            1_048_576,
            65_536,
            &[Capability::Reasoning, Capability::Code],
            LatencyTier::Slow,
            CostTier::High,
            "complex reasoning",
        ),
        profile(
            "speed-demon",
            "Speed Demon",
            ModelRole::SpeedDemon,
            1_048_576,
            8_192,
            &[Capability::Speed],
            LatencyTier::UltraFast,
            CostTier::Low,
            "rapid responses",
        ),
        profile(
            "creative-writer",
            "Creative Writer",
            ModelRole::CreativeWriter,
            1_048_576,
            8_192,
            &[Capability::Creativity],
            LatencyTier::Medium,
            CostTier::Medium,
            "creative writing",
        ),
        profile(
            "context-master",
            "Context Master",
            ModelRole::ContextMaster,
            2_097_152,
            8_192,
            &[Capability::LargeContext, Capability::Reasoning],
            LatencyTier::Medium,
            CostTier::Medium,
            "long context",
        ),
        profile(
            "code-specialist",
            "Code Specialist",
            ModelRole::CodeSpecialist,
            1_048_576,
            65_536,
            &[Capability::Code, Capability::Reasoning],
            LatencyTier::Medium,
            CostTier::Medium,
            "code generation",
        ),
        profile(
            "integration-specialist",
            "Integration Specialist",
            ModelRole::IntegrationSpecialist,
            1_048_576,
            8_192,
            &[Capability::Integration, Capability::Speed],
            LatencyTier::Fast,
            CostTier::Low,
            "tool integration",
        ),
    ]
}
