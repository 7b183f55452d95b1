//! Model profile types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a model profile in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Creates a new model ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ModelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Capability tags attached to a model profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Coordinates other models.
    Orchestration,
    /// Multi-step reasoning and analysis.
    Reasoning,
    /// Low-latency answers.
    Speed,
    /// Open-ended and creative generation.
    Creativity,
    /// Very large context windows.
    LargeContext,
    /// Code generation and review.
    Code,
    /// Tool use and external integrations.
    Integration,
}

impl Capability {
    /// Returns the string representation used in serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Orchestration => "orchestration",
            Self::Reasoning => "reasoning",
            Self::Speed => "speed",
            Self::Creativity => "creativity",
            Self::LargeContext => "large_context",
            Self::Code => "code",
            Self::Integration => "integration",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Response latency tier, ordered from fastest to slowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatencyTier {
    /// Sub-second responses.
    UltraFast,
    /// Fast responses.
    Fast,
    /// Medium latency.
    Medium,
    /// Slow, deliberate responses.
    Slow,
}

impl LatencyTier {
    /// Returns the string representation used in serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UltraFast => "ultra_fast",
            Self::Fast => "fast",
            Self::Medium => "medium",
            Self::Slow => "slow",
        }
    }
}

/// Relative cost tier, ordered from cheapest to most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostTier {
    /// No cost.
    Free,
    /// Low cost.
    Low,
    /// Medium cost.
    Medium,
    /// High cost.
    High,
}

impl CostTier {
    /// Returns the string representation used in serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Role a model plays in the orchestra.
///
/// Every role maps to exactly one built-in profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelRole {
    /// Always-first coordinating model.
    Orchestrator,
    /// Deep reasoning specialist.
    DeepThinker,
    /// Fastest-tier responder.
    SpeedDemon,
    /// Creative writing specialist.
    CreativeWriter,
    /// Large-context specialist.
    ContextMaster,
    /// Code specialist.
    CodeSpecialist,
    /// Tool and integration specialist.
    IntegrationSpecialist,
}

impl ModelRole {
    /// Returns all roles in registry order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Orchestrator,
            Self::DeepThinker,
            Self::SpeedDemon,
            Self::CreativeWriter,
            Self::ContextMaster,
            Self::CodeSpecialist,
            Self::IntegrationSpecialist,
        ]
    }

    /// Returns the string representation used in serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Orchestrator => "orchestrator",
            Self::DeepThinker => "deep_thinker",
            Self::SpeedDemon => "speed_demon",
            Self::CreativeWriter => "creative_writer",
            Self::ContextMaster => "context_master",
            Self::CodeSpecialist => "code_specialist",
            Self::IntegrationSpecialist => "integration_specialist",
        }
    }

    /// Parses a role name. Case-insensitive, accepts `-` or `_` separators.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "orchestrator" | "conductor" => Some(Self::Orchestrator),
            "deep_thinker" | "reasoning" => Some(Self::DeepThinker),
            "speed_demon" | "speed" => Some(Self::SpeedDemon),
            "creative_writer" | "creative" => Some(Self::CreativeWriter),
            "context_master" | "context" => Some(Self::ContextMaster),
            "code_specialist" | "code" => Some(Self::CodeSpecialist),
            "integration_specialist" | "integration" => Some(Self::IntegrationSpecialist),
            _ => None,
        }
    }
}

impl fmt::Display for ModelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static description of a model available for routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelProfile {
    /// Unique identifier.
    pub id: ModelId,
    /// Display name.
    pub name: String,
    /// Role in the orchestra.
    pub role: ModelRole,
    /// Context window in tokens.
    pub context_window: u32,
    /// Maximum output tokens.
    pub output_limit: u32,
    /// Capability tags.
    pub capabilities: Vec<Capability>,
    /// Latency tier.
    pub latency_tier: LatencyTier,
    /// Cost tier.
    pub cost_tier: CostTier,
    /// Free-text specialty tag.
    pub specialty: String,
}

impl ModelProfile {
    /// Returns true if the profile carries the given capability.
    #[must_use]
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_tier_ordering() {
        assert!(LatencyTier::UltraFast < LatencyTier::Fast);
        assert!(LatencyTier::Fast < LatencyTier::Medium);
        assert!(LatencyTier::Medium < LatencyTier::Slow);
    }

    #[test]
    fn test_cost_tier_ordering() {
        assert!(CostTier::Free < CostTier::Low);
        assert!(CostTier::Medium < CostTier::High);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(ModelRole::parse("deep-thinker"), Some(ModelRole::DeepThinker));
        assert_eq!(ModelRole::parse("CONTEXT"), Some(ModelRole::ContextMaster));
        assert_eq!(ModelRole::parse("conductor"), Some(ModelRole::Orchestrator));
        assert_eq!(ModelRole::parse("unknown"), None);
    }

    #[test]
    fn test_role_as_str_roundtrips() {
        for role in ModelRole::all() {
            assert_eq!(ModelRole::parse(role.as_str()), Some(*role));
        }
    }

    #[test]
    fn test_model_id_serializes_transparently() {
        let id = ModelId::new("deep-thinker");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"deep-thinker\"");
    }
}
