//! Intelligence level gate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered gate controlling which decision types fire.
///
/// | Level | Value | Enables |
/// |-------|-------|---------|
/// | `Reactive` | 1 | Memory search, context expansion, tool routing |
/// | `Proactive` | 2 | Same as reactive |
/// | `Predictive` | 3 | + fire-and-forget context prediction |
/// | `Autonomous` | 4 | + cross-session learning decision |
/// | `Orchestrative` | 5 | Everything |
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IntelligenceLevel {
    /// Answers what is asked.
    Reactive = 1,
    /// Anticipates obvious needs.
    Proactive = 2,
    /// Prepares likely follow-up context.
    Predictive = 3,
    /// Learns across sessions.
    #[default]
    Autonomous = 4,
    /// Full orchestration.
    Orchestrative = 5,
}

impl IntelligenceLevel {
    /// Returns all levels in ascending order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Reactive,
            Self::Proactive,
            Self::Predictive,
            Self::Autonomous,
            Self::Orchestrative,
        ]
    }

    /// Returns the numeric value (1..=5).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Builds a level from its numeric value.
    #[must_use]
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Reactive),
            2 => Some(Self::Proactive),
            3 => Some(Self::Predictive),
            4 => Some(Self::Autonomous),
            5 => Some(Self::Orchestrative),
            _ => None,
        }
    }

    /// Parses a level from its name or numeric value. Case-insensitive.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u8>() {
            return Self::from_value(value);
        }
        match trimmed.to_lowercase().as_str() {
            "reactive" => Some(Self::Reactive),
            "proactive" => Some(Self::Proactive),
            "predictive" => Some(Self::Predictive),
            "autonomous" => Some(Self::Autonomous),
            "orchestrative" => Some(Self::Orchestrative),
            _ => None,
        }
    }

    /// Returns the level name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reactive => "reactive",
            Self::Proactive => "proactive",
            Self::Predictive => "predictive",
            Self::Autonomous => "autonomous",
            Self::Orchestrative => "orchestrative",
        }
    }

    /// Whether the cross-session learning decision fires at this level.
    #[must_use]
    pub fn enables_learning(self) -> bool {
        self >= Self::Autonomous
    }

    /// Whether the predictive step runs at this level.
    #[must_use]
    pub fn enables_prediction(self) -> bool {
        self >= Self::Predictive
    }
}

impl fmt::Display for IntelligenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
