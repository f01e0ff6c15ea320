//! Phase lifecycle for film projects
//!
//! A project moves through eight fixed phases, from script selection to
//! post-release. Phases only move forward; any forward jump is allowed and
//! staying on the current phase is a no-op transition.

use serde::{Deserialize, Serialize};

pub use filmtrack_common::StateError;

/// The eight production phases, numbered 1 through 8
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(try_from = "i64", into = "i64")]
#[repr(i16)]
pub enum ProjectPhase {
    ScriptSelection = 1,
    Packaging = 2,
    Production = 3,
    PostProduction = 4,
    MarketingStrategy = 5,
    Distribution = 6,
    Release = 7,
    PostRelease = 8,
}

impl ProjectPhase {
    /// Every phase in lifecycle order
    pub const ALL: [ProjectPhase; 8] = [
        Self::ScriptSelection,
        Self::Packaging,
        Self::Production,
        Self::PostProduction,
        Self::MarketingStrategy,
        Self::Distribution,
        Self::Release,
        Self::PostRelease,
    ];

    /// Phase a newly created project starts in
    pub const INITIAL: ProjectPhase = Self::ScriptSelection;

    /// Phase number in 1..=8
    pub fn number(&self) -> i16 {
        *self as i16
    }

    /// Look up a phase by its number
    pub fn from_number(number: i64) -> Result<Self, StateError> {
        match number {
            1..=8 => Ok(Self::ALL[(number - 1) as usize]),
            _ => Err(StateError::OutOfRange(format!(
                "phase must be between 1 and 8, got {}",
                number
            ))),
        }
    }

    /// Display name of the phase
    pub fn name(&self) -> &'static str {
        match self {
            Self::ScriptSelection => "Script Selection & Concept Evaluation",
            Self::Packaging => "Packaging & Pre-Production Strategy",
            Self::Production => "Production Phase",
            Self::PostProduction => "Post-Production & Market Testing",
            Self::MarketingStrategy => "Marketing Strategy Planning",
            Self::Distribution => "Distribution Strategy & Negotiation",
            Self::Release => "Release & Discoverability",
            Self::PostRelease => "Post-Release Optimization & Monetization",
        }
    }

    /// The last phase has nowhere further to go
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::PostRelease)
    }

    /// The phase directly after this one
    pub fn next(&self) -> Option<ProjectPhase> {
        Self::ALL.get(self.number() as usize).copied()
    }

    /// Phases reachable from this one (itself included)
    pub fn valid_transitions(&self) -> &'static [ProjectPhase] {
        &Self::ALL[(self.number() - 1) as usize..]
    }

    /// Actual shoot days are only reported from production onwards
    pub fn reports_actual_shoot_days(&self) -> bool {
        *self >= Self::Production
    }
}

impl std::fmt::Display for ProjectPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "phase {}", self.number())
    }
}

impl TryFrom<i64> for ProjectPhase {
    type Error = StateError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_number(value)
    }
}

impl From<ProjectPhase> for i64 {
    fn from(phase: ProjectPhase) -> Self {
        phase.number() as i64
    }
}

/// Phase lifecycle state machine
pub struct PhaseLifecycle;

impl PhaseLifecycle {
    /// Move from `current` to `target`, rejecting backward moves
    pub fn transition(
        current: ProjectPhase,
        target: ProjectPhase,
    ) -> Result<ProjectPhase, StateError> {
        if target < current {
            return Err(StateError::InvalidTransition {
                from: current.to_string(),
                to: target.to_string(),
            });
        }
        Ok(target)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(current: ProjectPhase, target: ProjectPhase) -> bool {
        Self::transition(current, target).is_ok()
    }
}
