//! Selectable integration rules.

use crate::error::PhysicsError;
use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Numeric damping applied to the inertial term of the Verlet rule.
pub const DEFAULT_VERLET_DAMPING: f32 = 0.99;

/// Integration rule used to advance a particle by one step.
///
/// Serialized and parsed with the control-panel names
/// `euler-semi`, `euler-orig` and `verlet`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverMethod {
    /// Velocity first, then position. Stable for stiff springs.
    #[default]
    #[serde(rename = "euler-semi")]
    SemiImplicitEuler,
    /// Position from the old velocity, then velocity.
    #[serde(rename = "euler-orig")]
    ExplicitEuler,
    /// Position Verlet; velocity is derived from consecutive positions.
    #[serde(rename = "verlet")]
    Verlet,
}

impl SolverMethod {
    pub const ALL: [SolverMethod; 3] = [
        SolverMethod::SemiImplicitEuler,
        SolverMethod::ExplicitEuler,
        SolverMethod::Verlet,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SolverMethod::SemiImplicitEuler => "euler-semi",
            SolverMethod::ExplicitEuler => "euler-orig",
            SolverMethod::Verlet => "verlet",
        }
    }
}

impl fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverMethod {
    type Err = PhysicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SolverMethod::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| PhysicsError::UnknownSolver(s.to_string()))
    }
}
