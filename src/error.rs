//! Error types for construction and configuration.
//!
//! The per-frame step never returns errors: numeric degeneracies there
//! surface as skipped corrections or non-finite state. Errors are reserved
//! for the control surface, where bad input can be rejected up front.

use alloc::string::String;
use core::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Mass must be positive and finite.
    InvalidMass,
    /// Bouncing (restitution) must be in [0, 1].
    InvalidBouncing,
    /// Lifetime must be in [0, 100] seconds.
    InvalidLifetime,
    /// Time step must be positive and finite.
    InvalidTimeStep,
    /// Spring elasticity and damping must be non-negative.
    InvalidSpringCoefficient,
    /// Verlet damping must be in [0, 1].
    InvalidVerletDamping,
    /// Ropes need at least one segment.
    InvalidParticleCount,
    /// A spring was asked to connect a particle to itself.
    SelfSpring { index: usize },
    /// Particle index is out of bounds.
    ParticleOutOfBounds { index: usize, count: usize },
    /// Solver name not recognised.
    UnknownSolver(String),
    /// Configuration text could not be parsed.
    Config(String),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass => write!(f, "mass must be positive and finite"),
            PhysicsError::InvalidBouncing => write!(f, "bouncing must be in [0, 1]"),
            PhysicsError::InvalidLifetime => write!(f, "lifetime must be in [0, 100] seconds"),
            PhysicsError::InvalidTimeStep => write!(f, "time step must be positive and finite"),
            PhysicsError::InvalidSpringCoefficient => {
                write!(f, "spring elasticity and damping must be non-negative")
            }
            PhysicsError::InvalidVerletDamping => write!(f, "verlet damping must be in [0, 1]"),
            PhysicsError::InvalidParticleCount => write!(f, "rope needs at least one segment"),
            PhysicsError::SelfSpring { index } => {
                write!(f, "spring endpoints must differ (both are particle {})", index)
            }
            PhysicsError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
            PhysicsError::UnknownSolver(name) => {
                write!(f, "unknown solver `{}` (expected euler-semi, euler-orig or verlet)", name)
            }
            PhysicsError::Config(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PhysicsError {}
