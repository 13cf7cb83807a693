//! Per-frame simulation configuration.
//!
//! The control panel owns a [`SimulationConfig`] and edits it through the
//! validated `set_*` methods; the frame driver passes it by reference into
//! every [`World::step`](crate::world::World::step). Nothing in the core
//! holds on to it between frames.
//!
//! # Builder Pattern
//! ```
//! use particula::config::SimulationConfig;
//! use particula::integrator::SolverMethod;
//! use particula::vec::Vec3;
//!
//! let config: SimulationConfig<Vec3<f32>> = SimulationConfig::new()
//!     .with_solver(SolverMethod::Verlet)
//!     .with_gravity(Vec3::new(0.0, -9.81, 0.0))
//!     .with_bouncing(0.8)
//!     .with_dt(1.0 / 120.0);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::PhysicsError;
use crate::float::Float;
use crate::integrator::{SolverMethod, DEFAULT_VERLET_DAMPING};
use crate::rope::RopeConfig;
use crate::spring::validate_coefficients;
use crate::vec::{Vec, Vec3};
use serde::{Deserialize, Serialize};

pub const MAX_LIFETIME: f32 = 100.0;
pub const DEFAULT_LIFETIME: f32 = 7.0;
pub const DEFAULT_DT: f32 = 0.01;
pub const DEFAULT_ELASTICITY: f32 = 100.0;
pub const DEFAULT_DAMPING: f32 = 0.5;
pub const DEFAULT_ROPE_PARTICLES: usize = 50;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig<V: Vec> {
    pub solver: SolverMethod,
    /// Gravitational acceleration, reapplied to every particle each step.
    pub gravity: V,
    /// Restitution for newly spawned particles, in [0, 1]. Default: 1.
    pub bouncing: V::Scalar,
    /// Initial lifetime in seconds, in [0, 100]. Default: 7.
    pub lifetime: V::Scalar,
    /// Rope spring stiffness.
    pub elasticity: V::Scalar,
    /// Rope spring damping.
    pub damping: V::Scalar,
    /// Segments per rope (a rope holds one more particle than this).
    pub rope_particles: usize,
    /// Step size used by [`World::tick`](crate::world::World::tick). Default: 0.01.
    pub dt: V::Scalar,
    /// Inertial damping of the Verlet rule. Default: 0.99.
    pub verlet_damping: V::Scalar,
}

impl<V: Vec> SimulationConfig<V> {
    pub fn new() -> Self {
        SimulationConfig {
            solver: SolverMethod::default(),
            gravity: V::zero(),
            bouncing: V::Scalar::one(),
            lifetime: V::Scalar::from_f32(DEFAULT_LIFETIME),
            elasticity: V::Scalar::from_f32(DEFAULT_ELASTICITY),
            damping: V::Scalar::from_f32(DEFAULT_DAMPING),
            rope_particles: DEFAULT_ROPE_PARTICLES,
            dt: V::Scalar::from_f32(DEFAULT_DT),
            verlet_damping: V::Scalar::from_f32(DEFAULT_VERLET_DAMPING),
        }
    }

    pub fn with_solver(mut self, solver: SolverMethod) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_gravity(mut self, gravity: V) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_bouncing(mut self, bouncing: V::Scalar) -> Self {
        self.bouncing = bouncing;
        self
    }

    pub fn with_lifetime(mut self, lifetime: V::Scalar) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn with_springs(mut self, elasticity: V::Scalar, damping: V::Scalar) -> Self {
        self.elasticity = elasticity;
        self.damping = damping;
        self
    }

    pub fn with_rope_particles(mut self, rope_particles: usize) -> Self {
        self.rope_particles = rope_particles;
        self
    }

    pub fn with_dt(mut self, dt: V::Scalar) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_verlet_damping(mut self, verlet_damping: V::Scalar) -> Self {
        self.verlet_damping = verlet_damping;
        self
    }

    /// Check every field against its domain.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        check_bouncing(self.bouncing)?;
        check_lifetime(self.lifetime)?;
        check_dt(self.dt)?;
        validate_coefficients(self.elasticity, self.damping)?;
        if self.rope_particles == 0 {
            return Err(PhysicsError::InvalidParticleCount);
        }
        if !self.verlet_damping.within(V::Scalar::zero(), V::Scalar::one()) {
            return Err(PhysicsError::InvalidVerletDamping);
        }
        Ok(())
    }

    pub fn set_solver(&mut self, solver: SolverMethod) {
        self.solver = solver;
    }

    /// Select the solver by its control-panel name.
    pub fn set_solver_name(&mut self, name: &str) -> Result<(), PhysicsError> {
        self.solver = name.parse()?;
        Ok(())
    }

    pub fn set_gravity(&mut self, gravity: V) {
        self.gravity = gravity;
    }

    pub fn set_bouncing(&mut self, bouncing: V::Scalar) -> Result<(), PhysicsError> {
        check_bouncing(bouncing)?;
        self.bouncing = bouncing;
        Ok(())
    }

    pub fn set_lifetime(&mut self, lifetime: V::Scalar) -> Result<(), PhysicsError> {
        check_lifetime(lifetime)?;
        self.lifetime = lifetime;
        Ok(())
    }

    pub fn set_elasticity(&mut self, elasticity: V::Scalar) -> Result<(), PhysicsError> {
        validate_coefficients(elasticity, self.damping)?;
        self.elasticity = elasticity;
        Ok(())
    }

    pub fn set_damping(&mut self, damping: V::Scalar) -> Result<(), PhysicsError> {
        validate_coefficients(self.elasticity, damping)?;
        self.damping = damping;
        Ok(())
    }

    pub fn set_dt(&mut self, dt: V::Scalar) -> Result<(), PhysicsError> {
        check_dt(dt)?;
        self.dt = dt;
        Ok(())
    }

    /// Rope parameters derived from this configuration.
    pub fn rope_config(&self, pinned: bool) -> RopeConfig<V::Scalar> {
        RopeConfig {
            elasticity: self.elasticity,
            damping: self.damping,
            bouncing: self.bouncing,
            lifetime: self.lifetime,
            total_mass: V::Scalar::one(),
            pinned,
        }
    }
}

impl<F: Float> SimulationConfig<Vec3<F>> {
    /// Defaults with gravity of 9.81 pointing down the y axis.
    pub fn earth() -> Self {
        Self::new().with_gravity(Vec3::new(F::zero(), F::from_f32(-9.81), F::zero()))
    }
}

#[cfg(feature = "std")]
impl<V: Vec + serde::de::DeserializeOwned> SimulationConfig<V> {
    /// Parse a TOML document. Missing keys keep their defaults; the result
    /// is validated before it is returned.
    pub fn from_toml_str(text: &str) -> Result<Self, PhysicsError> {
        let config: Self = toml::from_str(text).map_err(|e| PhysicsError::Config(e.to_string()))?;
        config.validate()?;
        log::debug!("loaded simulation config: solver={} dt={}", config.solver, config.dt);
        Ok(config)
    }
}

impl<V: Vec> Default for SimulationConfig<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_bouncing<F: Float>(bouncing: F) -> Result<(), PhysicsError> {
    if bouncing.within(F::zero(), F::one()) {
        Ok(())
    } else {
        Err(PhysicsError::InvalidBouncing)
    }
}

fn check_lifetime<F: Float>(lifetime: F) -> Result<(), PhysicsError> {
    if lifetime.within(F::zero(), F::from_f32(MAX_LIFETIME)) {
        Ok(())
    } else {
        Err(PhysicsError::InvalidLifetime)
    }
}

fn check_dt<F: Float>(dt: F) -> Result<(), PhysicsError> {
    if dt > F::zero() && dt.is_finite() {
        Ok(())
    } else {
        Err(PhysicsError::InvalidTimeStep)
    }
}
