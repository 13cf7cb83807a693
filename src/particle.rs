//! Point masses with force accumulation and selectable integration.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::integrator::{SolverMethod, DEFAULT_VERLET_DAMPING};
use crate::vec::Vec;

/// Physical radius used by the triangle proximity test.
pub const DEFAULT_PARTICLE_RADIUS: f32 = 0.3;

/// A point mass.
///
/// `force` is an accumulator: whoever drives the simulation must overwrite
/// or clear it once per step before new forces are added, otherwise forces
/// leak from one step into the next.
#[derive(Clone, Debug)]
pub struct Particle<V: Vec> {
    pub pos: V,
    pub prev_pos: V,
    pub velocity: V,
    pub force: V,
    /// Restitution in [0, 1] used by collision response.
    pub bouncing: V::Scalar,
    /// Remaining seconds. Alive while non-negative.
    pub lifetime: V::Scalar,
    pub radius: V::Scalar,
    /// Externally driven: no integration, no collision response.
    pub fixed: bool,
    mass: V::Scalar,
    inv_mass: V::Scalar,
    first_step: bool,
}

impl<V: Vec> Particle<V> {
    /// A unit-mass particle at rest.
    pub fn new(pos: V, bouncing: V::Scalar, lifetime: V::Scalar) -> Self {
        Particle {
            pos,
            prev_pos: pos,
            velocity: V::zero(),
            force: V::zero(),
            bouncing,
            lifetime,
            radius: V::Scalar::from_f32(DEFAULT_PARTICLE_RADIUS),
            fixed: false,
            mass: V::Scalar::one(),
            inv_mass: V::Scalar::one(),
            first_step: true,
        }
    }

    pub fn with_velocity(mut self, velocity: V) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_radius(mut self, radius: V::Scalar) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn with_mass(mut self, mass: V::Scalar) -> Result<Self, PhysicsError> {
        self.set_mass(mass)?;
        Ok(self)
    }

    pub fn mass(&self) -> V::Scalar {
        self.mass
    }

    pub fn inv_mass(&self) -> V::Scalar {
        self.inv_mass
    }

    pub fn set_mass(&mut self, mass: V::Scalar) -> Result<(), PhysicsError> {
        if !(mass > V::Scalar::zero()) || !mass.is_finite() {
            return Err(PhysicsError::InvalidMass);
        }
        self.mass = mass;
        self.inv_mass = mass.recip();
        Ok(())
    }

    pub fn set_bouncing(&mut self, bouncing: V::Scalar) -> Result<(), PhysicsError> {
        if !bouncing.within(V::Scalar::zero(), V::Scalar::one()) {
            return Err(PhysicsError::InvalidBouncing);
        }
        self.bouncing = bouncing;
        Ok(())
    }

    pub fn is_alive(&self) -> bool {
        self.lifetime >= V::Scalar::zero()
    }

    /// True until the first call to [`Particle::integrate`].
    pub fn is_first_step(&self) -> bool {
        self.first_step
    }

    pub fn add_force(&mut self, force: V) {
        self.force = self.force + force;
    }

    pub fn set_force(&mut self, force: V) {
        self.force = force;
    }

    pub fn clear_force(&mut self) {
        self.force = V::zero();
    }

    /// Overwrite the accumulator with the weight of this particle under
    /// the gravitational acceleration `gravity`.
    pub fn apply_gravity(&mut self, gravity: V) {
        self.force = gravity.scale(self.mass);
    }

    /// Place a driven particle at `pos`, keeping the old position as history.
    pub fn move_to(&mut self, pos: V) {
        self.prev_pos = self.pos;
        self.pos = pos;
    }

    /// Advance by `dt` with the default Verlet damping.
    pub fn integrate(&mut self, dt: V::Scalar, method: SolverMethod) {
        self.integrate_damped(dt, method, V::Scalar::from_f32(DEFAULT_VERLET_DAMPING));
    }

    /// Advance by `dt`.
    ///
    /// The lifetime always counts down, fixed or not. `dt` must be positive:
    /// the Verlet rule divides by it.
    pub fn integrate_damped(&mut self, dt: V::Scalar, method: SolverMethod, verlet_damping: V::Scalar) {
        self.lifetime = self.lifetime - dt;

        if !self.fixed {
            let accel = self.force.scale(self.inv_mass);
            match method {
                SolverMethod::SemiImplicitEuler => {
                    self.prev_pos = self.pos;
                    self.velocity = self.velocity.add_scaled(accel, dt);
                    self.pos = self.pos.add_scaled(self.velocity, dt);
                }
                SolverMethod::ExplicitEuler => {
                    self.prev_pos = self.pos;
                    self.pos = self.pos.add_scaled(self.velocity, dt);
                    self.velocity = self.velocity.add_scaled(accel, dt);
                }
                SolverMethod::Verlet if self.first_step => {
                    // Seed the history from the initial velocity.
                    self.prev_pos = self.pos - self.velocity.scale(dt);
                }
                SolverMethod::Verlet => {
                    let inertia = self.pos - self.prev_pos;
                    self.prev_pos = self.pos;
                    self.pos = self.pos + inertia.scale(verlet_damping) + accel.scale(dt * dt);
                    self.velocity = (self.pos - self.prev_pos).scale(dt.recip());
                }
            }
        }

        self.first_step = false;
    }
}
