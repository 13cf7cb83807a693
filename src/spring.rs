//! Damped linear springs between two particles.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec;

/// Something that pushes on particles as a function of their current state.
///
/// Contributors are evaluated for every particle of a structure before any
/// of them integrates, so all forces see the same time slice.
pub trait ForceSource<V: Vec> {
    /// Force exerted on `particles[index]`. Zero when `index` is unaffected.
    fn force_on(&self, index: usize, particles: &[Particle<V>]) -> V;
}

/// Hookean spring with a viscous term along its axis.
///
/// The endpoints are indices into a particle slice owned elsewhere. The
/// rest length is captured at construction and never changes; the spring
/// only pulls toward it, it does not enforce it.
#[derive(Clone, Debug)]
pub struct Spring<V: Vec> {
    a: usize,
    b: usize,
    pub elasticity: V::Scalar,
    pub damping: V::Scalar,
    rest_length: V::Scalar,
}

impl<V: Vec> Spring<V> {
    /// Connect `particles[a]` and `particles[b]`, resting at their current distance.
    pub fn new(
        a: usize,
        b: usize,
        particles: &[Particle<V>],
        elasticity: V::Scalar,
        damping: V::Scalar,
    ) -> Result<Self, PhysicsError> {
        let count = particles.len();
        for index in [a, b] {
            if index >= count {
                return Err(PhysicsError::ParticleOutOfBounds { index, count });
            }
        }
        let rest_length = particles[a].pos.distance(particles[b].pos);
        Self::with_rest_length(a, b, rest_length, elasticity, damping)
    }

    pub fn with_rest_length(
        a: usize,
        b: usize,
        rest_length: V::Scalar,
        elasticity: V::Scalar,
        damping: V::Scalar,
    ) -> Result<Self, PhysicsError> {
        if a == b {
            return Err(PhysicsError::SelfSpring { index: a });
        }
        validate_coefficients(elasticity, damping)?;
        Ok(Spring { a, b, elasticity, damping, rest_length })
    }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    pub fn rest_length(&self) -> V::Scalar {
        self.rest_length
    }

    pub fn connects(&self, index: usize) -> bool {
        self.a == index || self.b == index
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

    /// Current length of the spring.
    pub fn length(&self, particles: &[Particle<V>]) -> V::Scalar {
        particles[self.a].pos.distance(particles[self.b].pos)
    }

    /// Force on endpoint `a`; endpoint `b` receives the negation.
    ///
    /// Positive magnitude (stretched, or separating) pulls `a` toward `b`.
    pub fn force_on_a(&self, particles: &[Particle<V>]) -> V {
        let pa = &particles[self.a];
        let pb = &particles[self.b];
        let delta = pb.pos - pa.pos;
        let dist = delta.length();
        let Some(dir) = delta.try_normalize() else {
            log::warn!("spring endpoints {} and {} coincide, no force applied", self.a, self.b);
            return V::zero();
        };
        let rel_vel = (pb.velocity - pa.velocity).dot(dir);
        let magnitude = self.elasticity * (dist - self.rest_length) + self.damping * rel_vel;
        dir.scale(magnitude)
    }
}

impl<V: Vec> ForceSource<V> for Spring<V> {
    fn force_on(&self, index: usize, particles: &[Particle<V>]) -> V {
        if index == self.a {
            self.force_on_a(particles)
        } else if index == self.b {
            -self.force_on_a(particles)
        } else {
            V::zero()
        }
    }
}

pub(crate) fn validate_coefficients<F: Float>(elasticity: F, damping: F) -> Result<(), PhysicsError> {
    let valid = |c: F| c >= F::zero() && c.is_finite();
    if valid(elasticity) && valid(damping) {
        Ok(())
    } else {
        Err(PhysicsError::InvalidSpringCoefficient)
    }
}
