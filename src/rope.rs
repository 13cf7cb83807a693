//! Ropes: chains of particles linked by damped springs.

use crate::collision::Obstacles;
use crate::config::SimulationConfig;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::spring::{validate_coefficients, ForceSource, Spring};
use crate::vec::{Cross, Vec, Vec3};
use alloc::vec;
use alloc::vec::Vec as AllocVec;
use rand::Rng;

/// Physical parameters shared by every particle and spring of a rope.
#[derive(Clone, Debug, PartialEq)]
pub struct RopeConfig<F: Float> {
    pub elasticity: F,
    pub damping: F,
    pub bouncing: F,
    pub lifetime: F,
    /// Divided by the segment count to get the per-particle mass.
    pub total_mass: F,
    /// Pin particle 0 to the anchor.
    pub pinned: bool,
}

impl<F: Float> Default for RopeConfig<F> {
    fn default() -> Self {
        RopeConfig {
            elasticity: F::from_f32(crate::config::DEFAULT_ELASTICITY),
            damping: F::from_f32(crate::config::DEFAULT_DAMPING),
            bouncing: F::one(),
            lifetime: F::from_f32(crate::config::DEFAULT_LIFETIME),
            total_mass: F::one(),
            pinned: false,
        }
    }
}

/// A rope of `segments + 1` particles and `segments` springs.
///
/// Spring `i` joins particles `i` and `i + 1`. Each particle keeps the list
/// of springs attached to it; their forces are summed for the whole chain
/// before any particle moves.
pub struct Rope<V: Vec> {
    particles: AllocVec<Particle<V>>,
    springs: AllocVec<Spring<V>>,
    attached: AllocVec<AllocVec<usize>>,
    pinned: bool,
    anchor: V,
}

impl<V: Vec> Rope<V> {
    /// Lay the particles out at `start + direction * i`.
    pub fn new(
        start: V,
        direction: V,
        segments: usize,
        config: &RopeConfig<V::Scalar>,
    ) -> Result<Self, PhysicsError> {
        if segments == 0 {
            return Err(PhysicsError::InvalidParticleCount);
        }
        validate_coefficients(config.elasticity, config.damping)?;
        let mass = config.total_mass / V::Scalar::from_usize(segments);

        let mut particles = AllocVec::with_capacity(segments + 1);
        for i in 0..=segments {
            let pos = start.add_scaled(direction, V::Scalar::from_usize(i));
            let mut particle = Particle::new(pos, config.bouncing, config.lifetime).with_mass(mass)?;
            particle.set_bouncing(config.bouncing)?;
            particles.push(particle);
        }
        particles[0].fixed = config.pinned;

        let mut springs = AllocVec::with_capacity(segments);
        let mut attached = vec![AllocVec::new(); segments + 1];
        for i in 0..segments {
            springs.push(Spring::new(i, i + 1, &particles, config.elasticity, config.damping)?);
            attached[i].push(i);
            attached[i + 1].push(i);
        }

        log::debug!(
            "built rope: {} particles, {} springs, pinned={}",
            particles.len(),
            springs.len(),
            config.pinned
        );

        Ok(Rope { particles, springs, attached, pinned: config.pinned, anchor: start })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.springs.len()
    }

    pub fn particles(&self) -> &[Particle<V>] {
        &self.particles
    }

    pub fn particle(&self, index: usize) -> &Particle<V> {
        &self.particles[index]
    }

    pub fn particle_mut(&mut self, index: usize) -> &mut Particle<V> {
        &mut self.particles[index]
    }

    pub fn springs(&self) -> &[Spring<V>] {
        &self.springs
    }

    /// Indices of the springs attached to particle `index`.
    pub fn attached_springs(&self, index: usize) -> &[usize] {
        &self.attached[index]
    }

    pub fn positions(&self) -> AllocVec<V> {
        self.particles.iter().map(|p| p.pos).collect()
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn anchor(&self) -> V {
        self.anchor
    }

    /// Where particle 0 goes on the next anchor update.
    pub fn set_anchor(&mut self, anchor: V) {
        self.anchor = anchor;
    }

    /// Pin or release particle 0. Pinning starts from where it is now.
    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
        self.particles[0].fixed = pinned;
        if pinned {
            self.anchor = self.particles[0].pos;
        }
    }

    pub fn set_elasticity(&mut self, elasticity: V::Scalar) -> Result<(), PhysicsError> {
        self.springs.iter_mut().try_for_each(|s| s.set_elasticity(elasticity))
    }

    pub fn set_damping(&mut self, damping: V::Scalar) -> Result<(), PhysicsError> {
        self.springs.iter_mut().try_for_each(|s| s.set_damping(damping))
    }

    pub fn set_bouncing(&mut self, bouncing: V::Scalar) -> Result<(), PhysicsError> {
        self.particles.iter_mut().try_for_each(|p| p.set_bouncing(bouncing))
    }

    pub fn set_lifetime(&mut self, lifetime: V::Scalar) {
        for p in self.particles.iter_mut() {
            p.lifetime = lifetime;
        }
    }

    /// Overwrite every particle's accumulator with its weight.
    pub fn apply_gravity(&mut self, gravity: V) {
        for p in self.particles.iter_mut() {
            p.apply_gravity(gravity);
        }
    }

    /// A rope dies with its last particle.
    pub fn is_dead(&self) -> bool {
        self.particles.iter().all(|p| !p.is_alive())
    }

    /// Move particle 0 onto the anchor if the rope is pinned.
    pub fn apply_anchor(&mut self) {
        if self.pinned {
            self.particles[0].move_to(self.anchor);
        }
    }

    /// Sum of attached spring forces per particle, read from the current
    /// (not yet integrated) state of the whole chain.
    pub fn spring_forces(&self) -> AllocVec<V> {
        self.attached
            .iter()
            .enumerate()
            .map(|(i, springs)| {
                springs
                    .iter()
                    .fold(V::zero(), |acc, &s| acc + self.springs[s].force_on(i, &self.particles))
            })
            .collect()
    }
}

impl<V: Cross> Rope<V> {
    /// Gravity and spring forces, integration, then collisions, for every
    /// particle. Returns the number of collision corrections.
    pub fn advance<O: StepObserver>(
        &mut self,
        dt: V::Scalar,
        config: &SimulationConfig<V>,
        obstacles: &Obstacles<V>,
        observer: &mut O,
    ) -> usize {
        let spring_forces = self.spring_forces();
        let mut collisions = 0;
        for (p, spring_force) in self.particles.iter_mut().zip(spring_forces) {
            p.apply_gravity(config.gravity);
            p.add_force(spring_force);
            p.integrate_damped(dt, config.solver, config.verlet_damping);
            let hits = obstacles.resolve(p);
            for _ in 0..hits {
                observer.on_collision();
            }
            collisions += hits;
        }
        collisions
    }

    /// Standalone step: anchor update followed by [`Rope::advance`].
    pub fn step<O: StepObserver>(
        &mut self,
        dt: V::Scalar,
        config: &SimulationConfig<V>,
        obstacles: &Obstacles<V>,
        observer: &mut O,
    ) -> usize {
        self.apply_anchor();
        let collisions = self.advance(dt, config, obstacles, observer);
        observer.on_integrate();
        observer.on_step_complete();
        collisions
    }
}

impl<F: Float> Rope<Vec3<F>> {
    /// Rope laid out along a random horizontal direction.
    pub fn random<R: Rng + ?Sized>(
        start: Vec3<F>,
        segments: usize,
        config: &RopeConfig<F>,
        rng: &mut R,
    ) -> Result<Self, PhysicsError> {
        Self::new(start, random_horizontal_direction(rng, segments), segments, config)
    }
}

/// Random spacing vector in the xz plane; components are uniform in
/// `[-5/segments, 5/segments)` so longer ropes stay about the same size.
pub fn random_horizontal_direction<F: Float, R: Rng + ?Sized>(rng: &mut R, segments: usize) -> Vec3<F> {
    let spread = 10.0 / segments.max(1) as f32;
    let x = (rng.gen::<f32>() - 0.5) * spread;
    let z = (rng.gen::<f32>() - 0.5) * spread;
    Vec3::new(F::from_f32(x), F::zero(), F::from_f32(z))
}
