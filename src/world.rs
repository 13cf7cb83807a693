//! The live particle set and the per-frame step.

use crate::collision::Obstacles;
use crate::config::SimulationConfig;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::rope::Rope;
use crate::vec::{Cross, Vec};
use alloc::vec::Vec as AllocVec;
use core::fmt;

/// Handle to a free particle. Never reused within a world.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(u64);

/// Handle to a rope. Never reused within a world.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RopeId(u64);

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "particle#{}", self.0)
    }
}

impl fmt::Display for RopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rope#{}", self.0)
    }
}

/// What happened during one step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Particles integrated, rope particles included.
    pub integrated: usize,
    pub collisions: usize,
    /// Free particles plus rope particles removed.
    pub culled: usize,
}

/// Free particles, ropes, and the static obstacles they collide with.
pub struct World<V: Vec> {
    particles: AllocVec<(ParticleId, Particle<V>)>,
    ropes: AllocVec<(RopeId, Rope<V>)>,
    obstacles: Obstacles<V>,
    next_id: u64,
    collision_count: u64,
}

impl<V: Vec> World<V> {
    pub fn new(obstacles: Obstacles<V>) -> Self {
        World {
            particles: AllocVec::new(),
            ropes: AllocVec::new(),
            obstacles,
            next_id: 0,
            collision_count: 0,
        }
    }

    fn next_raw_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn(&mut self, particle: Particle<V>) -> ParticleId {
        let id = ParticleId(self.next_raw_id());
        self.particles.push((id, particle));
        id
    }

    pub fn spawn_rope(&mut self, rope: Rope<V>) -> RopeId {
        let id = RopeId(self.next_raw_id());
        log::debug!("spawned {} with {} particles", id, rope.len());
        self.ropes.push((id, rope));
        id
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle<V>> {
        self.particles.iter().find(|(pid, _)| *pid == id).map(|(_, p)| p)
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle<V>> {
        self.particles.iter_mut().find(|(pid, _)| *pid == id).map(|(_, p)| p)
    }

    pub fn rope(&self, id: RopeId) -> Option<&Rope<V>> {
        self.ropes.iter().find(|(rid, _)| *rid == id).map(|(_, r)| r)
    }

    pub fn rope_mut(&mut self, id: RopeId) -> Option<&mut Rope<V>> {
        self.ropes.iter_mut().find(|(rid, _)| *rid == id).map(|(_, r)| r)
    }

    /// Free particles in spawn order.
    pub fn particles(&self) -> impl Iterator<Item = (ParticleId, &Particle<V>)> {
        self.particles.iter().map(|(id, p)| (*id, p))
    }

    pub fn ropes(&self) -> impl Iterator<Item = (RopeId, &Rope<V>)> {
        self.ropes.iter().map(|(id, r)| (*id, r))
    }

    /// Number of free particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn rope_count(&self) -> usize {
        self.ropes.len()
    }

    /// Free particles plus every rope particle.
    pub fn total_particles(&self) -> usize {
        self.particles.len() + self.ropes.iter().map(|(_, r)| r.len()).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.ropes.is_empty()
    }

    pub fn obstacles(&self) -> &Obstacles<V> {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut Obstacles<V> {
        &mut self.obstacles
    }

    /// Collision corrections since the world was created.
    pub fn collision_count(&self) -> u64 {
        self.collision_count
    }

    /// Remove a particle without notifying; the caller owns the cleanup.
    pub fn remove_particle(&mut self, id: ParticleId) -> Option<Particle<V>> {
        let index = self.particles.iter().position(|(pid, _)| *pid == id)?;
        Some(self.particles.remove(index).1)
    }

    pub fn remove_rope(&mut self, id: RopeId) -> Option<Rope<V>> {
        let index = self.ropes.iter().position(|(rid, _)| *rid == id)?;
        Some(self.ropes.remove(index).1)
    }

    /// Remove everything, notifying `observer` for each handle.
    pub fn clear<O: StepObserver>(&mut self, observer: &mut O) {
        for (id, _) in self.particles.drain(..) {
            observer.on_particle_culled(id);
        }
        for (id, _) in self.ropes.drain(..) {
            observer.on_rope_culled(id);
        }
    }

    /// New restitution for every live particle.
    pub fn set_bouncing(&mut self, bouncing: V::Scalar) -> Result<(), PhysicsError> {
        for (_, p) in self.particles.iter_mut() {
            p.set_bouncing(bouncing)?;
        }
        self.ropes.iter_mut().try_for_each(|(_, r)| r.set_bouncing(bouncing))
    }

    /// Restart every countdown at `lifetime`.
    pub fn set_lifetime(&mut self, lifetime: V::Scalar) {
        for (_, p) in self.particles.iter_mut() {
            p.lifetime = lifetime;
        }
        for (_, r) in self.ropes.iter_mut() {
            r.set_lifetime(lifetime);
        }
    }

    pub fn set_elasticity(&mut self, elasticity: V::Scalar) -> Result<(), PhysicsError> {
        self.ropes.iter_mut().try_for_each(|(_, r)| r.set_elasticity(elasticity))
    }

    pub fn set_damping(&mut self, damping: V::Scalar) -> Result<(), PhysicsError> {
        self.ropes.iter_mut().try_for_each(|(_, r)| r.set_damping(damping))
    }

    /// Overwrite the force accumulator of every live particle, rope
    /// particles included, with its weight under `gravity`. The next step
    /// recomputes the accumulators from its own configuration.
    pub fn set_gravity_force(&mut self, gravity: V) {
        for (_, p) in self.particles.iter_mut() {
            p.apply_gravity(gravity);
        }
        for (_, r) in self.ropes.iter_mut() {
            r.apply_gravity(gravity);
        }
    }

    /// Drop dead particles and dead ropes in one stable pass.
    fn cull_dead<O: StepObserver>(&mut self, observer: &mut O) -> usize {
        let mut culled = 0;
        self.particles.retain(|(id, p)| {
            if p.is_alive() {
                return true;
            }
            observer.on_particle_culled(*id);
            culled += 1;
            false
        });
        self.ropes.retain(|(id, r)| {
            if !r.is_dead() {
                return true;
            }
            observer.on_rope_culled(*id);
            culled += r.len();
            false
        });
        culled
    }
}

impl<V: Cross> World<V> {
    /// Advance the world by `config.dt`.
    pub fn tick<O: StepObserver>(&mut self, config: &SimulationConfig<V>, observer: &mut O) -> StepStats {
        self.step(config.dt, config, observer)
    }

    /// Advance the world by `dt`, which must be positive.
    ///
    /// Dead particles are culled, rope anchors updated, and then every live
    /// particle gets gravity (plus spring forces inside ropes), integrates,
    /// and resolves collisions against planes, spheres and triangles, in
    /// that order. Particles whose lifetime ran out during the step are
    /// culled before returning. Lifetimes can also change between frames
    /// through the control surface, hence the cull on entry.
    pub fn step<O: StepObserver>(
        &mut self,
        dt: V::Scalar,
        config: &SimulationConfig<V>,
        observer: &mut O,
    ) -> StepStats {
        let mut stats = StepStats { culled: self.cull_dead(observer), ..StepStats::default() };

        for (_, rope) in self.ropes.iter_mut() {
            rope.apply_anchor();
        }

        for (_, p) in self.particles.iter_mut() {
            p.apply_gravity(config.gravity);
            p.integrate_damped(dt, config.solver, config.verlet_damping);
            let hits = self.obstacles.resolve(p);
            for _ in 0..hits {
                observer.on_collision();
            }
            stats.collisions += hits;
            stats.integrated += 1;
        }

        for (_, rope) in self.ropes.iter_mut() {
            stats.collisions += rope.advance(dt, config, &self.obstacles, observer);
            stats.integrated += rope.len();
        }
        observer.on_integrate();

        stats.culled += self.cull_dead(observer);
        self.collision_count += stats.collisions as u64;

        if stats.culled > 0 {
            log::debug!(
                "step dt={}: integrated {}, collisions {}, culled {}",
                dt,
                stats.integrated,
                stats.collisions,
                stats.culled
            );
        } else {
            log::trace!("step dt={}: integrated {}, collisions {}", dt, stats.integrated, stats.collisions);
        }

        observer.on_step_complete();
        stats
    }
}

impl<V: Vec> Default for World<V> {
    fn default() -> Self {
        Self::new(Obstacles::default())
    }
}

impl<F: Float> World<crate::vec::Vec3<F>> {
    /// Empty world inside the demo scene: a box of half-extent 10 and a
    /// sphere of radius 3 below its centre.
    pub fn demo() -> Self {
        Self::new(Obstacles::demo_scene())
    }
}
