//! Hooks for the collaborators that mirror the simulation (renderers, UIs).

use crate::world::{ParticleId, RopeId};

/// Observes a [`World`](crate::world::World) step.
///
/// The cull callbacks are the disposal contract: once one fires, the handle
/// is gone from the world for good and any visual proxy attached to it
/// should be released. All methods default to no-ops.
pub trait StepObserver {
    /// Called after every live particle has been integrated.
    fn on_integrate(&mut self) {}

    /// Called once per collision correction.
    fn on_collision(&mut self) {}

    /// A free particle was removed.
    fn on_particle_culled(&mut self, _id: ParticleId) {}

    /// A rope was removed together with all its particles and springs.
    fn on_rope_culled(&mut self, _id: RopeId) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// Observer that ignores everything.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
