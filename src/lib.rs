//! Frame-stepped particle physics.
//!
//! `particula` advances point masses under accumulated forces, resolves
//! collisions against static planes, spheres and triangles, and links
//! particles with damped springs to build ropes. It is the numeric core of
//! a particle sandbox: rendering, UI and spawn patterns live elsewhere and
//! talk to it through [`SimulationConfig`], [`World`] and [`StepObserver`].
//!
//! # Features
//!
//! - **Three integrators**: semi-implicit Euler, explicit Euler, position Verlet
//! - **Event-based collisions**: plane crossing test, sphere and triangle
//!   response through a single plane correction
//! - **Springs & ropes**: Hookean springs with axial damping, pinnable ropes
//! - **Observable**: cull notifications for renderer proxy cleanup
//! - **`no_std` compatible** without the default `std` feature
//!
//! ```
//! use particula::{NoOpStepObserver, Particle, SimulationConfig, Vec3, World};
//!
//! let config = SimulationConfig::<Vec3<f32>>::earth();
//! let mut world = World::demo();
//! let id = world.spawn(
//!     Particle::new(Vec3::new(0.0, 0.0, 0.0), config.bouncing, config.lifetime)
//!         .with_velocity(Vec3::new(5.0, 10.0, 0.0)),
//! );
//! for _ in 0..100 {
//!     world.tick(&config, &mut NoOpStepObserver);
//! }
//! assert!(world.particle(id).is_some());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod integrator;
pub mod particle;
pub mod collision;
pub mod spring;
pub mod rope;
pub mod world;
pub mod observer;
pub mod config;
pub mod error;

pub use float::Float;
pub use vec::{Cross, Vec, Vec3};
pub use integrator::SolverMethod;
pub use particle::Particle;
pub use collision::{Obstacles, Plane, Sphere, Triangle};
pub use spring::{ForceSource, Spring};
pub use rope::{Rope, RopeConfig};
pub use world::{ParticleId, RopeId, StepStats, World};
pub use observer::{NoOpStepObserver, StepObserver};
pub use config::SimulationConfig;
pub use error::PhysicsError;
