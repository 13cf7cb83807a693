//! Benchmarks for particula physics simulation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use particula::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn bench_spring_forces(c: &mut Criterion) {
    c.bench_function("rope_50_spring_forces", |b| {
        let rope: Rope<Vec3<f32>> = Rope::new(
            Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.2, -0.05, 0.0), 50, &RopeConfig::default(),
        ).unwrap();
        b.iter(|| black_box(rope.spring_forces()));
    });
}

fn bench_rope_simulation(c: &mut Criterion) {
    c.bench_function("rope_50_segments_100_steps", |b| {
        b.iter(|| {
            let config = SimulationConfig::earth();
            let mut rope: Rope<Vec3<f32>> = Rope::new(
                Vec3::new(0.0, 8.0, 0.0), Vec3::new(0.1, 0.0, 0.0), 50,
                &config.rope_config(true),
            ).unwrap();
            let obstacles = Obstacles::demo_scene();
            for _ in 0..100 {
                rope.step(config.dt, &config, &obstacles, &mut NoOpStepObserver);
            }
            rope.positions()
        });
    });
}

fn bench_world_simulation(c: &mut Criterion) {
    for solver in SolverMethod::ALL {
        c.bench_function(&format!("world_1000_particles_60_steps_{}", solver), |b| {
            b.iter(|| {
                let mut world: World<Vec3<f32>> = World::demo();
                let mut rng = SmallRng::seed_from_u64(1);
                for _ in 0..1000 {
                    let velocity = Vec3::new(
                        rng.gen_range(-5.0..5.0),
                        rng.gen_range(0.0..10.0),
                        rng.gen_range(-5.0..5.0),
                    );
                    world.spawn(Particle::new(Vec3::zero(), 0.9, 7.0).with_velocity(velocity));
                }
                let config = SimulationConfig::earth().with_solver(solver);
                for _ in 0..60 {
                    world.tick(&config, &mut NoOpStepObserver);
                }
                world.collision_count()
            });
        });
    }
}

criterion_group!(benches, bench_spring_forces, bench_rope_simulation, bench_world_simulation);
criterion_main!(benches);
