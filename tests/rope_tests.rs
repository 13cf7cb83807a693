use particula::rope::random_horizontal_direction;
use particula::{
    NoOpStepObserver, Obstacles, PhysicsError, Rope, RopeConfig, SimulationConfig, Vec3,
};
use particula::vec::Vec as _;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn straight_rope(segments: usize, pinned: bool) -> Rope<Vec3<f32>> {
    let config = RopeConfig { pinned, ..RopeConfig::default() };
    Rope::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.5, 0.0, 0.0), segments, &config).unwrap()
}

#[test]
fn rope_topology() {
    let rope = straight_rope(5, false);
    assert_eq!(rope.len(), 6); // segments + 1
    assert_eq!(rope.segment_count(), 5);

    for (i, spring) in rope.springs().iter().enumerate() {
        assert_eq!(spring.endpoints(), (i, i + 1));
    }
    assert_eq!(rope.attached_springs(0), &[0]);
    assert_eq!(rope.attached_springs(3), &[2, 3]);
    assert_eq!(rope.attached_springs(5), &[4]);
}

#[test]
fn particles_laid_out_along_direction() {
    let rope = straight_rope(4, false);
    for (i, pos) in rope.positions().into_iter().enumerate() {
        let expected = Vec3::new(0.5 * i as f32, 5.0, 0.0);
        assert!(pos.distance(expected) < 1e-6, "particle {} at {:?}", i, pos);
    }
}

#[test]
fn springs_rest_at_initial_spacing() {
    let rope = straight_rope(8, false);
    for spring in rope.springs() {
        assert!((spring.rest_length() - 0.5).abs() < 1e-6);
    }
    for force in rope.spring_forces() {
        assert!(force.length() < 1e-5, "a fresh rope is relaxed, got {:?}", force);
    }
}

#[test]
fn mass_is_split_over_segments() {
    let config = RopeConfig { total_mass: 2.0, ..RopeConfig::default() };
    let rope: Rope<Vec3<f32>> = Rope::new(Vec3::zero(), Vec3::unit_x(), 4, &config).unwrap();
    for p in rope.particles() {
        assert!((p.mass() - 0.5).abs() < 1e-6);
    }
}

#[test]
fn zero_segments_is_rejected() {
    let err = Rope::<Vec3<f32>>::new(Vec3::zero(), Vec3::unit_x(), 0, &RopeConfig::default())
        .err()
        .unwrap();
    assert_eq!(err, PhysicsError::InvalidParticleCount);
}

#[test]
fn invalid_parameters_are_rejected() {
    let bad_bounce = RopeConfig { bouncing: 1.5, ..RopeConfig::default() };
    assert_eq!(
        Rope::<Vec3<f32>>::new(Vec3::zero(), Vec3::unit_x(), 3, &bad_bounce).err(),
        Some(PhysicsError::InvalidBouncing)
    );
    let bad_mass = RopeConfig { total_mass: 0.0, ..RopeConfig::default() };
    assert_eq!(
        Rope::<Vec3<f32>>::new(Vec3::zero(), Vec3::unit_x(), 3, &bad_mass).err(),
        Some(PhysicsError::InvalidMass)
    );
}

#[test]
fn pinned_rope_fixes_first_particle_only() {
    let rope = straight_rope(3, true);
    assert!(rope.is_pinned());
    assert!(rope.particle(0).fixed);
    assert!(rope.particles()[1..].iter().all(|p| !p.fixed));
}

#[test]
fn anchor_drives_pinned_particle() {
    let mut rope = straight_rope(3, true);
    let anchor = Vec3::new(3.0, 4.0, -1.0);
    rope.set_anchor(anchor);
    rope.apply_anchor();
    assert_eq!(rope.particle(0).pos, anchor);

    let config = SimulationConfig::earth();
    rope.step(0.01, &config, &Obstacles::new(), &mut NoOpStepObserver);
    assert_eq!(rope.particle(0).pos, anchor, "anchor survives integration");
}

#[test]
fn anchor_is_ignored_when_unpinned() {
    let mut rope = straight_rope(3, false);
    let start = rope.particle(0).pos;
    rope.set_anchor(Vec3::new(100.0, 0.0, 0.0));
    rope.apply_anchor();
    assert_eq!(rope.particle(0).pos, start);
}

#[test]
fn pinned_rope_hangs_under_gravity() {
    let mut rope = straight_rope(10, true);
    let config = SimulationConfig::earth();
    let obstacles = Obstacles::new();

    let mut lowest = f32::MAX;
    for _ in 0..300 {
        rope.step(config.dt, &config, &obstacles, &mut NoOpStepObserver);
        lowest = lowest.min(rope.particle(rope.len() - 1).pos.y);
    }

    let start_y = rope.particle(0).pos.y;
    assert_eq!(start_y, 5.0);
    assert!(lowest < start_y - 1.0, "free end should swing well below the pin, lowest {}", lowest);
    assert!(rope.particles().iter().all(|p| p.pos.is_finite()));
}

#[test]
fn released_rope_falls() {
    let mut rope = straight_rope(4, true);
    let config = SimulationConfig::earth();
    rope.set_pinned(false);
    assert!(!rope.particle(0).fixed);

    for _ in 0..50 {
        rope.step(config.dt, &config, &Obstacles::new(), &mut NoOpStepObserver);
    }
    assert!(rope.particle(0).pos.y < 5.0);
}

#[test]
fn repinning_holds_current_position() {
    let mut rope = straight_rope(4, false);
    let config = SimulationConfig::earth();
    for _ in 0..20 {
        rope.step(config.dt, &config, &Obstacles::new(), &mut NoOpStepObserver);
    }
    rope.set_pinned(true);
    let held = rope.particle(0).pos;
    assert_eq!(rope.anchor(), held);
    for _ in 0..20 {
        rope.step(config.dt, &config, &Obstacles::new(), &mut NoOpStepObserver);
    }
    assert_eq!(rope.particle(0).pos, held);
}

#[test]
fn rope_setters_propagate() {
    let mut rope = straight_rope(3, false);
    rope.set_elasticity(7.0).unwrap();
    rope.set_damping(0.25).unwrap();
    rope.set_bouncing(0.3).unwrap();
    rope.set_lifetime(42.0);

    assert!(rope.springs().iter().all(|s| s.elasticity == 7.0 && s.damping == 0.25));
    assert!(rope.particles().iter().all(|p| p.bouncing == 0.3 && p.lifetime == 42.0));
    assert!(rope.set_elasticity(-1.0).is_err());
    assert!(rope.set_bouncing(2.0).is_err());
}

#[test]
fn rope_dies_with_its_particles() {
    let config = RopeConfig { lifetime: 0.05, ..RopeConfig::default() };
    let mut rope: Rope<Vec3<f32>> = Rope::new(Vec3::zero(), Vec3::unit_x(), 3, &config).unwrap();
    assert!(!rope.is_dead());
    let sim = SimulationConfig::new().with_dt(0.1);
    rope.step(0.1, &sim, &Obstacles::new(), &mut NoOpStepObserver);
    assert!(rope.is_dead());
}

#[test]
fn random_direction_is_horizontal_and_bounded() {
    let mut rng = SmallRng::seed_from_u64(7);
    for segments in [1, 5, 50] {
        let bound = 5.0 / segments as f32;
        for _ in 0..100 {
            let d: Vec3<f32> = random_horizontal_direction(&mut rng, segments);
            assert_eq!(d.y, 0.0);
            assert!(d.x >= -bound && d.x <= bound, "x = {} outside +-{}", d.x, bound);
            assert!(d.z >= -bound && d.z <= bound, "z = {} outside +-{}", d.z, bound);
        }
    }
}

#[test]
fn random_rope_is_reproducible_from_seed() {
    let build = || {
        let mut rng = SmallRng::seed_from_u64(1234);
        Rope::<Vec3<f64>>::random(Vec3::zero(), 6, &RopeConfig::default(), &mut rng).unwrap()
    };
    assert_eq!(build().positions(), build().positions());
    assert!(build().positions().iter().all(|p| p.y == 0.0));
}
