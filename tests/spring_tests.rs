use particula::{ForceSource, Particle, PhysicsError, Spring, Vec3};
use particula::vec::Vec as _;

fn pair(a: Vec3<f32>, b: Vec3<f32>) -> Vec<Particle<Vec3<f32>>> {
    vec![Particle::new(a, 1.0, 10.0), Particle::new(b, 1.0, 10.0)]
}

#[test]
fn rest_length_is_distance_between_endpoints() {
    let particles = pair(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 3.0, 4.0));
    let spring = Spring::new(0, 1, &particles, 10.0, 0.1).unwrap();
    assert!((spring.rest_length() - 5.0).abs() < 1e-6);
    assert_eq!(spring.endpoints(), (0, 1));
}

#[test]
fn spring_at_rest_exerts_no_force() {
    let particles = pair(Vec3::zero(), Vec3::new(2.0, 0.0, 0.0));
    let spring = Spring::new(0, 1, &particles, 50.0, 2.0).unwrap();
    assert_eq!(spring.force_on(0, &particles), Vec3::zero());
    assert_eq!(spring.force_on(1, &particles), Vec3::zero());
}

#[test]
fn stretched_spring_pulls_endpoints_together() {
    let particles = pair(Vec3::zero(), Vec3::new(2.0, 0.0, 0.0));
    let spring = Spring::with_rest_length(0, 1, 1.0, 10.0, 0.0).unwrap();

    let on_a = spring.force_on(0, &particles);
    let on_b = spring.force_on(1, &particles);
    assert!((on_a.x - 10.0).abs() < 1e-5, "a should be pulled toward b, got {:?}", on_a);
    assert!((on_b.x + 10.0).abs() < 1e-5, "b should be pulled toward a, got {:?}", on_b);
    assert_eq!(on_a + on_b, Vec3::zero(), "forces must be equal and opposite");
}

#[test]
fn compressed_spring_pushes_endpoints_apart() {
    let particles = pair(Vec3::zero(), Vec3::new(0.0, 0.5, 0.0));
    let spring = Spring::with_rest_length(0, 1, 1.0, 4.0, 0.0).unwrap();

    let on_a = spring.force_on(0, &particles);
    let on_b = spring.force_on(1, &particles);
    assert!((on_a.y + 2.0).abs() < 1e-5, "got {:?}", on_a);
    assert!((on_b.y - 2.0).abs() < 1e-5, "got {:?}", on_b);
}

#[test]
fn damping_resists_separation() {
    let mut particles = pair(Vec3::zero(), Vec3::new(1.0, 0.0, 0.0));
    particles[1].velocity = Vec3::new(3.0, 0.0, 0.0);
    let spring = Spring::new(0, 1, &particles, 100.0, 0.5).unwrap();

    // At rest length only the axial damping term remains: 0.5 * 3.0.
    let on_a = spring.force_on(0, &particles);
    assert!((on_a.x - 1.5).abs() < 1e-5, "got {:?}", on_a);
}

#[test]
fn perpendicular_relative_velocity_is_not_damped() {
    let mut particles = pair(Vec3::zero(), Vec3::new(1.0, 0.0, 0.0));
    particles[1].velocity = Vec3::new(0.0, 0.0, 7.0);
    let spring = Spring::new(0, 1, &particles, 100.0, 0.5).unwrap();
    assert!(spring.force_on(0, &particles).length() < 1e-6);
}

#[test]
fn unrelated_particle_gets_nothing() {
    let mut particles = pair(Vec3::zero(), Vec3::new(3.0, 0.0, 0.0));
    particles.push(Particle::new(Vec3::new(9.0, 9.0, 9.0), 1.0, 10.0));
    let spring = Spring::with_rest_length(0, 1, 1.0, 10.0, 0.0).unwrap();
    assert!(spring.connects(1));
    assert!(!spring.connects(2));
    assert_eq!(spring.force_on(2, &particles), Vec3::zero());
}

#[test]
fn coincident_endpoints_produce_no_force() {
    let particles = pair(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 1.0));
    let spring = Spring::with_rest_length(0, 1, 1.0, 10.0, 1.0).unwrap();
    assert_eq!(spring.force_on(0, &particles), Vec3::zero());
}

#[test]
fn spring_to_itself_is_rejected() {
    let particles = pair(Vec3::zero(), Vec3::new(1.0, 0.0, 0.0));
    let err = Spring::new(1, 1, &particles, 1.0, 0.0).unwrap_err();
    assert_eq!(err, PhysicsError::SelfSpring { index: 1 });
}

#[test]
fn out_of_bounds_endpoint_is_rejected() {
    let particles = pair(Vec3::zero(), Vec3::new(1.0, 0.0, 0.0));
    let err = Spring::new(0, 2, &particles, 1.0, 0.0).unwrap_err();
    assert_eq!(err, PhysicsError::ParticleOutOfBounds { index: 2, count: 2 });
}

#[test]
fn coefficients_must_be_non_negative() {
    assert_eq!(
        Spring::<Vec3<f32>>::with_rest_length(0, 1, 1.0, -1.0, 0.0).unwrap_err(),
        PhysicsError::InvalidSpringCoefficient
    );
    let mut spring = Spring::<Vec3<f32>>::with_rest_length(0, 1, 1.0, 1.0, 0.0).unwrap();
    assert!(spring.set_damping(-0.1).is_err());
    assert!(spring.set_elasticity(25.0).is_ok());
    assert_eq!(spring.elasticity, 25.0);
}

#[test]
fn two_particle_oscillator_keeps_its_centre_of_mass() {
    use particula::SolverMethod;

    let mut particles = pair(Vec3::zero(), Vec3::new(1.5, 0.0, 0.0));
    let spring = Spring::with_rest_length(0, 1, 1.0, 20.0, 2.0).unwrap();
    let centre = Vec3::new(0.75, 0.0, 0.0);

    for _ in 0..500 {
        let forces: Vec<_> = (0..2).map(|i| spring.force_on(i, &particles)).collect();
        for (p, f) in particles.iter_mut().zip(forces) {
            p.set_force(f);
            p.integrate(0.01, SolverMethod::SemiImplicitEuler);
        }
    }

    let mid = (particles[0].pos + particles[1].pos).scale(0.5);
    assert!(mid.distance(centre) < 1e-4, "centre drifted to {:?}", mid);
    let length = spring.length(&particles);
    assert!((length - 1.0).abs() < 0.1, "damped spring should settle near rest, got {}", length);
}
