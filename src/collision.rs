//! Static colliders and particle collision response.
//!
//! Every response goes through the plane correction: a sphere is handled
//! through its tangent plane at the particle's radial projection, a triangle
//! through its supporting plane.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::{Cross, Vec, Vec3};
use alloc::vec::Vec as AllocVec;
use serde::{Deserialize, Serialize};

/// The plane `dot(normal, x) + constant = 0`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plane<V: Vec> {
    pub normal: V,
    pub constant: V::Scalar,
}

impl<V: Vec> Plane<V> {
    pub fn new(normal: V, constant: V::Scalar) -> Self {
        Plane { normal, constant }
    }

    /// Plane through `point` with the given normal (normalized here).
    pub fn from_normal_and_point(normal: V, point: V) -> Self {
        let normal = normal.normalize();
        Plane { normal, constant: -normal.dot(point) }
    }

    /// Rescale so the normal has unit length. Degenerate normals are left as is.
    pub fn normalized(self) -> Self {
        let len = self.normal.length();
        if len.is_near_zero(V::Scalar::from_f32(1e-10)) {
            return self;
        }
        let inv = len.recip();
        Plane { normal: self.normal.scale(inv), constant: self.constant * inv }
    }

    pub fn signed_distance(&self, point: V) -> V::Scalar {
        self.normal.dot(point) + self.constant
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere<V: Vec> {
    pub center: V,
    pub radius: V::Scalar,
}

impl<V: Vec> Sphere<V> {
    pub fn new(center: V, radius: V::Scalar) -> Self {
        Sphere { center, radius }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangle<V: Vec> {
    pub a: V,
    pub b: V,
    pub c: V,
}

impl<V: Cross> Triangle<V> {
    pub fn new(a: V, b: V, c: V) -> Self {
        Triangle { a, b, c }
    }

    pub fn area(&self) -> V::Scalar {
        area(self.a, self.b, self.c)
    }

    /// Supporting plane, oriented by the winding `a -> b -> c`.
    pub fn plane(&self) -> Plane<V> {
        let normal = (self.b - self.a).cross(self.c - self.a);
        Plane::from_normal_and_point(normal, self.a)
    }
}

fn area<V: Cross>(a: V, b: V, c: V) -> V::Scalar {
    (b - a).cross(c - a).length() * V::Scalar::half()
}

impl<V: Vec> Particle<V> {
    /// Did the particle cross (or touch) the plane during the last step?
    pub fn collides_with_plane(&self, plane: &Plane<V>) -> bool {
        let s0 = plane.signed_distance(self.prev_pos);
        let s1 = plane.signed_distance(self.pos);
        s0 * s1 <= V::Scalar::zero()
    }

    /// Push the particle back across the plane and reflect the normal
    /// component of its velocity, both scaled by `1 + bouncing`.
    pub fn resolve_plane_collision(&mut self, plane: &Plane<V>) {
        if self.fixed {
            return;
        }
        let plane = plane.normalized();
        let restitution = V::Scalar::one() + self.bouncing;
        let n = plane.normal;
        self.pos = self.pos - n.scale(restitution * plane.signed_distance(self.pos));
        self.velocity = self.velocity - n.scale(restitution * self.velocity.dot(n));
    }

    pub fn collides_with_sphere(&self, sphere: &Sphere<V>) -> bool {
        self.pos.distance(sphere.center) < sphere.radius
    }

    /// Reflect off the tangent plane at the particle's radial projection.
    /// Returns whether a correction happened.
    pub fn resolve_sphere_collision(&mut self, sphere: &Sphere<V>) -> bool {
        if self.fixed {
            return false;
        }
        let Some(direction) = (self.pos - sphere.center).try_normalize() else {
            log::warn!("particle sits at the centre of a sphere collider, skipping response");
            return false;
        };
        let surface = sphere.center.add_scaled(direction, sphere.radius);
        self.resolve_plane_collision(&Plane::from_normal_and_point(direction, surface));
        true
    }
}

impl<V: Cross> Particle<V> {
    /// Area-based containment: the sub-triangle areas around the particle
    /// exceed the triangle's own area by at most the particle radius.
    pub fn collides_with_triangle(&self, triangle: &Triangle<V>) -> bool {
        let Triangle { a, b, c } = *triangle;
        let p = self.pos;
        let excess = area(p, b, c) + area(a, p, c) + area(a, b, p) - area(a, b, c);
        excess <= self.radius
    }

    /// Reflect off the triangle's plane, but only when the particle
    /// actually crossed it this step. Returns whether a correction happened.
    pub fn resolve_triangle_collision(&mut self, triangle: &Triangle<V>) -> bool {
        if self.fixed {
            return false;
        }
        let plane = triangle.plane();
        if plane.normal == V::zero() || !self.collides_with_plane(&plane) {
            return false;
        }
        self.resolve_plane_collision(&plane);
        true
    }
}

/// The static geometry particles collide against.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Obstacles<V: Vec> {
    #[serde(default)]
    pub planes: AllocVec<Plane<V>>,
    #[serde(default)]
    pub spheres: AllocVec<Sphere<V>>,
    #[serde(default)]
    pub triangles: AllocVec<Triangle<V>>,
}

impl<V: Vec> Default for Obstacles<V> {
    fn default() -> Self {
        Obstacles { planes: AllocVec::new(), spheres: AllocVec::new(), triangles: AllocVec::new() }
    }
}

impl<V: Vec> Obstacles<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plane(mut self, plane: Plane<V>) -> Self {
        self.planes.push(plane);
        self
    }

    pub fn with_sphere(mut self, sphere: Sphere<V>) -> Self {
        self.spheres.push(sphere);
        self
    }

    pub fn with_triangle(mut self, triangle: Triangle<V>) -> Self {
        self.triangles.push(triangle);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty() && self.spheres.is_empty() && self.triangles.is_empty()
    }
}

impl<V: Cross> Obstacles<V> {
    /// Test and resolve against every plane, then every sphere, then every
    /// triangle. Returns the number of corrections applied.
    pub fn resolve(&self, particle: &mut Particle<V>) -> usize {
        if particle.fixed {
            return 0;
        }
        let mut hits = 0;
        for plane in &self.planes {
            if particle.collides_with_plane(plane) {
                particle.resolve_plane_collision(plane);
                hits += 1;
            }
        }
        for sphere in &self.spheres {
            if particle.collides_with_sphere(sphere) && particle.resolve_sphere_collision(sphere) {
                hits += 1;
            }
        }
        for triangle in &self.triangles {
            if particle.collides_with_triangle(triangle) && particle.resolve_triangle_collision(triangle) {
                hits += 1;
            }
        }
        if hits > 0 {
            log::trace!("resolved {} collision(s)", hits);
        }
        hits
    }
}

impl<F: Float> Obstacles<Vec3<F>> {
    /// Axis-aligned box centred on the origin, walls facing inward.
    pub fn boxed(half_extent: F) -> Self {
        let zero = F::zero();
        let one = F::one();
        [
            Vec3::new(zero, one, zero),
            Vec3::new(zero, -one, zero),
            Vec3::new(zero, zero, -one),
            Vec3::new(zero, zero, one),
            Vec3::new(one, zero, zero),
            Vec3::new(-one, zero, zero),
        ]
        .into_iter()
        .fold(Obstacles::new(), |o, n| o.with_plane(Plane::new(n, half_extent)))
    }

    /// A box of half-extent 10 with a radius 3 sphere resting below the centre.
    pub fn demo_scene() -> Self {
        Self::boxed(F::from_f32(10.0)).with_sphere(Sphere::new(
            Vec3::new(F::zero(), F::from_f32(-5.0), F::zero()),
            F::from_f32(3.0),
        ))
    }
}
