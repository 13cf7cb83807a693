//! Value-typed vector math for particle state.
//!
//! Every operation takes `self` by value and returns a new vector, so there
//! are no shared scratch buffers to alias.

use crate::float::Float;
use core::ops::{Add, Neg, Sub};
use serde::{Deserialize, Serialize};

/// Vector operations the integrator, springs and colliders are written against.
pub trait Vec:
    Copy
    + Clone
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + PartialEq
    + Default
    + core::fmt::Debug
{
    type Scalar: Float;

    fn zero() -> Self;

    fn dot(self, other: Self) -> Self::Scalar;

    fn scale(self, s: Self::Scalar) -> Self;

    fn length_sq(self) -> Self::Scalar {
        self.dot(self)
    }

    fn length(self) -> Self::Scalar {
        self.length_sq().sqrt()
    }

    /// Unit vector in the same direction, or `None` when the length is
    /// too small to divide by.
    fn try_normalize(self) -> Option<Self> {
        let len = self.length();
        if len.is_near_zero(Self::Scalar::from_f32(1e-10)) || !len.is_finite() {
            None
        } else {
            Some(self.scale(len.recip()))
        }
    }

    /// Unit vector, or the zero vector for degenerate input.
    fn normalize(self) -> Self {
        self.try_normalize().unwrap_or_else(Self::zero)
    }

    /// `self + other * s`
    fn add_scaled(self, other: Self, s: Self::Scalar) -> Self {
        self + other.scale(s)
    }

    fn distance(self, other: Self) -> Self::Scalar {
        (self - other).length()
    }

    fn is_finite(self) -> bool {
        self.dot(self).is_finite()
    }
}

/// Vectors with a cross product. Needed for triangle areas and normals.
pub trait Cross: Vec {
    fn cross(self, other: Self) -> Self;
}

/// 3D vector, the native space of the simulation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Vec3<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Vec3<F> {
    pub fn new(x: F, y: F, z: F) -> Self { Vec3 { x, y, z } }

    pub fn unit_x() -> Self { Vec3::new(F::one(), F::zero(), F::zero()) }
    pub fn unit_y() -> Self { Vec3::new(F::zero(), F::one(), F::zero()) }
    pub fn unit_z() -> Self { Vec3::new(F::zero(), F::zero(), F::one()) }
}

impl<F: Float> Add for Vec3<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl<F: Float> Sub for Vec3<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl<F: Float> Neg for Vec3<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec3 { x: -self.x, y: -self.y, z: -self.z } }
}

impl<F: Float> Vec for Vec3<F> {
    type Scalar = F;
    fn zero() -> Self { Vec3 { x: F::zero(), y: F::zero(), z: F::zero() } }
    fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
    fn scale(self, s: F) -> Self {
        Vec3 { x: self.x * s, y: self.y * s, z: self.z * s }
    }
}

impl<F: Float> Cross for Vec3<F> {
    fn cross(self, other: Self) -> Self {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}
