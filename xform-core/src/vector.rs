//! Three-component vectors for directions and camera bases
use std::ops::Neg;

use approx::{AbsDiffEq, RelativeEq};
use nalgebra as na;

/// A direction in 3D space.
///
/// Backed by four slots `[x, y, z, w]` with `w` held at 0, so a 4x4
/// transform never applies its translation column to it. All operations
/// except [`Vector3::scale_in_place`] return a new vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3(na::Vector4<f32>);

impl Vector3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(na::Vector4::new(x, y, z, 0.0))
    }

    pub fn zero() -> Self {
        Self(na::Vector4::zeros())
    }

    /// Build a vector from up to three values; missing components are 0
    /// and anything past the third value is ignored.
    pub fn from_slice(values: &[f32]) -> Self {
        let mut vector = Self::zero();
        for (slot, &value) in vector.0.iter_mut().zip(values.iter().take(3)) {
            *slot = value;
        }
        vector
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }

    pub fn z(&self) -> f32 {
        self.0.z
    }

    /// The raw backing array `[x, y, z, 0]`.
    pub fn data(&self) -> [f32; 4] {
        [self.0.x, self.0.y, self.0.z, self.0.w]
    }

    /// Cross product over the first three components.
    pub fn cross_product(&self, other: &Vector3) -> Vector3 {
        let (a, b) = (&self.0, &other.0);
        Vector3::new(
            a.y * b.z - a.z * b.y,
            a.z * b.x - a.x * b.z,
            a.x * b.y - a.y * b.x,
        )
    }

    /// Dot product over the first three components.
    pub fn dot_product(&self, other: &Vector3) -> f32 {
        self.0.x * other.0.x + self.0.y * other.0.y + self.0.z * other.0.z
    }

    /// Component-wise sum.
    pub fn add(&self, other: &Vector3) -> Vector3 {
        Self(self.0 + other.0)
    }

    /// Component-wise difference.
    pub fn subtract(&self, other: &Vector3) -> Vector3 {
        Self(self.0 - other.0)
    }

    /// Euclidean length of `(x, y, z)`.
    pub fn length(&self) -> f32 {
        self.dot_product(self).sqrt()
    }

    /// Unit-length copy of this vector. A zero vector is returned unchanged.
    pub fn normalize(&self) -> Vector3 {
        let len = self.length();
        if len == 0.0 {
            return *self;
        }
        Vector3::new(self.0.x / len, self.0.y / len, self.0.z / len)
    }

    /// Copy with `(x, y, z)` multiplied by `s`.
    pub fn scale(&self, s: f32) -> Vector3 {
        Vector3::new(self.0.x * s, self.0.y * s, self.0.z * s)
    }

    /// Multiply `(x, y, z)` by `s` in place and hand back the backing array.
    pub fn scale_in_place(&mut self, s: f32) -> &[f32; 4] {
        self.0.x *= s;
        self.0.y *= s;
        self.0.z *= s;
        self.as_array()
    }

    fn as_array(&self) -> &[f32; 4] {
        &self.0.data.0[0]
    }
}

impl Default for Vector3 {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.0.x, -self.0.y, -self.0.z)
    }
}

impl AbsDiffEq for Vector3 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.data()
            .iter()
            .zip(other.data().iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Vector3 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.data()
            .iter()
            .zip(other.data().iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
