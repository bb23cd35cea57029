//! 4x4 transformation matrices with column-major storage
use std::fmt;
use std::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};
use nalgebra as na;

use crate::vector::Vector3;

/// A 4x4 matrix used for model, view and projection transforms.
///
/// Storage is column-major: element `(r, c)` lives at index `r + 4 * c` of
/// [`Matrix4::data`], which is the layout `uniformMatrix4fv` expects.
/// Every transformation returns a new matrix and leaves `self` untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4(na::Matrix4<f32>);

impl Matrix4 {
    /// Create an identity matrix.
    pub fn identity() -> Self {
        Self(na::Matrix4::identity())
    }

    /// Create a matrix from values written row by row.
    ///
    /// At most 16 values are read. Entries not covered by `values` keep
    /// their identity value, so `from_row_major(&[2.0])` only replaces the
    /// top-left element.
    pub fn from_row_major(values: &[f32]) -> Self {
        let mut matrix = Self::identity();
        for (i, &value) in values.iter().take(16).enumerate() {
            matrix.set_value(i / 4, i % 4, value);
        }
        matrix
    }

    /// Element at row `r`, column `c`.
    pub fn value(&self, r: usize, c: usize) -> f32 {
        self.0[(r, c)]
    }

    /// Replace the element at row `r`, column `c`.
    pub fn set_value(&mut self, r: usize, c: usize, value: f32) {
        self.0[(r, c)] = value;
    }

    /// The 16 elements in column-major order.
    pub fn data(&self) -> [f32; 16] {
        let mut data = [0.0; 16];
        data.copy_from_slice(self.0.as_slice());
        data
    }

    /// Row-by-column product `self * other`.
    pub fn multiply(&self, other: &Matrix4) -> Matrix4 {
        Self(self.0 * other.0)
    }

    /// Post-multiply by a translation of `(x, y, z)`.
    pub fn translate(&self, x: f32, y: f32, z: f32) -> Matrix4 {
        let mut t = Self::identity();
        t.set_value(0, 3, x);
        t.set_value(1, 3, y);
        t.set_value(2, 3, z);
        self.multiply(&t)
    }

    /// Scale about the origin.
    pub fn scale(&self, sx: f32, sy: f32, sz: f32) -> Matrix4 {
        self.scale_about(sx, sy, sz, 0.0, 0.0, 0.0)
    }

    /// Scale about the pivot `(px, py, pz)`.
    pub fn scale_about(&self, sx: f32, sy: f32, sz: f32, px: f32, py: f32, pz: f32) -> Matrix4 {
        #[rustfmt::skip]
        let s = Self::from_row_major(&[
            sx, 0.0, 0.0, 0.0,
            0.0, sy, 0.0, 0.0,
            0.0, 0.0, sz, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ]);
        self.translate(px, py, pz)
            .multiply(&s)
            .translate(-px, -py, -pz)
    }

    /// Rotate `theta` degrees around the x axis.
    pub fn rotate_x(&self, theta: f32) -> Matrix4 {
        self.rotate(theta, 0.0, 0.0)
    }

    /// Rotate `theta` degrees around the y axis.
    pub fn rotate_y(&self, theta: f32) -> Matrix4 {
        self.rotate(0.0, theta, 0.0)
    }

    /// Rotate `theta` degrees around the z axis.
    pub fn rotate_z(&self, theta: f32) -> Matrix4 {
        self.rotate(0.0, 0.0, theta)
    }

    /// Rotate around all three axes, angles in degrees.
    ///
    /// The result is `self * Rx * Ry * Rz`, so a vertex sees the z rotation
    /// first and the x rotation last.
    pub fn rotate(&self, theta_x: f32, theta_y: f32, theta_z: f32) -> Matrix4 {
        self.rotate_about(theta_x, theta_y, theta_z, 0.0, 0.0, 0.0)
    }

    /// Rotate around the pivot `(px, py, pz)`, angles in degrees.
    pub fn rotate_about(
        &self,
        theta_x: f32,
        theta_y: f32,
        theta_z: f32,
        px: f32,
        py: f32,
        pz: f32,
    ) -> Matrix4 {
        let (sin_x, cos_x) = theta_x.to_radians().sin_cos();
        #[rustfmt::skip]
        let rx = Self::from_row_major(&[
            1.0, 0.0, 0.0, 0.0,
            0.0, cos_x, -sin_x, 0.0,
            0.0, sin_x, cos_x, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ]);

        let (sin_y, cos_y) = theta_y.to_radians().sin_cos();
        #[rustfmt::skip]
        let ry = Self::from_row_major(&[
            cos_y, 0.0, sin_y, 0.0,
            0.0, 1.0, 0.0, 0.0,
            -sin_y, 0.0, cos_y, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ]);

        let (sin_z, cos_z) = theta_z.to_radians().sin_cos();
        #[rustfmt::skip]
        let rz = Self::from_row_major(&[
            cos_z, -sin_z, 0.0, 0.0,
            sin_z, cos_z, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ]);

        self.translate(px, py, pz)
            .multiply(&rx)
            .multiply(&ry)
            .multiply(&rz)
            .translate(-px, -py, -pz)
    }

    /// Apply the matrix to `v` as a direction (`w = 0`).
    pub fn transform_vector(&self, v: &Vector3) -> Vector3 {
        let [x, y, z, w] = v.data();
        let out = self.0 * na::Vector4::new(x, y, z, w);
        Vector3::new(out.x, out.y, out.z)
    }

    /// Render the matrix as an HTML table, two decimals per entry.
    pub fn to_html(&self) -> String {
        let mut output = String::from("<table>");
        for r in 0..4 {
            output.push_str("<tr>");
            for c in 0..4 {
                output.push_str(&format!("<td>{:.2}</td>", self.value(r, c)));
            }
            output.push_str("</tr>");
        }
        output.push_str("</table>");
        output
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        self.multiply(&rhs)
    }
}

impl Mul<Vector3> for Matrix4 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        self.transform_vector(&rhs)
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..4 {
            writeln!(
                f,
                "[{:.2}, {:.2}, {:.2}, {:.2}]",
                self.value(r, 0),
                self.value(r, 1),
                self.value(r, 2),
                self.value(r, 3)
            )?;
        }
        Ok(())
    }
}

impl AbsDiffEq for Matrix4 {
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

impl RelativeEq for Matrix4 {
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
