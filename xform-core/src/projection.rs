//! Camera projection and view matrices
use serde::{Deserialize, Serialize};

use crate::matrix::Matrix4;
use crate::settings::{CameraSettings, ClipBounds};
use crate::vector::Vector3;
use crate::Result;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Holds the current projection and view matrices.
///
/// Each slot starts as the identity and is replaced wholesale by the most
/// recent derivation of its kind. Degenerate inputs are not rejected: a
/// zero-width volume or a collapsed basis yields `inf`/`NaN`/zero entries
/// exactly as the arithmetic produces them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    projection: Matrix4,
    view: Matrix4,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a camera from a configuration, validating it first.
    pub fn from_settings(settings: &CameraSettings) -> Result<Self> {
        let mut camera = Self::new();
        camera.apply(settings)?;
        Ok(camera)
    }

    /// Replace the slots named by `settings`. Nothing changes if validation fails.
    pub fn apply(&mut self, settings: &CameraSettings) -> Result<()> {
        settings.validate()?;
        if let Some(projection) = &settings.projection {
            self.project(projection.kind, &projection.bounds);
        }
        if let Some(view) = &settings.view {
            view.apply_to(self);
        }
        Ok(())
    }

    /// The current projection matrix.
    pub fn projection(&self) -> Matrix4 {
        self.projection
    }

    /// The current view matrix.
    pub fn view(&self) -> Matrix4 {
        self.view
    }

    /// Derive a projection of the given mode from clip bounds.
    pub fn project(&mut self, mode: ProjectionMode, bounds: &ClipBounds) -> Matrix4 {
        let ClipBounds { left, right, bottom, top, near, far } = *bounds;
        match mode {
            ProjectionMode::Orthographic => self.ortho(left, right, bottom, top, near, far),
            ProjectionMode::Perspective => self.frustum(left, right, bottom, top, near, far),
        }
    }

    /// OpenGL-style orthographic projection.
    pub fn ortho(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Matrix4 {
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;
        #[rustfmt::skip]
        let projection = Matrix4::from_row_major(&[
            2.0 / width, 0.0, 0.0, -((left + right) / width),
            0.0, 2.0 / height, 0.0, -((top + bottom) / height),
            0.0, 0.0, -2.0 / depth, -((far + near) / depth),
            0.0, 0.0, 0.0, 1.0,
        ]);
        log::trace!(
            "projection <- ortho(l={left}, r={right}, b={bottom}, t={top}, n={near}, f={far})"
        );
        self.projection = projection;
        projection
    }

    /// OpenGL-style perspective frustum.
    pub fn frustum(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Matrix4 {
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;
        #[rustfmt::skip]
        let projection = Matrix4::from_row_major(&[
            2.0 * near / width, 0.0, (right + left) / width, 0.0,
            0.0, 2.0 * near / height, (top + bottom) / height, 0.0,
            0.0, 0.0, (near - far) / depth, -2.0 * far * near / depth,
            0.0, 0.0, -1.0, 0.0,
        ]);
        log::trace!(
            "projection <- frustum(l={left}, r={right}, b={bottom}, t={top}, n={near}, f={far})"
        );
        self.projection = projection;
        projection
    }

    /// View matrix for an eye at `eye` looking at `target`.
    pub fn look_at(&mut self, eye: &Vector3, target: &Vector3, up: &Vector3) -> Matrix4 {
        let n = eye.subtract(target).normalize();
        let u = up.cross_product(&n).normalize();
        let v = n.cross_product(&u);

        let view = basis_view(&u, &v, &n, eye);
        log::trace!("view <- look_at(eye={:?}, target={:?})", eye.data(), target.data());
        self.view = view;
        view
    }

    /// View matrix for an eye at `eye` with view-plane normal `direction`.
    ///
    /// `direction` points from the scene towards the eye, the same way as
    /// `eye - target` does for [`Camera::look_at`].
    pub fn view_point(&mut self, eye: &Vector3, direction: &Vector3, up: &Vector3) -> Matrix4 {
        let n = direction.normalize();
        let alpha = up.dot_product(&n);
        let v = up.subtract(&n.scale(alpha)).normalize();
        let u = v.cross_product(&n).normalize();

        let view = basis_view(&u, &v, &n, eye);
        log::trace!(
            "view <- view_point(eye={:?}, direction={:?})",
            eye.data(),
            direction.data()
        );
        self.view = view;
        view
    }
}

/// Rotation with rows `u`, `v`, `n`, moved so that `eye` lands on the origin.
fn basis_view(u: &Vector3, v: &Vector3, n: &Vector3, eye: &Vector3) -> Matrix4 {
    if u.length() == 0.0 || v.length() == 0.0 || n.length() == 0.0 {
        log::debug!(
            "degenerate camera basis: u={:?} v={:?} n={:?}",
            u.data(),
            v.data(),
            n.data()
        );
    }

    #[rustfmt::skip]
    let rotation = Matrix4::from_row_major(&[
        u.x(), u.y(), u.z(), 0.0,
        v.x(), v.y(), v.z(), 0.0,
        n.x(), n.y(), n.z(), 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    rotation.translate(-eye.x(), -eye.y(), -eye.z())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra as na;

    #[rustfmt::skip]
    const IDENTITY: [f32; 16] = [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ];

    fn column_major(values: [f32; 16]) -> Matrix4 {
        // Expected values below are written in upload order.
        let mut m = Matrix4::identity();
        for (i, value) in values.into_iter().enumerate() {
            m.set_value(i % 4, i / 4, value);
        }
        m
    }

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new();
        assert_eq!(camera.projection().data(), IDENTITY);
        assert_eq!(camera.view().data(), IDENTITY);
    }

    #[test]
    #[rustfmt::skip]
    fn test_ortho() {
        let mut camera = Camera::new();
        let m = camera.ortho(-20.0, 20.0, -20.0, 20.0, 10.0, 50.0);
        let expected = column_major([
            0.05, 0.0, 0.0, 0.0,
            0.0, 0.05, 0.0, 0.0,
            0.0, 0.0, -0.05, 0.0,
            0.0, 0.0, -1.5, 1.0,
        ]);
        assert_relative_eq!(m, expected, epsilon = 1e-6);
        assert_eq!(camera.projection(), m);
    }

    #[test]
    #[rustfmt::skip]
    fn test_ortho_asymmetric() {
        let mut camera = Camera::new();
        let m = camera.ortho(-40.0, 40.0, -10.0, 10.0, 30.0, 110.0);
        let expected = column_major([
            0.025, 0.0, 0.0, 0.0,
            0.0, 0.1, 0.0, 0.0,
            0.0, 0.0, -0.025, 0.0,
            0.0, 0.0, -1.75, 1.0,
        ]);
        assert_relative_eq!(m, expected, epsilon = 1e-6);

        let m = camera.ortho(-2.0, 2.0, -1.0, 1.0, 3.0, 4.0);
        let expected = column_major([
            0.5, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, -2.0, 0.0,
            0.0, 0.0, -7.0, 1.0,
        ]);
        assert_relative_eq!(m, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_ortho_matches_nalgebra() {
        let mut camera = Camera::new();
        let ours = camera.ortho(-3.0, 5.0, -1.0, 2.0, 0.5, 40.0);
        let theirs = na::Matrix4::new_orthographic(-3.0f32, 5.0, -1.0, 2.0, 0.5, 40.0);
        for (a, b) in ours.data().iter().zip(theirs.as_slice()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-6);
        }
    }

    #[test]
    #[rustfmt::skip]
    fn test_frustum() {
        let mut camera = Camera::new();
        let m = camera.frustum(-20.0, 20.0, -20.0, 20.0, 10.0, 50.0);
        let expected = column_major([
            0.5, 0.0, 0.0, 0.0,
            0.0, 0.5, 0.0, 0.0,
            0.0, 0.0, -1.0, -1.0,
            0.0, 0.0, -25.0, 0.0,
        ]);
        assert_relative_eq!(m, expected, epsilon = 1e-6);

        let m = camera.frustum(-40.0, 40.0, -10.0, 10.0, 30.0, 110.0);
        let expected = column_major([
            0.75, 0.0, 0.0, 0.0,
            0.0, 3.0, 0.0, 0.0,
            0.0, 0.0, -1.0, -1.0,
            0.0, 0.0, -82.5, 0.0,
        ]);
        assert_relative_eq!(m, expected, epsilon = 1e-5);

        let m = camera.frustum(-2.0, 2.0, -1.0, 1.0, 3.0, 4.0);
        let expected = column_major([
            1.5, 0.0, 0.0, 0.0,
            0.0, 3.0, 0.0, 0.0,
            0.0, 0.0, -1.0, -1.0,
            0.0, 0.0, -24.0, 0.0,
        ]);
        assert_relative_eq!(m, expected, epsilon = 1e-6);
        assert_eq!(m.value(2, 3), -24.0);
        assert_eq!(camera.projection(), m);
    }

    #[test]
    fn test_projection_slot_is_replaced() {
        let mut camera = Camera::new();
        camera.ortho(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0);
        let frustum = camera.frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0);
        assert_eq!(camera.projection(), frustum);
        assert_eq!(camera.projection(), camera.projection());
        assert_eq!(camera.view().data(), IDENTITY);
    }

    #[test]
    fn test_project_dispatches_on_mode() {
        let bounds = ClipBounds {
            left: -2.0,
            right: 2.0,
            bottom: -1.0,
            top: 1.0,
            near: 3.0,
            far: 4.0,
        };
        let mut a = Camera::new();
        let mut b = Camera::new();
        assert_eq!(
            a.project(ProjectionMode::Perspective, &bounds),
            b.frustum(-2.0, 2.0, -1.0, 1.0, 3.0, 4.0)
        );
        assert_eq!(
            a.project(ProjectionMode::Orthographic, &bounds),
            b.ortho(-2.0, 2.0, -1.0, 1.0, 3.0, 4.0)
        );
    }

    #[test]
    fn test_degenerate_bounds_propagate() {
        let mut camera = Camera::new();
        let m = camera.ortho(1.0, 1.0, -1.0, 1.0, 1.0, 10.0);
        assert!(m.value(0, 0).is_infinite());
        assert!(m.value(0, 3).is_infinite() || m.value(0, 3).is_nan());
    }

    #[test]
    fn test_look_at_down_negative_z() {
        let mut camera = Camera::new();
        let m = camera.look_at(
            &Vector3::new(0.0, 0.0, 5.0),
            &Vector3::zero(),
            &Vector3::new(0.0, 1.0, 0.0),
        );
        let expected = Matrix4::identity().translate(0.0, 0.0, -5.0);
        assert_abs_diff_eq!(m, expected, epsilon = 1e-6);
        assert_eq!(camera.view(), m);
    }

    #[test]
    fn test_look_at_matches_nalgebra() {
        let eye = Vector3::new(3.0, 4.0, 5.0);
        let target = Vector3::new(0.0, 1.0, 0.0);
        let up = Vector3::new(0.0, 1.0, 0.0);
        let ours = Camera::new().look_at(&eye, &target, &up);

        let theirs = na::Matrix4::look_at_rh(
            &na::Point3::new(3.0f32, 4.0, 5.0),
            &na::Point3::new(0.0, 1.0, 0.0),
            &na::Vector3::new(0.0, 1.0, 0.0),
        );
        for (a, b) in ours.data().iter().zip(theirs.as_slice()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_look_at_maps_target_onto_negative_z_axis() {
        let eye = Vector3::new(-2.0, 7.0, 1.5);
        let target = Vector3::new(4.0, 0.5, -3.0);
        let view = Camera::new().look_at(&eye, &target, &Vector3::new(0.0, 1.0, 0.0));

        // w = 1 for a point: add the translation column by hand.
        let rotated = view * target;
        let x = rotated.x() + view.value(0, 3);
        let y = rotated.y() + view.value(1, 3);
        let z = rotated.z() + view.value(2, 3);
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(z, -eye.subtract(&target).length(), epsilon = 1e-5);
    }

    #[test]
    fn test_look_at_all_zero_input() {
        let zero = Vector3::zero();
        let m = Camera::new().look_at(&zero, &zero, &zero);
        let mut expected = [0.0; 16];
        expected[15] = 1.0;
        assert_eq!(m.data(), expected);
    }

    #[test]
    fn test_view_point_agrees_with_look_at() {
        let eye = Vector3::new(1.0, 2.0, 8.0);
        let target = Vector3::new(-1.0, 0.0, 0.0);
        let up = Vector3::new(0.2, 1.0, 0.1);

        let mut camera = Camera::new();
        let looked = camera.look_at(&eye, &target, &up);
        let pointed = camera.view_point(&eye, &eye.subtract(&target), &up);
        assert_relative_eq!(looked, pointed, epsilon = 1e-5);
        assert_eq!(camera.view(), pointed);
    }

    #[test]
    fn test_view_point_basis_is_orthonormal() {
        let m = Camera::new().view_point(
            &Vector3::new(0.0, 0.0, 0.0),
            &Vector3::new(1.0, 1.0, 1.0),
            &Vector3::new(0.0, 1.0, 0.0),
        );
        for i in 0..3 {
            let row = Vector3::new(m.value(i, 0), m.value(i, 1), m.value(i, 2));
            assert_relative_eq!(row.length(), 1.0, epsilon = 1e-6);
            let next = (i + 1) % 3;
            let other = Vector3::new(m.value(next, 0), m.value(next, 1), m.value(next, 2));
            assert_abs_diff_eq!(row.dot_product(&other), 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_view_point_up_parallel_to_direction() {
        let m = Camera::new().view_point(
            &Vector3::new(0.0, 10.0, 0.0),
            &Vector3::new(0.0, 1.0, 0.0),
            &Vector3::new(0.0, 2.0, 0.0),
        );
        // u and v collapse to zero; only the n row and the w row survive.
        for c in 0..4 {
            assert_eq!(m.value(0, c), 0.0);
            assert_eq!(m.value(1, c), 0.0);
        }
        assert_eq!(
            [m.value(2, 0), m.value(2, 1), m.value(2, 2), m.value(2, 3)],
            [0.0, 1.0, 0.0, -10.0]
        );
        assert_eq!(m.value(3, 3), 1.0);
    }

    #[test]
    fn test_view_point_does_not_touch_inputs() {
        let direction = Vector3::new(0.0, 0.0, 2.0);
        let up = Vector3::new(0.0, 3.0, 0.0);
        Camera::new().view_point(&Vector3::zero(), &direction, &up);
        assert_eq!(direction, Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(up, Vector3::new(0.0, 3.0, 0.0));
    }
}
