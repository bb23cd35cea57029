//! Model matrix composition for renderable shapes
use crate::matrix::Matrix4;

/// Rotation state around three axes (in degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Orientation {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Rotation matrix for this orientation, composed `Rx * Ry * Rz`.
    pub fn matrix(&self) -> Matrix4 {
        Matrix4::identity().rotate(self.x, self.y, self.z)
    }
}

/// Per-shape translation, rotation, scale and world matrices.
///
/// [`ModelTransform::model`] multiplies them as
/// `translate * rotate * scale * world`, so a vertex goes through the world
/// matrix first, then scale, rotation and finally translation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModelTransform {
    translate: Matrix4,
    rotate: Matrix4,
    scale: Matrix4,
    world: Matrix4,
}

impl ModelTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the translation component.
    pub fn set_translation(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.translate = Matrix4::identity().translate(x, y, z);
        self
    }

    /// Replace the rotation component, angles in degrees.
    pub fn set_rotation(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.rotate = Orientation::new(x, y, z).matrix();
        self
    }

    /// Replace the rotation component from an accumulated orientation.
    pub fn set_orientation(&mut self, orientation: &Orientation) -> &mut Self {
        self.rotate = orientation.matrix();
        self
    }

    /// Replace the scale component.
    pub fn set_scale(&mut self, width: f32, height: f32, depth: f32) -> &mut Self {
        self.scale = Matrix4::identity().scale(width, height, depth);
        self
    }

    /// Replace the world matrix applied before everything else.
    pub fn set_world(&mut self, world: Matrix4) -> &mut Self {
        self.world = world;
        self
    }

    pub fn translation(&self) -> Matrix4 {
        self.translate
    }

    pub fn rotation(&self) -> Matrix4 {
        self.rotate
    }

    pub fn scaling(&self) -> Matrix4 {
        self.scale
    }

    pub fn world(&self) -> Matrix4 {
        self.world
    }

    /// The composed model matrix.
    pub fn model(&self) -> Matrix4 {
        self.translate
            .multiply(&self.rotate)
            .multiply(&self.scale)
            .multiply(&self.world)
    }
}

/// Create a model-view-projection matrix
pub fn mvp(model: &Matrix4, view: &Matrix4, projection: &Matrix4) -> Matrix4 {
    projection.multiply(view).multiply(model)
}
