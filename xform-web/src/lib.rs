//! xform Web - WASM bindings for the WebGL demos
//!
//! Exposes the matrix, vector, camera and model-transform types to
//! JavaScript under the names the demo pages call. Every `getData` returns
//! a `Float32Array` ready for `uniformMatrix4fv`.

use wasm_bindgen::prelude::*;
use xform_core::{CameraSettings, Matrix4, ModelTransform, Vector3};

fn to_js_error(err: xform_core::Error) -> JsValue {
    log::warn!("Rejected camera settings: {err}");
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(js_name = Matrix)]
#[derive(Debug, Clone, PartialEq)]
pub struct JsMatrix {
    inner: Matrix4,
}

#[wasm_bindgen(js_class = Matrix)]
impl JsMatrix {
    /// Identity, or up to 16 values given row by row.
    #[wasm_bindgen(constructor)]
    pub fn new(values: Option<Vec<f32>>) -> JsMatrix {
        let inner = match values {
            Some(values) => Matrix4::from_row_major(&values),
            None => Matrix4::identity(),
        };
        JsMatrix { inner }
    }

    pub fn identity(&self) -> JsMatrix {
        Matrix4::identity().into()
    }

    #[wasm_bindgen(js_name = getData)]
    pub fn get_data(&self) -> Vec<f32> {
        self.inner.data().to_vec()
    }

    #[wasm_bindgen(js_name = getValue)]
    pub fn get_value(&self, r: usize, c: usize) -> f32 {
        self.inner.value(r, c)
    }

    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&mut self, r: usize, c: usize, value: f32) {
        self.inner.set_value(r, c, value);
    }

    pub fn mult(&self, other: &JsMatrix) -> JsMatrix {
        self.inner.multiply(&other.inner).into()
    }

    pub fn translate(&self, x: f32, y: f32, z: f32) -> JsMatrix {
        self.inner.translate(x, y, z).into()
    }

    pub fn scale(
        &self,
        sx: f32,
        sy: f32,
        sz: f32,
        x: Option<f32>,
        y: Option<f32>,
        z: Option<f32>,
    ) -> JsMatrix {
        let (x, y, z) = pivot(x, y, z);
        self.inner.scale_about(sx, sy, sz, x, y, z).into()
    }

    #[wasm_bindgen(js_name = rotateX)]
    pub fn rotate_x(&self, theta: f32, x: Option<f32>, y: Option<f32>, z: Option<f32>) -> JsMatrix {
        self.rotate(theta, 0.0, 0.0, x, y, z)
    }

    #[wasm_bindgen(js_name = rotateY)]
    pub fn rotate_y(&self, theta: f32, x: Option<f32>, y: Option<f32>, z: Option<f32>) -> JsMatrix {
        self.rotate(0.0, theta, 0.0, x, y, z)
    }

    #[wasm_bindgen(js_name = rotateZ)]
    pub fn rotate_z(&self, theta: f32, x: Option<f32>, y: Option<f32>, z: Option<f32>) -> JsMatrix {
        self.rotate(0.0, 0.0, theta, x, y, z)
    }

    /// Angles in degrees, about an optional pivot.
    pub fn rotate(
        &self,
        theta_x: f32,
        theta_y: f32,
        theta_z: f32,
        x: Option<f32>,
        y: Option<f32>,
        z: Option<f32>,
    ) -> JsMatrix {
        let (x, y, z) = pivot(x, y, z);
        self.inner
            .rotate_about(theta_x, theta_y, theta_z, x, y, z)
            .into()
    }

    #[wasm_bindgen(js_name = asHTML)]
    pub fn as_html(&self) -> String {
        self.inner.to_html()
    }
}

fn pivot(x: Option<f32>, y: Option<f32>, z: Option<f32>) -> (f32, f32, f32) {
    (x.unwrap_or(0.0), y.unwrap_or(0.0), z.unwrap_or(0.0))
}

impl From<Matrix4> for JsMatrix {
    fn from(inner: Matrix4) -> Self {
        JsMatrix { inner }
    }
}

#[wasm_bindgen(js_name = Vector)]
#[derive(Debug, Clone, PartialEq)]
pub struct JsVector {
    inner: Vector3,
}

#[wasm_bindgen(js_class = Vector)]
impl JsVector {
    /// Zero, or up to three values for x, y and z.
    #[wasm_bindgen(constructor)]
    pub fn new(values: Option<Vec<f32>>) -> JsVector {
        let inner = values
            .map(|values| Vector3::from_slice(&values))
            .unwrap_or_default();
        JsVector { inner }
    }

    #[wasm_bindgen(js_name = crossProduct)]
    pub fn cross_product(&self, other: &JsVector) -> JsVector {
        self.inner.cross_product(&other.inner).into()
    }

    #[wasm_bindgen(js_name = dotProduct)]
    pub fn dot_product(&self, other: &JsVector) -> f32 {
        self.inner.dot_product(&other.inner)
    }

    pub fn add(&self, other: &JsVector) -> JsVector {
        self.inner.add(&other.inner).into()
    }

    pub fn subtract(&self, other: &JsVector) -> JsVector {
        self.inner.subtract(&other.inner).into()
    }

    pub fn normalize(&self) -> JsVector {
        self.inner.normalize().into()
    }

    pub fn length(&self) -> f32 {
        self.inner.length()
    }

    /// Scales this vector in place and returns its data, as the demo pages expect.
    pub fn scale(&mut self, s: f32) -> Vec<f32> {
        self.inner.scale_in_place(s).to_vec()
    }

    #[wasm_bindgen(js_name = getX)]
    pub fn get_x(&self) -> f32 {
        self.inner.x()
    }

    #[wasm_bindgen(js_name = getY)]
    pub fn get_y(&self) -> f32 {
        self.inner.y()
    }

    #[wasm_bindgen(js_name = getZ)]
    pub fn get_z(&self) -> f32 {
        self.inner.z()
    }

    #[wasm_bindgen(js_name = getData)]
    pub fn get_data(&self) -> Vec<f32> {
        self.inner.data().to_vec()
    }
}

impl From<Vector3> for JsVector {
    fn from(inner: Vector3) -> Self {
        JsVector { inner }
    }
}

#[wasm_bindgen(js_name = Camera)]
#[derive(Debug, Clone, Default)]
pub struct JsCamera {
    inner: xform_core::Camera,
}

#[wasm_bindgen(js_class = Camera)]
impl JsCamera {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsCamera {
        JsCamera::default()
    }

    /// Build a camera from a JSON setup such as
    /// `{"projection": {"kind": "perspective", ...}, "view": {"kind": "look_at", ...}}`.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<JsCamera, JsValue> {
        let mut camera = JsCamera::new();
        camera.apply_json(json)?;
        Ok(camera)
    }

    #[wasm_bindgen(js_name = applyJson)]
    pub fn apply_json(&mut self, json: &str) -> Result<(), JsValue> {
        let settings = CameraSettings::from_json_str(json).map_err(to_js_error)?;
        self.inner.apply(&settings).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = getProjection)]
    pub fn get_projection(&self) -> JsMatrix {
        self.inner.projection().into()
    }

    #[wasm_bindgen(js_name = getView)]
    pub fn get_view(&self) -> JsMatrix {
        self.inner.view().into()
    }

    pub fn ortho(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> JsMatrix {
        self.inner.ortho(left, right, bottom, top, near, far).into()
    }

    pub fn frustum(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> JsMatrix {
        self.inner.frustum(left, right, bottom, top, near, far).into()
    }

    #[wasm_bindgen(js_name = lookAt)]
    pub fn look_at(&mut self, eye: &JsVector, target: &JsVector, up: &JsVector) -> JsMatrix {
        self.inner.look_at(&eye.inner, &target.inner, &up.inner).into()
    }

    #[wasm_bindgen(js_name = viewPoint)]
    pub fn view_point(&mut self, eye: &JsVector, direction: &JsVector, up: &JsVector) -> JsMatrix {
        self.inner
            .view_point(&eye.inner, &direction.inner, &up.inner)
            .into()
    }
}

/// Model matrix state for one shape on the page.
#[wasm_bindgen(js_name = Transform)]
#[derive(Debug, Clone, Default)]
pub struct JsTransform {
    inner: ModelTransform,
}

#[wasm_bindgen(js_class = Transform)]
impl JsTransform {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsTransform {
        JsTransform::default()
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.inner.set_translation(x, y, z);
    }

    pub fn rotate(&mut self, x: f32, y: f32, z: f32) {
        self.inner.set_rotation(x, y, z);
    }

    pub fn scale(&mut self, width: f32, height: f32, depth: f32) {
        self.inner.set_scale(width, height, depth);
    }

    #[wasm_bindgen(js_name = setWorld)]
    pub fn set_world(&mut self, world: &JsMatrix) {
        self.inner.set_world(world.inner);
    }

    #[wasm_bindgen(js_name = getModel)]
    pub fn get_model(&self) -> JsMatrix {
        self.inner.model().into()
    }
}
